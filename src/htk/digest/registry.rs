// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashtoken
// File: registry.rs
// Author: hashtoken maintainers

//! Catalogue of the digest algorithms the engine knows about, in canonical
//! order, plus factory dispatch onto the RustCrypto hashers.

use digest::{Digest, DynDigest};
use serde::{Serialize, Serializer};
use strum::{EnumIter, IntoEnumIterator};

/// Declaration order is the canonical result order.
#[derive(
	Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter,
)]
pub enum Algorithm {
	Md5,
	Sha1,
	Sha224,
	Sha256,
	Sha384,
	Sha512,
	Sha3_224,
	Sha3_256,
	Sha3_384,
	Sha3_512,
	Blake2b,
	Blake2s,
}

impl Algorithm {
	pub const fn canonical_name(self) -> &'static str {
		match self {
			Self::Md5 => "MD5",
			Self::Sha1 => "SHA1",
			Self::Sha224 => "SHA224",
			Self::Sha256 => "SHA256",
			Self::Sha384 => "SHA384",
			Self::Sha512 => "SHA512",
			Self::Sha3_224 => "SHA3_224",
			Self::Sha3_256 => "SHA3_256",
			Self::Sha3_384 => "SHA3_384",
			Self::Sha3_512 => "SHA3_512",
			Self::Blake2b => "BLAKE2B",
			Self::Blake2s => "BLAKE2S",
		}
	}

	/// Size of the finalized digest in bytes.
	pub const fn output_size(self) -> usize {
		match self {
			Self::Md5 => 16,
			Self::Sha1 => 20,
			Self::Sha224 | Self::Sha3_224 => 28,
			Self::Sha256 | Self::Sha3_256 | Self::Blake2s => 32,
			Self::Sha384 | Self::Sha3_384 => 48,
			Self::Sha512 | Self::Sha3_512 | Self::Blake2b => 64,
		}
	}

	/// Looks an algorithm up by name. Matching ignores case and treats
	/// `-` like `_`, so `sha3-256` and `SHA3_256` are the same.
	pub fn from_name(name: &str) -> Option<Self> {
		let needle = name.trim().replace('-', "_").to_ascii_uppercase();
		Self::iter().find(|alg| alg.canonical_name() == needle)
	}

	/// Whether a hasher for this algorithm was compiled in.
	pub fn is_available(self) -> bool {
		self.hasher().is_some()
	}

	/// Fresh accumulator, or `None` when the backing crate is disabled.
	pub fn hasher(self) -> Option<Box<dyn DynDigest>> {
		let digest: Box<dyn DynDigest> = match self {
			Self::Md5 => Box::new(md5::Md5::new()),
			Self::Sha1 => Box::new(sha1::Sha1::new()),
			Self::Sha224 => Box::new(sha2::Sha224::new()),
			Self::Sha256 => Box::new(sha2::Sha256::new()),
			Self::Sha384 => Box::new(sha2::Sha384::new()),
			Self::Sha512 => Box::new(sha2::Sha512::new()),
			#[cfg(feature = "sha3")]
			Self::Sha3_224 => Box::new(sha3::Sha3_224::new()),
			#[cfg(feature = "sha3")]
			Self::Sha3_256 => Box::new(sha3::Sha3_256::new()),
			#[cfg(feature = "sha3")]
			Self::Sha3_384 => Box::new(sha3::Sha3_384::new()),
			#[cfg(feature = "sha3")]
			Self::Sha3_512 => Box::new(sha3::Sha3_512::new()),
			#[cfg(feature = "blake2")]
			Self::Blake2b => Box::new(blake2::Blake2b512::new()),
			#[cfg(feature = "blake2")]
			Self::Blake2s => Box::new(blake2::Blake2s256::new()),
			#[allow(unreachable_patterns)]
			_ => return None,
		};
		Some(digest)
	}
}

impl std::fmt::Display for Algorithm {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		write!(f, "{}", self.canonical_name())
	}
}

impl Serialize for Algorithm {
	fn serialize<S: Serializer>(
		&self,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.canonical_name())
	}
}

/// Every algorithm the engine may be asked for, in canonical order.
pub fn catalogue() -> impl Iterator<Item = Algorithm> {
	Algorithm::iter()
}

/// The compiled-in subset of [`catalogue`].
pub fn available_algorithms() -> Vec<Algorithm> {
	catalogue().filter(|alg| alg.is_available()).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn names_parse_loosely() {
		assert_eq!(Algorithm::from_name("md5"), Some(Algorithm::Md5));
		assert_eq!(
			Algorithm::from_name("sha3-256"),
			Some(Algorithm::Sha3_256)
		);
		assert_eq!(
			Algorithm::from_name(" Blake2b "),
			Some(Algorithm::Blake2b)
		);
		assert_eq!(Algorithm::from_name("whirlpool"), None);
	}

	#[test]
	fn catalogue_order_is_canonical() {
		let names: Vec<&str> =
			catalogue().map(Algorithm::canonical_name).collect();
		assert_eq!(
			names,
			[
				"MD5", "SHA1", "SHA224", "SHA256", "SHA384", "SHA512",
				"SHA3_224", "SHA3_256", "SHA3_384", "SHA3_512",
				"BLAKE2B", "BLAKE2S",
			]
		);
	}

	#[test]
	fn output_size_matches_hasher() {
		for alg in available_algorithms() {
			let hasher = alg.hasher().expect("available");
			assert_eq!(hasher.output_size(), alg.output_size(), "{alg}");
		}
	}

	#[cfg(all(feature = "sha3", feature = "blake2"))]
	#[test]
	fn default_build_has_everything() {
		assert_eq!(available_algorithms().len(), catalogue().count());
	}
}
