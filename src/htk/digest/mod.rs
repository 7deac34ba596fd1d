// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashtoken
// File: src/htk/digest/mod.rs
// Author: hashtoken maintainers
//
// Digest engine: one pass over a file, many accumulators.

pub mod executor;
pub mod registry;

use crate::htk::error::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

pub use executor::{
	consume_bytes, consume_reader, MultiDigest, DEFAULT_CHUNK_SIZE,
};
pub use registry::{available_algorithms, catalogue, Algorithm};

/// One finalized digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DigestEntry {
	pub algorithm: Algorithm,
	pub hex: String,
}

/// Finalized digests of a single input, in canonical algorithm order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DigestResult {
	entries: Vec<DigestEntry>,
}

impl DigestResult {
	pub(crate) fn from_entries(mut entries: Vec<DigestEntry>) -> Self {
		entries.sort_by_key(|entry| entry.algorithm);
		Self { entries }
	}

	pub fn entries(&self) -> &[DigestEntry] {
		&self.entries
	}

	/// `(canonical name, hex digest)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
		self.entries.iter().map(|entry| {
			(entry.algorithm.canonical_name(), entry.hex.as_str())
		})
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		let algorithm = Algorithm::from_name(name)?;
		self.digest_for(algorithm)
	}

	pub fn digest_for(&self, algorithm: Algorithm) -> Option<&str> {
		self.entries
			.iter()
			.find(|entry| entry.algorithm == algorithm)
			.map(|entry| entry.hex.as_str())
	}

	pub fn algorithms(&self) -> impl Iterator<Item = Algorithm> + '_ {
		self.entries.iter().map(|entry| entry.algorithm)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<'a> IntoIterator for &'a DigestResult {
	type Item = &'a DigestEntry;
	type IntoIter = std::slice::Iter<'a, DigestEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

/// A file to hash and the algorithms to hash it with.
#[derive(Clone, Debug)]
pub struct DigestRequest {
	pub path: PathBuf,
	pub algorithms: Vec<Algorithm>,
}

impl DigestRequest {
	/// Request every catalogued algorithm for `path`.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			algorithms: catalogue().collect(),
		}
	}

	pub fn with_algorithms(mut self, algorithms: &[Algorithm]) -> Self {
		self.algorithms = algorithms.to_vec();
		self
	}

	pub fn run(&self) -> Result<DigestResult> {
		compute_digests(&self.path, &self.algorithms)
	}
}

/// Hashes the file at `path` with every requested algorithm that is
/// compiled in. The file is read once, in [`DEFAULT_CHUNK_SIZE`] chunks.
pub fn compute_digests(
	path: impl AsRef<Path>,
	algorithms: &[Algorithm],
) -> Result<DigestResult> {
	let path = path.as_ref();
	let digests = MultiDigest::new(algorithms);
	let started = Instant::now();
	let file = File::open(path).map_err(|err| Error::io_at(path, err))?;
	let result = consume_reader(file, digests, DEFAULT_CHUNK_SIZE)
		.map_err(|err| Error::io_at(path, err))?;
	debug!(
		path = %path.display(),
		algorithms = result.len(),
		elapsed_ms = started.elapsed().as_millis() as u64,
		"file hashed"
	);
	Ok(result)
}

/// Like [`compute_digests`] but takes algorithm names. Names that do not
/// resolve to a known algorithm are skipped.
pub fn compute_digests_by_name<S: AsRef<str>>(
	path: impl AsRef<Path>,
	names: &[S],
) -> Result<DigestResult> {
	compute_digests(path, &resolve_names(names))
}

/// Resolves algorithm names, dropping the ones nobody knows.
pub fn resolve_names<S: AsRef<str>>(names: &[S]) -> Vec<Algorithm> {
	names
		.iter()
		.filter_map(|name| {
			let name = name.as_ref();
			let algorithm = Algorithm::from_name(name);
			if algorithm.is_none() {
				warn!(name, "unknown digest algorithm, skipping");
			}
			algorithm
		})
		.collect()
}

/// Streams any reader through the requested algorithms using a caller
/// chosen chunk size.
pub fn digest_reader<R: Read>(
	reader: R,
	algorithms: &[Algorithm],
	chunk_size: usize,
) -> Result<DigestResult> {
	if chunk_size == 0 {
		return Err(Error::invalid_argument(
			"chunk size must be greater than zero",
		));
	}
	Ok(consume_reader(
		reader,
		MultiDigest::new(algorithms),
		chunk_size,
	)?)
}

pub fn digest_bytes(data: &[u8], algorithms: &[Algorithm]) -> DigestResult {
	consume_bytes(data, MultiDigest::new(algorithms))
}
