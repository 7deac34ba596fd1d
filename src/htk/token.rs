// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashtoken
// File: token.rs
// Author: hashtoken maintainers

//! Secure token generation. Every generator offered here is a CSPRNG; the
//! `CryptoRng` bound on [`generate_token_with`] keeps it that way.

use crate::htk::error::{Error, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::distributions::Alphanumeric;
use rand::Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};
use std::ops::RangeInclusive;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};
use tracing::debug;

pub const MIN_TOKEN_LENGTH: usize = 8;
pub const MAX_TOKEN_LENGTH: usize = 128;
pub const DEFAULT_TOKEN_LENGTH: usize = 32;
pub const TOKEN_LENGTHS: RangeInclusive<usize> =
	MIN_TOKEN_LENGTH..=MAX_TOKEN_LENGTH;

#[derive(clap::ValueEnum, Debug, Copy, Clone, PartialEq, Eq, EnumIter)]
#[value(rename_all = "lowercase")]
pub enum TokenKind {
	/// Uniform draws from `A-Z`, `a-z` and `0-9`.
	#[value(alias = "alnum")]
	Alphanumeric,
	/// Lowercase hexadecimal.
	Hex,
	/// URL-safe base64 without padding.
	#[value(name = "base64url", alias = "base64-url", alias = "base64_url")]
	Base64Url,
}

impl TokenKind {
	pub fn name(self) -> &'static str {
		match self {
			Self::Alphanumeric => "alphanumeric",
			Self::Hex => "hex",
			Self::Base64Url => "base64url",
		}
	}

	pub fn iter() -> impl Iterator<Item = TokenKind> {
		<Self as IntoEnumIterator>::iter()
	}
}

impl std::fmt::Display for TokenKind {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		write!(f, "{}", self.name())
	}
}

impl FromStr for TokenKind {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"alphanumeric" | "alnum" => Ok(Self::Alphanumeric),
			"hex" => Ok(Self::Hex),
			"base64url" | "base64-url" | "base64_url" => {
				Ok(Self::Base64Url)
			}
			other => Err(Error::invalid_argument(format!(
				"unknown token kind `{}`",
				other
			))),
		}
	}
}

/// Which secure generator feeds the token.
#[derive(clap::ValueEnum, Debug, Copy, Clone, PartialEq, Eq, EnumIter)]
#[value(rename_all = "lowercase")]
pub enum TokenSource {
	/// Operating system entropy on every call.
	#[value(name = "os")]
	OsRng,
	/// rand's thread-local, OS-seeded generator.
	#[value(name = "thread")]
	ThreadRng,
	/// ChaCha20 seeded from the OS.
	#[value(name = "chacha20")]
	ChaCha20,
	/// HC-128 seeded from the OS.
	#[value(name = "hc128")]
	Hc128,
}

impl Default for TokenSource {
	fn default() -> Self {
		Self::OsRng
	}
}

impl std::fmt::Display for TokenSource {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		write!(f, "{:?}", self)
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
	value: String,
	kind: TokenKind,
}

impl Token {
	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn kind(&self) -> TokenKind {
		self.kind
	}

	pub fn len(&self) -> usize {
		self.value.len()
	}

	pub fn is_empty(&self) -> bool {
		self.value.is_empty()
	}

	pub fn into_string(self) -> String {
		self.value
	}
}

impl std::fmt::Display for Token {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		f.write_str(&self.value)
	}
}

/// Kind and length of a token to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenRequest {
	pub kind: TokenKind,
	pub length: usize,
}

impl TokenRequest {
	pub fn new(kind: TokenKind, length: usize) -> Self {
		Self { kind, length }
	}

	pub fn validate(&self) -> Result<()> {
		if TOKEN_LENGTHS.contains(&self.length) {
			Ok(())
		} else {
			Err(Error::invalid_argument(format!(
				"token length {} is outside {}..={}",
				self.length, MIN_TOKEN_LENGTH, MAX_TOKEN_LENGTH
			)))
		}
	}
}

impl Default for TokenRequest {
	fn default() -> Self {
		Self::new(TokenKind::Alphanumeric, DEFAULT_TOKEN_LENGTH)
	}
}

pub struct TokenGenerator {
	source: TokenSource,
}

impl TokenGenerator {
	pub fn new(source: TokenSource) -> Self {
		Self { source }
	}

	pub fn source(&self) -> TokenSource {
		self.source
	}

	pub fn generate(&self, request: TokenRequest) -> Result<Token> {
		request.validate()?;
		debug!(
			kind = %request.kind,
			length = request.length,
			source = %self.source,
			"generating token"
		);
		match self.source {
			TokenSource::OsRng => {
				generate_token_with(&mut rand::rngs::OsRng, request)
			}
			TokenSource::ThreadRng => {
				generate_token_with(&mut rand::thread_rng(), request)
			}
			TokenSource::ChaCha20 => {
				let mut rng = rand_chacha::ChaCha20Rng::from_entropy();
				generate_token_with(&mut rng, request)
			}
			TokenSource::Hc128 => {
				let mut rng = rand_hc::Hc128Rng::from_entropy();
				generate_token_with(&mut rng, request)
			}
		}
	}
}

impl Default for TokenGenerator {
	fn default() -> Self {
		Self::new(TokenSource::default())
	}
}

/// Generates a token from the operating system's secure generator.
pub fn generate_token(kind: TokenKind, length: usize) -> Result<Token> {
	TokenGenerator::default().generate(TokenRequest::new(kind, length))
}

/// Generates a token from a caller supplied secure generator.
pub fn generate_token_with<R: RngCore + CryptoRng>(
	rng: &mut R,
	request: TokenRequest,
) -> Result<Token> {
	request.validate()?;
	let length = request.length;
	let mut value = match request.kind {
		TokenKind::Alphanumeric => rng
			.sample_iter(Alphanumeric)
			.take(length)
			.map(char::from)
			.collect::<String>(),
		TokenKind::Hex => {
			// Odd lengths keep only the high nibble of the last byte.
			let mut buffer = vec![0u8; (length + 1) / 2];
			rng.fill_bytes(&mut buffer);
			hex::encode(buffer)
		}
		TokenKind::Base64Url => {
			let mut buffer = vec![0u8; length];
			rng.fill_bytes(&mut buffer);
			URL_SAFE_NO_PAD.encode(buffer)
		}
	};
	value.truncate(length);
	Ok(Token {
		value,
		kind: request.kind,
	})
}
