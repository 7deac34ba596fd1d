// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashtoken
// File: lib.rs
// Author: hashtoken maintainers

pub mod htk {
	pub mod app;
	pub mod digest;
	pub mod error;
	pub mod output;
	pub mod report;
	pub mod token;
}

pub use htk::digest::{
	compute_digests, compute_digests_by_name, Algorithm, DigestResult,
};
pub use htk::error::{Error, ErrorKind};
pub use htk::token::{generate_token, Token, TokenKind};
