// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashtoken
// File: error.rs
// Author: hashtoken maintainers

//! Error type shared by the digest engine, the token generator and the
//! report writer.

use std::borrow::Cow;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// A file could not be opened, read or written.
	Io,
	/// A caller supplied value is outside what the operation accepts.
	InvalidArgument,
}

#[derive(Debug)]
pub struct Error {
	kind: ErrorKind,
	message: Cow<'static, str>,
	source: Option<io::Error>,
}

impl Error {
	pub fn new(
		kind: ErrorKind,
		message: impl Into<Cow<'static, str>>,
	) -> Self {
		Self {
			kind,
			message: message.into(),
			source: None,
		}
	}

	pub fn invalid_argument(
		message: impl Into<Cow<'static, str>>,
	) -> Self {
		Self::new(ErrorKind::InvalidArgument, message)
	}

	/// Wraps an I/O failure, prefixing the message with the path involved.
	pub fn io_at(path: &Path, err: io::Error) -> Self {
		Self {
			kind: ErrorKind::Io,
			message: format!("{}: {}", path.display(), err).into(),
			source: Some(err),
		}
	}

	pub fn kind(&self) -> ErrorKind {
		self.kind
	}

	pub fn message(&self) -> &str {
		self.message.as_ref()
	}

	pub fn is_io(&self) -> bool {
		self.kind == ErrorKind::Io
	}

	pub fn is_invalid_argument(&self) -> bool {
		self.kind == ErrorKind::InvalidArgument
	}
}

impl std::fmt::Display for Error {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		write!(f, "{}", self.message)
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		self.source
			.as_ref()
			.map(|err| err as &(dyn std::error::Error + 'static))
	}
}

impl From<io::Error> for Error {
	fn from(value: io::Error) -> Self {
		Self {
			kind: ErrorKind::Io,
			message: value.to_string().into(),
			source: Some(value),
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
