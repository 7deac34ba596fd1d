// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashtoken
// File: report.rs
// Author: hashtoken maintainers

//! Plain-text export of a digest result.

use crate::htk::digest::DigestResult;
use crate::htk::error::{Error, Result};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_FILE_NAME_LABEL: &str = "File name: ";
pub const DEFAULT_FILE_PATH_LABEL: &str = "File path: ";

/// Heading prefixes written before the file name and path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportLabels {
	pub file_name: Cow<'static, str>,
	pub file_path: Cow<'static, str>,
}

impl Default for ReportLabels {
	fn default() -> Self {
		Self {
			file_name: Cow::Borrowed(DEFAULT_FILE_NAME_LABEL),
			file_path: Cow::Borrowed(DEFAULT_FILE_PATH_LABEL),
		}
	}
}

pub struct DigestReport<'a> {
	source: &'a Path,
	result: &'a DigestResult,
	labels: ReportLabels,
}

impl<'a> DigestReport<'a> {
	pub fn new(source: &'a Path, result: &'a DigestResult) -> Self {
		Self {
			source,
			result,
			labels: ReportLabels::default(),
		}
	}

	pub fn with_labels(mut self, labels: ReportLabels) -> Self {
		self.labels = labels;
		self
	}

	pub fn file_name(&self) -> String {
		self.source
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| self.source.display().to_string())
	}

	pub fn absolute_path(&self) -> PathBuf {
		absolute(self.source)
	}

	pub fn render(&self) -> String {
		let mut out = String::new();
		let _ = writeln!(out, "{}{}", self.labels.file_name, self.file_name());
		let _ = writeln!(
			out,
			"{}{}",
			self.labels.file_path,
			self.absolute_path().display()
		);
		out.push('\n');
		for (algorithm, digest) in self.result.iter() {
			let _ = writeln!(out, "{}: {}", algorithm, digest);
		}
		out
	}

	/// Writes the rendered report to `destination`, creating parent
	/// directories as needed.
	pub fn write_to(&self, destination: &Path) -> Result<()> {
		if let Some(parent) = destination.parent() {
			if !parent.as_os_str().is_empty() {
				fs::create_dir_all(parent)
					.map_err(|err| Error::io_at(parent, err))?;
			}
		}
		fs::write(destination, self.render())
			.map_err(|err| Error::io_at(destination, err))?;
		info!(destination = %destination.display(), "report exported");
		Ok(())
	}
}

/// Absolute form of `path` without resolving symlinks, so the path line
/// names the same entry as the file name line.
fn absolute(path: &Path) -> PathBuf {
	if let Ok(resolved) = std::path::absolute(path) {
		return resolved;
	}
	std::env::current_dir()
		.map(|cwd| cwd.join(path))
		.unwrap_or_else(|_| path.to_path_buf())
}
