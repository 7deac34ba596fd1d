// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashtoken
// Module: output
// Purpose: Terminal rendering of digest results.

use crate::htk::digest::DigestResult;
use clap::ValueEnum;
use colored::Colorize;
use serde_json::json;
use std::fmt;
use std::path::Path;

/// Supported digest output formats surfaced via the CLI `--format` flag.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum DigestOutputFormat {
	/// Aligned algorithm / digest columns.
	Table,
	/// `ALGO: digest` lines, the same body the export report uses.
	Plain,
	/// One JSON document with the path and the ordered digests.
	Json,
}

impl fmt::Display for DigestOutputFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Self::Table => "Table",
			Self::Plain => "Plain text",
			Self::Json => "JSON",
		};
		write!(f, "{}", label)
	}
}

const ALGORITHM_HEADING: &str = "Algorithm";
const DIGEST_HEADING: &str = "Digest";

pub fn render_digests(
	path: &Path,
	result: &DigestResult,
	format: DigestOutputFormat,
) -> String {
	match format {
		DigestOutputFormat::Table => render_table(result),
		DigestOutputFormat::Plain => render_plain(result),
		DigestOutputFormat::Json => render_json(path, result),
	}
}

fn render_table(result: &DigestResult) -> String {
	let width = result
		.iter()
		.map(|(name, _)| name.len())
		.chain(std::iter::once(ALGORITHM_HEADING.len()))
		.max()
		.unwrap_or_default();
	let mut lines = Vec::with_capacity(result.len() + 1);
	lines.push(format!(
		"{}  {}",
		format!("{:<width$}", ALGORITHM_HEADING).bold(),
		DIGEST_HEADING.bold()
	));
	for (name, digest) in result.iter() {
		lines.push(format!(
			"{}  {}",
			format!("{:<width$}", name).cyan(),
			digest
		));
	}
	lines.join("\n")
}

fn render_plain(result: &DigestResult) -> String {
	result
		.iter()
		.map(|(name, digest)| format!("{}: {}", name, digest))
		.collect::<Vec<_>>()
		.join("\n")
}

fn render_json(path: &Path, result: &DigestResult) -> String {
	let document = json!({
		"path": path.display().to_string(),
		"digests": result,
	});
	// A `Value` with string keys always serializes.
	serde_json::to_string_pretty(&document)
		.unwrap_or_else(|_| document.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::htk::digest::{digest_bytes, Algorithm};

	fn sample() -> DigestResult {
		digest_bytes(b"abc", &[Algorithm::Sha256, Algorithm::Md5])
	}

	#[test]
	fn plain_lists_each_algorithm_once() {
		let rendered = render_digests(
			Path::new("abc.txt"),
			&sample(),
			DigestOutputFormat::Plain,
		);
		assert_eq!(
			rendered,
			"MD5: 900150983cd24fb0d6963f7d28e17f72\nSHA256: ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
		);
	}

	#[test]
	fn table_has_heading_and_rows() {
		colored::control::set_override(false);
		let rendered = render_digests(
			Path::new("abc.txt"),
			&sample(),
			DigestOutputFormat::Table,
		);
		let lines: Vec<&str> = rendered.lines().collect();
		assert_eq!(lines.len(), 3);
		assert_eq!(lines[0], "Algorithm  Digest");
		assert!(lines[1].starts_with("MD5        9001"));
	}

	#[test]
	fn json_of_empty_result_is_an_empty_list() {
		let rendered = render_digests(
			Path::new("empty.bin"),
			&DigestResult::default(),
			DigestOutputFormat::Json,
		);
		let value: serde_json::Value =
			serde_json::from_str(&rendered).unwrap();
		assert_eq!(value["digests"], serde_json::json!([]));
	}

	#[test]
	fn json_keeps_canonical_order() {
		let rendered = render_digests(
			Path::new("abc.txt"),
			&sample(),
			DigestOutputFormat::Json,
		);
		let value: serde_json::Value =
			serde_json::from_str(&rendered).unwrap();
		assert_eq!(value["path"], "abc.txt");
		assert_eq!(value["digests"][0]["algorithm"], "MD5");
		assert_eq!(value["digests"][1]["algorithm"], "SHA256");
		assert_eq!(
			value["digests"][1]["hex"],
			"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
		);
	}
}
