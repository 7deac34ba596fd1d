// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashtoken

use assert_cmd::Command;
use std::fs;

#[allow(deprecated)]
fn htk() -> Command {
	let mut cmd = Command::cargo_bin("htk").expect("binary htk available");
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}

#[test]
fn digest_plain_lists_requested_algorithms_in_order() {
	let dir = tempfile::tempdir().unwrap();
	let input = dir.path().join("abc.txt");
	fs::write(&input, b"abc").unwrap();
	let assert = htk()
		.args(["digest", "-f", "plain", "-a", "sha256", "-a", "md5"])
		.arg(&input)
		.assert()
		.success();
	let stdout = String::from_utf8(assert.get_output().stdout.clone())
		.expect("stdout should be UTF-8");
	let lines: Vec<&str> = stdout.lines().collect();
	assert_eq!(
		lines,
		[
			"MD5: 900150983cd24fb0d6963f7d28e17f72",
			"SHA256: ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
		]
	);
}

#[test]
fn digest_missing_file_fails_with_message() {
	let dir = tempfile::tempdir().unwrap();
	let assert = htk()
		.arg("digest")
		.arg(dir.path().join("missing.bin"))
		.assert()
		.failure();
	let output = assert.get_output();
	assert!(output.stdout.is_empty());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("error:"));
	assert!(stderr.contains("missing.bin"));
}

#[test]
fn digest_unknown_algorithm_is_skipped_with_warning() {
	let dir = tempfile::tempdir().unwrap();
	let input = dir.path().join("empty.bin");
	fs::write(&input, b"").unwrap();
	let assert = htk()
		.args(["digest", "-f", "plain", "-a", "whirlpool", "-a", "sha1"])
		.arg(&input)
		.assert()
		.success();
	let output = assert.get_output();
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert_eq!(
		stdout.trim(),
		"SHA1: da39a3ee5e6b4b0d3255bfef95601890afd80709"
	);
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("whirlpool"));
}

#[test]
fn digest_export_writes_report() {
	let dir = tempfile::tempdir().unwrap();
	let input = dir.path().join("abc.txt");
	let report = dir.path().join("out/report.txt");
	fs::write(&input, b"abc").unwrap();
	htk()
		.args(["digest", "-f", "json", "-a", "md5", "-e"])
		.arg(&report)
		.arg(&input)
		.assert()
		.success();
	let written = fs::read_to_string(&report).unwrap();
	let lines: Vec<&str> = written.lines().collect();
	assert_eq!(lines[0], "File name: abc.txt");
	assert!(lines[1].starts_with("File path: "));
	assert!(lines[1].ends_with("abc.txt"));
	assert_eq!(lines[2], "");
	assert_eq!(lines[3], "MD5: 900150983cd24fb0d6963f7d28e17f72");
	assert_eq!(lines.len(), 4);
}

#[test]
fn algorithms_lists_catalogue() {
	let assert = htk().arg("algorithms").assert().success();
	let stdout = String::from_utf8_lossy(&assert.get_output().stdout)
		.into_owned();
	let names: Vec<&str> = stdout
		.lines()
		.filter_map(|line| line.split_whitespace().next())
		.collect();
	assert_eq!(names.first(), Some(&"MD5"));
	assert_eq!(names.last(), Some(&"BLAKE2S"));
	assert_eq!(names.len(), 12);
}
