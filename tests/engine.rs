// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashtoken

use hashtoken::htk::digest::{
	catalogue, compute_digests, digest_reader, Algorithm,
	DEFAULT_CHUNK_SIZE,
};
use std::fs;
use std::io::BufReader;
use std::thread;

fn sample_bytes(len: usize) -> Vec<u8> {
	(0..len).map(|i| (i.wrapping_mul(7919) % 256) as u8).collect()
}

#[test]
fn file_and_reader_paths_agree_across_chunk_boundaries() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("blob.bin");
	let data = sample_bytes(3 * DEFAULT_CHUNK_SIZE + 17);
	fs::write(&path, &data).unwrap();
	let all: Vec<Algorithm> = catalogue().collect();

	let from_file = compute_digests(&path, &all).unwrap();
	let byte_at_a_time = digest_reader(
		BufReader::new(fs::File::open(&path).unwrap()),
		&all,
		1,
	)
	.unwrap();
	assert_eq!(from_file, byte_at_a_time);
}

#[test]
fn concurrent_requests_do_not_interfere() {
	let dir = tempfile::tempdir().unwrap();
	let first = dir.path().join("first.bin");
	let second = dir.path().join("second.bin");
	fs::write(&first, sample_bytes(100_000)).unwrap();
	fs::write(&second, b"abc").unwrap();

	let expected_first = compute_digests(&first, &[Algorithm::Sha256]).unwrap();
	let handles: Vec<_> = [first.clone(), second.clone()]
		.into_iter()
		.map(|path| {
			thread::spawn(move || {
				compute_digests(&path, &[Algorithm::Sha256]).unwrap()
			})
		})
		.collect();
	let results: Vec<_> =
		handles.into_iter().map(|h| h.join().unwrap()).collect();
	assert_eq!(results[0], expected_first);
	assert_eq!(
		results[1].get("SHA256"),
		Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
	);
}

#[test]
fn directory_path_is_an_io_error() {
	let dir = tempfile::tempdir().unwrap();
	let err = compute_digests(dir.path(), &[Algorithm::Md5]).unwrap_err();
	assert!(err.is_io());
}
