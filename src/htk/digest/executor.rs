// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashtoken
// File: executor.rs
// Author: hashtoken maintainers

//! Streaming helpers: one read loop feeding every active accumulator.

use super::registry::Algorithm;
use super::{DigestEntry, DigestResult};
use digest::DynDigest;
use std::io::{self, Read};
use tracing::{debug, trace};

pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// A set of accumulators that all see the same bytes.
pub struct MultiDigest {
	active: Vec<(Algorithm, Box<dyn DynDigest>)>,
}

impl MultiDigest {
	/// Builds accumulators for the requested algorithms in canonical
	/// order. Duplicates collapse; unavailable algorithms are dropped.
	pub fn new(algorithms: &[Algorithm]) -> Self {
		let mut requested = algorithms.to_vec();
		requested.sort();
		requested.dedup();
		let active = requested
			.into_iter()
			.filter_map(|alg| match alg.hasher() {
				Some(hasher) => Some((alg, hasher)),
				None => {
					debug!(algorithm = %alg, "algorithm not compiled in, skipping");
					None
				}
			})
			.collect();
		Self { active }
	}

	pub fn algorithms(&self) -> impl Iterator<Item = Algorithm> + '_ {
		self.active.iter().map(|(alg, _)| *alg)
	}

	pub fn is_empty(&self) -> bool {
		self.active.is_empty()
	}

	pub fn update(&mut self, chunk: &[u8]) {
		for (_, hasher) in self.active.iter_mut() {
			hasher.update(chunk);
		}
	}

	pub fn finalize(self) -> DigestResult {
		let entries = self
			.active
			.into_iter()
			.map(|(algorithm, hasher)| DigestEntry {
				algorithm,
				hex: hex::encode(hasher.finalize()),
			})
			.collect();
		DigestResult::from_entries(entries)
	}
}

/// Reads `reader` to the end in `chunk_size` pieces. Each chunk reaches
/// every accumulator before the next read.
pub fn consume_reader<R: Read>(
	mut reader: R,
	mut digests: MultiDigest,
	chunk_size: usize,
) -> io::Result<DigestResult> {
	let mut buffer = vec![0u8; chunk_size.max(1)];
	let mut chunks = 0u64;
	let mut total = 0u64;
	loop {
		let n = match reader.read(&mut buffer) {
			Ok(0) => break,
			Ok(n) => n,
			Err(err) if err.kind() == io::ErrorKind::Interrupted => {
				continue
			}
			Err(err) => return Err(err),
		};
		digests.update(&buffer[..n]);
		chunks += 1;
		total += n as u64;
	}
	trace!(chunks, bytes = total, "stream consumed");
	Ok(digests.finalize())
}

pub fn consume_bytes(data: &[u8], mut digests: MultiDigest) -> DigestResult {
	digests.update(data);
	digests.finalize()
}
