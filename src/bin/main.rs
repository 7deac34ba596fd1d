// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashtoken
// File: main.rs
// Author: hashtoken maintainers

use hashtoken::htk::app;
use std::process::ExitCode;

fn main() -> ExitCode {
	match app::run() {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("error: {}", e);
			ExitCode::FAILURE
		}
	}
}
