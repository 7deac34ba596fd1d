// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashtoken
// File: app.rs
// Author: hashtoken maintainers

use crate::htk::digest::{
	available_algorithms, catalogue, resolve_names, Algorithm,
	DigestRequest, DigestResult,
};
use crate::htk::output::{render_digests, DigestOutputFormat};
use crate::htk::report::DigestReport;
use crate::htk::token::{
	TokenGenerator, TokenKind, TokenRequest, TokenSource,
	DEFAULT_TOKEN_LENGTH, MAX_TOKEN_LENGTH, MIN_TOKEN_LENGTH,
};
use clap::{crate_name, Arg, ArgAction, ArgMatches};
use clap_complete::{generate, Generator, Shell};
use colored::*;
use dialoguer::{Confirm, Input, Select};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const HELP_TEMPLATE: &str = "{before-help}{name} {version}
{about-with-newline}
Primary command families:
  htk digest <FILE>   Hash one file with every supported algorithm (e.g. htk digest -a sha256 notes.txt)
  htk token           Generate a secure random token (e.g. htk token -k hex -l 40)
{usage-heading} {usage}

{all-args}{after-help}
";

pub fn build_cli() -> clap::Command {
	clap::Command::new(crate_name!())
		.bin_name("htk")
		.version(clap::crate_version!())
		.about(clap::crate_description!())
		.help_template(HELP_TEMPLATE)
		.subcommand_required(true)
		.arg_required_else_help(true)
		.arg(
			Arg::new("verbose")
				.short('v')
				.long("verbose")
				.global(true)
				.action(ArgAction::Count)
				.help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
		)
		.subcommand(
			clap::command!("digest")
				.about("Compute every supported digest of a file in one pass")
				.display_order(1)
				.arg(
					Arg::new("FILE")
						.help("File to hash")
						.required(true)
						.value_parser(clap::value_parser!(PathBuf)),
				)
				.arg(
					Arg::new("algorithm")
						.short('a')
						.long("algorithm")
						.action(ArgAction::Append)
						.help("Restrict to these algorithms (repeatable, default: all)"),
				)
				.arg(
					Arg::new("format")
						.short('f')
						.long("format")
						.value_parser(clap::value_parser!(
							DigestOutputFormat
						))
						.default_value("table")
						.help("Output format"),
				)
				.arg(
					Arg::new("export")
						.short('e')
						.long("export")
						.value_parser(clap::value_parser!(PathBuf))
						.help("Also write a text report to this path"),
				),
		)
		.subcommand(
			clap::command!("token")
				.about("Generate a secure random token")
				.display_order(2)
				.arg(
					Arg::new("kind")
						.short('k')
						.long("kind")
						.env("HTK_TOKEN_KIND")
						.value_parser(clap::value_parser!(TokenKind))
						.default_value("alphanumeric"),
				)
				.arg(
					Arg::new("length")
						.short('l')
						.long("length")
						.env("HTK_TOKEN_LENGTH")
						.value_parser(clap::value_parser!(usize))
						.default_value("32")
						.help("Token length (8..=128)"),
				)
				.arg(
					Arg::new("rng")
						.short('r')
						.long("rng")
						.env("HTK_TOKEN_SOURCE")
						.value_parser(clap::value_parser!(TokenSource))
						.default_value("os")
						.help("Secure random generator"),
				)
				.arg(
					Arg::new("count")
						.short('n')
						.long("count")
						.value_parser(
							clap::value_parser!(u32).range(1..),
						)
						.default_value("1")
						.help("Number of tokens to print"),
				),
		)
		.subcommand(
			clap::command!("algorithms")
				.about("List digest algorithms and whether they are available")
				.display_order(3),
		)
		.subcommand(
			clap::command!("interactive")
				.about("Menu driven mode")
				.display_order(4),
		)
		.subcommand(
			clap::command!("generate-auto-completions")
				.about("Generate shell completions")
				.display_order(5)
				.arg(
					Arg::new("SHELL")
						.required(true)
						.value_parser(clap::value_parser!(Shell)),
				),
		)
}

fn init_tracing(verbosity: u8) {
	let fallback = match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(fallback));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.without_time()
		.try_init();
}

fn selected_algorithms(matches: &ArgMatches) -> Vec<Algorithm> {
	match matches.get_many::<String>("algorithm") {
		Some(names) => {
			let names: Vec<&String> = names.collect();
			resolve_names(&names)
		}
		None => catalogue().collect(),
	}
}

fn handle_digest_command(
	matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
	let path = matches
		.get_one::<PathBuf>("FILE")
		.ok_or("no file provided")?;
	let format = matches
		.get_one::<DigestOutputFormat>("format")
		.copied()
		.unwrap_or(DigestOutputFormat::Table);
	let algorithms = selected_algorithms(matches);
	if algorithms.is_empty() {
		warn!("no known algorithm requested, output will be empty");
	}
	let result =
		DigestRequest::new(path).with_algorithms(&algorithms).run()?;
	println!("{}", render_digests(path, &result, format));
	if let Some(destination) = matches.get_one::<PathBuf>("export") {
		DigestReport::new(path, &result).write_to(destination)?;
	}
	Ok(())
}

fn handle_token_command(
	matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
	let kind = matches
		.get_one::<TokenKind>("kind")
		.copied()
		.unwrap_or(TokenKind::Alphanumeric);
	let length = matches
		.get_one::<usize>("length")
		.copied()
		.unwrap_or(DEFAULT_TOKEN_LENGTH);
	let source = matches
		.get_one::<TokenSource>("rng")
		.copied()
		.unwrap_or_default();
	let count = matches.get_one::<u32>("count").copied().unwrap_or(1);
	let generator = TokenGenerator::new(source);
	let request = TokenRequest::new(kind, length);
	for _ in 0..count {
		println!("{}", generator.generate(request)?);
	}
	Ok(())
}

fn list_algorithms() {
	let available = available_algorithms();
	for algorithm in catalogue() {
		let status = if available.contains(&algorithm) {
			"available".green()
		} else {
			"unavailable (not compiled in)".yellow()
		};
		println!(
			"{:<10} {:>3} bits  {}",
			algorithm.canonical_name(),
			algorithm.output_size() * 8,
			status
		);
	}
}

/// Runs the digest on a worker thread and waits for its completion
/// message, leaving the prompting thread free.
fn digest_in_background(
	path: PathBuf,
) -> Result<DigestResult, Box<dyn Error>> {
	let (tx, rx) = mpsc::channel();
	let worker = thread::spawn(move || {
		let result = DigestRequest::new(path).run();
		let _ = tx.send(result);
	});
	let result = rx.recv()?;
	if worker.join().is_err() {
		return Err("digest worker panicked".into());
	}
	Ok(result?)
}

fn interactive_digest() -> Result<(), Box<dyn Error>> {
	let raw = Input::<String>::new()
		.with_prompt("Enter the path of the file to hash")
		.interact_text()?;
	let path = PathBuf::from(raw.trim());
	println!("{}", format!("Hashing {} ...", path.display()).dimmed());
	let result = match digest_in_background(path.clone()) {
		Ok(result) => result,
		Err(e) => {
			println!(
				"{}",
				format!("Failed to load file: {}", e).red()
			);
			return Ok(());
		}
	};
	println!(
		"{}",
		render_digests(&path, &result, DigestOutputFormat::Table)
	);
	if Confirm::new()
		.with_prompt("Export the digests to a text file?")
		.default(false)
		.interact()?
	{
		interactive_export(&path, &result)?;
	}
	Ok(())
}

fn interactive_export(
	source: &Path,
	result: &DigestResult,
) -> Result<(), Box<dyn Error>> {
	let destination = Input::<String>::new()
		.with_prompt("Export to")
		.default("digests.txt".to_string())
		.interact_text()?;
	match DigestReport::new(source, result)
		.write_to(Path::new(destination.trim()))
	{
		Ok(()) => println!("{}", "Export was successful!".green()),
		Err(e) => {
			println!("{}", format!("Export failed: {}", e).red())
		}
	}
	Ok(())
}

fn interactive_token() -> Result<(), Box<dyn Error>> {
	let kinds: Vec<TokenKind> = TokenKind::iter().collect();
	let selection = Select::new()
		.with_prompt("Select a token type")
		.items(&kinds)
		.default(0)
		.interact()?;
	let length = Input::<usize>::new()
		.with_prompt(format!(
			"Token length ({}..={})",
			MIN_TOKEN_LENGTH, MAX_TOKEN_LENGTH
		))
		.default(DEFAULT_TOKEN_LENGTH)
		.validate_with(|value: &usize| {
			if (MIN_TOKEN_LENGTH..=MAX_TOKEN_LENGTH).contains(value) {
				Ok(())
			} else {
				Err("length out of range")
			}
		})
		.interact_text()?;
	let token = TokenGenerator::default()
		.generate(TokenRequest::new(kinds[selection], length))?;
	println!("{}", token);
	Ok(())
}

fn run_interactive_mode() -> Result<(), Box<dyn Error>> {
	let items = ["Hash a file", "Generate a token", "Exit"];
	loop {
		let selection = Select::new()
			.with_prompt("What do you want to do?")
			.items(&items)
			.default(0)
			.interact()?;
		match selection {
			0 => interactive_digest()?,
			1 => interactive_token()?,
			_ => break,
		}
	}
	Ok(())
}

fn print_completions<G: Generator>(gen: G, cmd: &mut clap::Command) {
	generate(
		gen,
		cmd,
		cmd.get_name().to_string(),
		&mut std::io::stdout(),
	);
}

pub fn run() -> Result<(), Box<dyn Error>> {
	let matches = build_cli().get_matches();
	init_tracing(matches.get_count("verbose"));

	match matches.subcommand() {
		Some(("digest", s)) => handle_digest_command(s)?,
		Some(("token", s)) => handle_token_command(s)?,
		Some(("algorithms", _)) => list_algorithms(),
		Some(("interactive", _)) => run_interactive_mode()?,
		Some(("generate-auto-completions", s)) => {
			if let Some(shell) = s.get_one::<Shell>("SHELL") {
				let mut cmd = build_cli();
				print_completions(*shell, &mut cmd);
			}
		}
		Some((other, _)) => {
			debug!(subcommand = other, "unhandled subcommand");
		}
		None => {}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cli_definition_is_consistent() {
		build_cli().debug_assert();
	}

	#[test]
	fn token_defaults_apply() {
		let matches = build_cli()
			.try_get_matches_from(["htk", "token"])
			.unwrap();
		let (_, token) = matches.subcommand().unwrap();
		assert_eq!(
			token.get_one::<TokenKind>("kind"),
			Some(&TokenKind::Alphanumeric)
		);
		assert_eq!(
			token.get_one::<usize>("length"),
			Some(&DEFAULT_TOKEN_LENGTH)
		);
		assert_eq!(
			token.get_one::<TokenSource>("rng"),
			Some(&TokenSource::OsRng)
		);
	}

	#[test]
	fn repeated_algorithms_are_collected() {
		let matches = build_cli()
			.try_get_matches_from([
				"htk", "digest", "-a", "sha256", "-a", "md5", "file.bin",
			])
			.unwrap();
		let (_, digest) = matches.subcommand().unwrap();
		assert_eq!(
			selected_algorithms(digest),
			[Algorithm::Sha256, Algorithm::Md5]
		);
	}

	#[test]
	fn digest_without_algorithms_selects_catalogue() {
		let matches = build_cli()
			.try_get_matches_from(["htk", "digest", "file.bin"])
			.unwrap();
		let (_, digest) = matches.subcommand().unwrap();
		assert_eq!(selected_algorithms(digest).len(), catalogue().count());
	}
}
