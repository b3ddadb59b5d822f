// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustverihash
// File: app.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

use crate::rvh::engine::{Algorithm, EngineError, FileTarget};
use crate::rvh::output;
use clap::{crate_name, Arg, ArgAction, ArgMatches};
use std::error::Error;
use strum::IntoEnumIterator;

const HELP_TEMPLATE: &str = "{before-help}{name} {version}
Written by {author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

fn build_cli() -> clap::Command {
	clap::Command::new(clap::crate_name!())
		.color(clap::ColorChoice::Never)
		.help_template(HELP_TEMPLATE)
		.bin_name(crate_name!())
		.version(clap::crate_version!())
		.author(clap::crate_authors!())
		.about("Compute and verify file checksums")
		.arg_required_else_help(true)
		.arg(
			Arg::new("FILE")
				.help("File to validate")
				.required(true)
				.display_order(1),
		)
		.arg(
			Arg::new("all")
				.long("all")
				.action(ArgAction::SetTrue)
				.help("Compute all supported checksums"),
		)
		.arg(
			Arg::new("md5")
				.long("md5")
				.action(ArgAction::SetTrue)
				.help("Compute the MD5 checksum"),
		)
		.arg(
			Arg::new("sha1")
				.long("sha1")
				.action(ArgAction::SetTrue)
				.help("Compute the SHA1 checksum"),
		)
		.arg(
			Arg::new("sha256")
				.long("sha256")
				.action(ArgAction::SetTrue)
				.help("Compute the SHA256 checksum"),
		)
		.arg(
			Arg::new("sha512")
				.long("sha512")
				.action(ArgAction::SetTrue)
				.help("Compute the SHA512 checksum"),
		)
		.arg(
			Arg::new("verify")
				.long("verify")
				.value_name("HASH")
				.help("Verify the file against an expected checksum"),
		)
		.arg(
			Arg::new("algorithm")
				.short('a')
				.long("algorithm")
				.value_parser(clap::value_parser!(Algorithm))
				.help(
					"Algorithm for --verify (auto-detected from \
					 the hash length if omitted)",
				),
		)
}

/// Digest-selection flags resolved against the canonical order.
/// SHA256 is the default when nothing was selected.
fn selected_algorithms(matches: &ArgMatches) -> Vec<Algorithm> {
	if matches.get_flag("all") {
		return Algorithm::iter().collect();
	}
	let mut selected: Vec<Algorithm> = Algorithm::iter()
		.filter(|algorithm| matches.get_flag(algorithm.name()))
		.collect();
	if selected.is_empty() {
		selected.push(Algorithm::Sha256);
	}
	selected
}

fn execute(matches: &ArgMatches) -> Result<i32, EngineError> {
	let file = match matches.get_one::<String>("FILE") {
		Some(f) => f,
		None => {
			eprintln!("Error: no file provided");
			std::process::exit(1);
		}
	};
	let target = FileTarget::new(file)?;

	if let Some(expected) = matches.get_one::<String>("verify") {
		let algorithm =
			matches.get_one::<Algorithm>("algorithm").copied();
		let outcome = target.verify(expected, algorithm)?;
		for line in
			output::verification_report(target.path(), &outcome)
		{
			println!("{}", line);
		}
		return Ok(if outcome.matched { 0 } else { 1 });
	}

	let entries = if matches.get_flag("all") {
		target.digest_all()?
	} else {
		let mut entries = Vec::new();
		for algorithm in selected_algorithms(matches) {
			entries.push((algorithm, target.digest(algorithm)?));
		}
		entries
	};
	for line in output::digest_report(target.path(), &entries) {
		println!("{}", line);
	}
	Ok(0)
}

fn report_error(err: &EngineError) {
	match err {
		EngineError::Io { .. } => {
			eprintln!("Unexpected error: {}", err)
		}
		_ => eprintln!("Error: {}", err),
	}
}

pub fn run() -> Result<(), Box<dyn Error>> {
	let matches = build_cli().get_matches();
	match execute(&matches) {
		Ok(0) => Ok(()),
		Ok(code) => std::process::exit(code),
		Err(err) => {
			report_error(&err);
			std::process::exit(1);
		}
	}
}

#[test]
fn test_selection_defaults_to_sha256() {
	let matches = build_cli()
		.try_get_matches_from(["rvh", "file.txt"])
		.unwrap();
	assert_eq!(
		selected_algorithms(&matches),
		vec![Algorithm::Sha256]
	);
}

#[test]
fn test_selection_flags_combine_in_canonical_order() {
	let matches = build_cli()
		.try_get_matches_from([
			"rvh", "file.txt", "--sha512", "--md5",
		])
		.unwrap();
	assert_eq!(
		selected_algorithms(&matches),
		vec![Algorithm::Md5, Algorithm::Sha512]
	);
}

#[test]
fn test_selection_all() {
	let matches = build_cli()
		.try_get_matches_from(["rvh", "file.txt", "--all"])
		.unwrap();
	assert_eq!(
		selected_algorithms(&matches),
		vec![
			Algorithm::Md5,
			Algorithm::Sha1,
			Algorithm::Sha256,
			Algorithm::Sha512
		]
	);
}

#[test]
fn test_execute_verify_pass() {
	use std::io::Write;
	use tempfile::NamedTempFile;
	let mut temp_file = NamedTempFile::new().unwrap();
	temp_file.write_all(b"abc").unwrap();
	let matches = build_cli()
		.try_get_matches_from([
			"rvh",
			temp_file.path().to_str().unwrap(),
			"--verify",
			"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
		])
		.unwrap();
	assert_eq!(execute(&matches).unwrap(), 0);
}

#[test]
fn test_execute_verify_mismatch_exits_one() {
	use std::io::Write;
	use tempfile::NamedTempFile;
	let mut temp_file = NamedTempFile::new().unwrap();
	temp_file.write_all(b"abc").unwrap();
	let zeros = "0".repeat(64);
	let matches = build_cli()
		.try_get_matches_from([
			"rvh",
			temp_file.path().to_str().unwrap(),
			"--verify",
			zeros.as_str(),
		])
		.unwrap();
	assert_eq!(execute(&matches).unwrap(), 1);
}

#[test]
fn test_execute_verify_ambiguous_length() {
	use tempfile::NamedTempFile;
	let temp_file = NamedTempFile::new().unwrap();
	let matches = build_cli()
		.try_get_matches_from([
			"rvh",
			temp_file.path().to_str().unwrap(),
			"--verify",
			"abc123",
		])
		.unwrap();
	assert!(matches!(
		execute(&matches),
		Err(EngineError::AmbiguousLength(6))
	));
}

#[test]
fn test_execute_missing_file_is_not_found() {
	let matches = build_cli()
		.try_get_matches_from([
			"rvh",
			"/no/such/path/rustverihash-cli-test",
		])
		.unwrap();
	assert!(matches!(
		execute(&matches),
		Err(EngineError::NotFound(_))
	));
}
