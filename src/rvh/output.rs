// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustverihash
// Module: output
// Purpose: Render digest and verification reports as printable lines.

use crate::rvh::engine::{Algorithm, Verification};
use colored::*;
use std::path::Path;

/// Compute-mode report: one header line naming the file, then one
/// `LABEL: hexdigest` line per requested algorithm.
pub fn digest_report(
	path: &Path,
	entries: &[(Algorithm, String)],
) -> Vec<String> {
	let mut lines = vec![format!("File: {}", path.display())];
	for (algorithm, digest) in entries {
		lines.push(format!("{}: {}", algorithm.label(), digest));
	}
	lines
}

/// Verification-mode report. The algorithm line renders the literal
/// `auto-detected` when the caller did not name one explicitly.
pub fn verification_report(
	path: &Path,
	outcome: &Verification,
) -> Vec<String> {
	let mut lines = Vec::new();
	if outcome.matched {
		lines.push(format!(
			"{} Hash verification PASSED",
			"\u{2713}".green()
		));
		lines.push(format!("  File: {}", path.display()));
		let algorithm = if outcome.auto_detected {
			"auto-detected"
		} else {
			outcome.algorithm.name()
		};
		lines.push(format!("  Algorithm: {}", algorithm));
	} else {
		lines.push(format!(
			"{} Hash verification FAILED",
			"\u{2717}".red()
		));
		lines.push(format!("  File: {}", path.display()));
		lines.push(format!("  Expected: {}", outcome.expected));
		if let Some(computed) = &outcome.computed {
			lines.push(format!("  Calculated: {}", computed));
		}
	}
	lines
}

#[test]
fn test_digest_report_lines() {
	let entries = vec![
		(Algorithm::Md5, "d41d8cd98f00b204e9800998ecf8427e".to_string()),
		(
			Algorithm::Sha256,
			"e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
				.to_string(),
		),
	];
	let lines = digest_report(Path::new("data.bin"), &entries);
	assert_eq!(lines.len(), 3);
	assert_eq!(lines[0], "File: data.bin");
	assert_eq!(
		lines[1],
		"MD5: d41d8cd98f00b204e9800998ecf8427e"
	);
	assert!(lines[2].starts_with("SHA256: e3b0c442"));
}

#[test]
fn test_verification_report_pass_auto_detected() {
	let outcome = Verification {
		matched: true,
		algorithm: Algorithm::Sha256,
		auto_detected: true,
		expected: "0".repeat(64),
		computed: None,
	};
	let lines =
		verification_report(Path::new("data.bin"), &outcome);
	assert_eq!(lines.len(), 3);
	assert!(lines[0].contains("Hash verification PASSED"));
	assert_eq!(lines[1], "  File: data.bin");
	assert_eq!(lines[2], "  Algorithm: auto-detected");
}

#[test]
fn test_verification_report_pass_explicit() {
	let outcome = Verification {
		matched: true,
		algorithm: Algorithm::Sha1,
		auto_detected: false,
		expected: "0".repeat(40),
		computed: None,
	};
	let lines =
		verification_report(Path::new("data.bin"), &outcome);
	assert_eq!(lines[2], "  Algorithm: sha1");
}

#[test]
fn test_verification_report_fail() {
	let outcome = Verification {
		matched: false,
		algorithm: Algorithm::Md5,
		auto_detected: true,
		expected: "0".repeat(32),
		computed: Some(
			"d41d8cd98f00b204e9800998ecf8427e".to_string(),
		),
	};
	let lines =
		verification_report(Path::new("data.bin"), &outcome);
	assert_eq!(lines.len(), 4);
	assert!(lines[0].contains("Hash verification FAILED"));
	assert_eq!(lines[2], format!("  Expected: {}", "0".repeat(32)));
	assert_eq!(
		lines[3],
		"  Calculated: d41d8cd98f00b204e9800998ecf8427e"
	);
}
