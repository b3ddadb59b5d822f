use hex_literal::hex;
use rustverihash::rvh::engine::{
	Algorithm, EngineError, FileTarget,
};
use std::io::Write;
use strum::IntoEnumIterator;
use tempfile::NamedTempFile;

const PHRASE: &str =
	"Jeder wackere Bayer vertilgt bequem zwo Pfund Kalbshaxen.";

fn target_with(content: &[u8]) -> (NamedTempFile, FileTarget) {
	let mut temp_file = NamedTempFile::new().unwrap();
	temp_file.write_all(content).unwrap();
	let target = FileTarget::new(temp_file.path()).unwrap();
	(temp_file, target)
}

#[test]
fn digest_is_deterministic() {
	let (_guard, target) = target_with(PHRASE.as_bytes());
	for algorithm in Algorithm::iter() {
		let first = target.digest(algorithm).unwrap();
		let second = target.digest(algorithm).unwrap();
		assert_eq!(first, second);
		assert_eq!(first.len(), algorithm.hex_len());
	}
}

#[test]
fn digest_abc_sha256_vector() {
	let (_guard, target) = target_with(b"abc");
	let digest = target.digest(Algorithm::Sha256).unwrap();
	assert_eq!(
		hex::decode(&digest).unwrap(),
		hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
	);
}

#[test]
fn verify_round_trip() {
	let (_guard, target) = target_with(PHRASE.as_bytes());
	for algorithm in Algorithm::iter() {
		let digest = target.digest(algorithm).unwrap();
		let outcome =
			target.verify(&digest, Some(algorithm)).unwrap();
		assert!(outcome.matched);
		assert_eq!(outcome.algorithm, algorithm);
		assert!(!outcome.auto_detected);
		assert!(outcome.computed.is_none());
	}
}

#[test]
fn verify_is_case_insensitive() {
	let (_guard, target) = target_with(b"case matters not");
	let digest = target.digest(Algorithm::Sha1).unwrap();
	let upper = target
		.verify(&digest.to_uppercase(), Some(Algorithm::Sha1))
		.unwrap();
	assert!(upper.matched);
	let lower = target
		.verify(&digest.to_lowercase(), Some(Algorithm::Sha1))
		.unwrap();
	assert!(lower.matched);
}

#[test]
fn verify_auto_detects_from_length() {
	let (_guard, target) = target_with(PHRASE.as_bytes());
	for algorithm in Algorithm::iter() {
		let digest = target.digest(algorithm).unwrap();
		let outcome = target.verify(&digest, None).unwrap();
		assert!(outcome.matched);
		assert_eq!(outcome.algorithm, algorithm);
		assert!(outcome.auto_detected);
	}
}

#[test]
fn verify_mismatch_materializes_computed_digest() {
	let (_guard, target) = target_with(b"abc");
	let outcome =
		target.verify(&"0".repeat(64), None).unwrap();
	assert!(!outcome.matched);
	assert_eq!(outcome.algorithm, Algorithm::Sha256);
	assert_eq!(outcome.expected, "0".repeat(64));
	assert_eq!(
		outcome.computed.as_deref(),
		Some(
			"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
		)
	);
}

#[test]
fn verify_propagates_ambiguous_length() {
	let (_guard, target) = target_with(b"abc");
	let result = target.verify("abc123", None);
	assert!(matches!(
		result,
		Err(EngineError::AmbiguousLength(6))
	));
}

#[test]
fn digest_all_matches_individual_digests() {
	let (_guard, target) = target_with(PHRASE.as_bytes());
	let all = target.digest_all().unwrap();
	let expected_order: Vec<Algorithm> =
		Algorithm::iter().collect();
	assert_eq!(
		all.iter().map(|(a, _)| *a).collect::<Vec<_>>(),
		expected_order
	);
	for (algorithm, digest) in &all {
		assert_eq!(digest, &target.digest(*algorithm).unwrap());
	}
}

#[test]
fn digest_is_byte_exact_across_line_endings() {
	// Same text with different line endings must hash differently;
	// the engine reads raw bytes without any text decoding.
	let (_guard_a, unix) = target_with(b"line one\nline two\n");
	let (_guard_b, dos) =
		target_with(b"line one\r\nline two\r\n");
	assert_ne!(
		unix.digest(Algorithm::Sha256).unwrap(),
		dos.digest(Algorithm::Sha256).unwrap()
	);
}

#[test]
fn large_input_spans_multiple_chunks() {
	// 100 KiB forces several 8 KiB reads through the hasher.
	let content = vec![0xabu8; 100 * 1024];
	let (_guard, target) = target_with(&content);
	let digest = target.digest(Algorithm::Sha512).unwrap();
	assert_eq!(digest.len(), 128);
	assert_eq!(digest, target.digest(Algorithm::Sha512).unwrap());
}
