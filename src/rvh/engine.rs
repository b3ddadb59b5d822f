// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustverihash
// File: engine.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

use digest::{Digest, DynDigest};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use strum::EnumIter;

/// Chunk size for buffered file reads. Affects I/O efficiency only.
pub const READ_CHUNK_SIZE: usize = 8192;

/// The closed set of supported digest algorithms, in canonical
/// output order.
#[derive(
	clap::ValueEnum, Copy, Clone, Debug, Eq, PartialEq, EnumIter,
)]
pub enum Algorithm {
	Md5,
	Sha1,
	Sha256,
	Sha512,
}

impl Algorithm {
	pub fn name(self) -> &'static str {
		match self {
			Algorithm::Md5 => "md5",
			Algorithm::Sha1 => "sha1",
			Algorithm::Sha256 => "sha256",
			Algorithm::Sha512 => "sha512",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Algorithm::Md5 => "MD5",
			Algorithm::Sha1 => "SHA1",
			Algorithm::Sha256 => "SHA256",
			Algorithm::Sha512 => "SHA512",
		}
	}

	/// Length of the lowercase hex encoding of this algorithm's digest.
	pub fn hex_len(self) -> usize {
		match self {
			Algorithm::Md5 => 32,
			Algorithm::Sha1 => 40,
			Algorithm::Sha256 => 64,
			Algorithm::Sha512 => 128,
		}
	}

	/// Parse a textual algorithm name. Names are parsed at this
	/// boundary only; everything past it carries the enum.
	pub fn from_name(name: &str) -> Result<Self, EngineError> {
		match name {
			"md5" => Ok(Algorithm::Md5),
			"sha1" => Ok(Algorithm::Sha1),
			"sha256" => Ok(Algorithm::Sha256),
			"sha512" => Ok(Algorithm::Sha512),
			_ => Err(EngineError::UnsupportedAlgorithm(
				name.to_string(),
			)),
		}
	}

	/// Detect the algorithm that produced a digest string, going by
	/// string length alone. The characters are deliberately not
	/// validated as hex; length is the sole signal. A future
	/// algorithm sharing a length with one of these four would be
	/// ambiguous, which is accepted as a documented limitation.
	pub fn from_digest_len(len: usize) -> Result<Self, EngineError> {
		match len {
			32 => Ok(Algorithm::Md5),
			40 => Ok(Algorithm::Sha1),
			64 => Ok(Algorithm::Sha256),
			128 => Ok(Algorithm::Sha512),
			_ => Err(EngineError::AmbiguousLength(len)),
		}
	}

	fn hasher(self) -> Box<dyn DynDigest> {
		match self {
			Algorithm::Md5 => Box::new(md5::Md5::new()),
			Algorithm::Sha1 => Box::new(sha1::Sha1::new()),
			Algorithm::Sha256 => Box::new(sha2::Sha256::new()),
			Algorithm::Sha512 => Box::new(sha2::Sha512::new()),
		}
	}
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name())
	}
}

#[derive(Debug)]
pub enum EngineError {
	NotFound(PathBuf),
	UnsupportedAlgorithm(String),
	AmbiguousLength(usize),
	Io {
		source: std::io::Error,
		path: PathBuf,
	},
}

impl fmt::Display for EngineError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EngineError::NotFound(path) => {
				write!(f, "File not found: {}", path.display())
			}
			EngineError::UnsupportedAlgorithm(name) => {
				write!(f, "Unsupported algorithm: {}", name)
			}
			EngineError::AmbiguousLength(len) => {
				write!(
					f,
					"Cannot detect algorithm from hash length: {}",
					len
				)
			}
			EngineError::Io { source, path } => {
				write!(
					f,
					"IO error reading {}: {}",
					path.display(),
					source
				)
			}
		}
	}
}

impl std::error::Error for EngineError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			EngineError::Io { source, .. } => Some(source),
			_ => None,
		}
	}
}

/// Immutable reference to the single file a run operates on.
/// Construction checks existence; permission and read errors
/// surface later, at read time.
pub struct FileTarget {
	path: PathBuf,
}

impl FileTarget {
	pub fn new(path: impl Into<PathBuf>) -> Result<Self, EngineError> {
		let path = path.into();
		if !path.exists() {
			return Err(EngineError::NotFound(path));
		}
		Ok(Self { path })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Stream the file through the selected digest in fixed-size
	/// chunks and return the lowercase hex encoding. The file is
	/// treated as a raw byte stream; no text decoding takes place.
	pub fn digest(
		&self,
		algorithm: Algorithm,
	) -> Result<String, EngineError> {
		let mut file =
			File::open(&self.path).map_err(|source| {
				EngineError::Io {
					source,
					path: self.path.clone(),
				}
			})?;
		let mut hasher = algorithm.hasher();
		let mut buffer = [0u8; READ_CHUNK_SIZE];
		loop {
			let count =
				file.read(&mut buffer).map_err(|source| {
					EngineError::Io {
						source,
						path: self.path.clone(),
					}
				})?;
			if count == 0 {
				break;
			}
			hasher.update(&buffer[..count]);
		}
		Ok(hex::encode(hasher.finalize()))
	}

	/// Compute every supported digest, in canonical order. Each
	/// algorithm performs its own independent full-file read.
	pub fn digest_all(
		&self,
	) -> Result<Vec<(Algorithm, String)>, EngineError> {
		use strum::IntoEnumIterator;
		let mut results = Vec::new();
		for algorithm in Algorithm::iter() {
			results.push((algorithm, self.digest(algorithm)?));
		}
		Ok(results)
	}

	/// Compare an expected digest string against a freshly computed
	/// one, case-insensitively. When no algorithm is given it is
	/// detected from the expected string's length.
	pub fn verify(
		&self,
		expected: &str,
		algorithm: Option<Algorithm>,
	) -> Result<Verification, EngineError> {
		let auto_detected = algorithm.is_none();
		let algorithm = match algorithm {
			Some(algorithm) => algorithm,
			None => Algorithm::from_digest_len(expected.len())?,
		};
		let computed = self.digest(algorithm)?;
		let matched = computed.eq_ignore_ascii_case(expected);
		Ok(Verification {
			matched,
			algorithm,
			auto_detected,
			expected: expected.to_string(),
			computed: if matched { None } else { Some(computed) },
		})
	}
}

/// Outcome of one verification. The computed digest is only
/// materialized on a mismatch, for diagnostic output.
#[derive(Clone, Debug)]
pub struct Verification {
	pub matched: bool,
	pub algorithm: Algorithm,
	pub auto_detected: bool,
	pub expected: String,
	pub computed: Option<String>,
}

#[test]
fn test_digest_empty_file() {
	use tempfile::NamedTempFile;
	let temp_file = NamedTempFile::new().unwrap();
	let target = FileTarget::new(temp_file.path()).unwrap();
	assert_eq!(
		target.digest(Algorithm::Md5).unwrap(),
		"d41d8cd98f00b204e9800998ecf8427e"
	);
	assert_eq!(
		target.digest(Algorithm::Sha1).unwrap(),
		"da39a3ee5e6b4b0d3255bfef95601890afd80709"
	);
	assert_eq!(
		target.digest(Algorithm::Sha256).unwrap(),
		"e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
	);
	assert_eq!(
		target.digest(Algorithm::Sha512).unwrap(),
		"cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
	);
}

#[test]
fn test_digest_abc_vectors() {
	use std::io::Write;
	use tempfile::NamedTempFile;
	let mut temp_file = NamedTempFile::new().unwrap();
	temp_file.write_all(b"abc").unwrap();
	let target = FileTarget::new(temp_file.path()).unwrap();
	assert_eq!(
		target.digest(Algorithm::Md5).unwrap(),
		"900150983cd24fb0d6963f7d28e17f72"
	);
	assert_eq!(
		target.digest(Algorithm::Sha1).unwrap(),
		"a9993e364706816aba3e25717850c26c9cd0d89d"
	);
	assert_eq!(
		target.digest(Algorithm::Sha256).unwrap(),
		"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
	);
	assert_eq!(
		target.digest(Algorithm::Sha512).unwrap(),
		"ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
	);
}

#[test]
fn test_digest_length_matches_algorithm() {
	use std::io::Write;
	use strum::IntoEnumIterator;
	use tempfile::NamedTempFile;
	let mut temp_file = NamedTempFile::new().unwrap();
	temp_file.write_all(b"some test content").unwrap();
	let target = FileTarget::new(temp_file.path()).unwrap();
	for algorithm in Algorithm::iter() {
		let digest = target.digest(algorithm).unwrap();
		assert_eq!(digest.len(), algorithm.hex_len());
		assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
	}
}

#[test]
fn test_from_name() {
	assert_eq!(Algorithm::from_name("md5").unwrap(), Algorithm::Md5);
	assert_eq!(
		Algorithm::from_name("sha1").unwrap(),
		Algorithm::Sha1
	);
	assert_eq!(
		Algorithm::from_name("sha256").unwrap(),
		Algorithm::Sha256
	);
	assert_eq!(
		Algorithm::from_name("sha512").unwrap(),
		Algorithm::Sha512
	);
	assert!(matches!(
		Algorithm::from_name("whirlpool"),
		Err(EngineError::UnsupportedAlgorithm(_))
	));
	assert!(matches!(
		Algorithm::from_name("SHA256"),
		Err(EngineError::UnsupportedAlgorithm(_))
	));
}

#[test]
fn test_from_digest_len() {
	assert_eq!(
		Algorithm::from_digest_len(32).unwrap(),
		Algorithm::Md5
	);
	assert_eq!(
		Algorithm::from_digest_len(40).unwrap(),
		Algorithm::Sha1
	);
	assert_eq!(
		Algorithm::from_digest_len(64).unwrap(),
		Algorithm::Sha256
	);
	assert_eq!(
		Algorithm::from_digest_len(128).unwrap(),
		Algorithm::Sha512
	);
	for len in [0, 6, 10, 33, 100] {
		assert!(matches!(
			Algorithm::from_digest_len(len),
			Err(EngineError::AmbiguousLength(l)) if l == len
		));
	}
}

#[test]
fn test_construct_nonexistent_path() {
	let result =
		FileTarget::new("/no/such/path/rustverihash-test-file");
	assert!(matches!(result, Err(EngineError::NotFound(_))));
}
