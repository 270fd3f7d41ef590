// src/checksum.rs

//! Content digests for file identity and the package verification code
//!
//! SPDX packages identify every file by a content checksum, and roll the
//! per-file checksums up into a single package verification code. The
//! rollup convention is SHA-1; SHA-256 is available for codecs that record
//! additional checksum entries.
//!
//! All digest output is lowercase hex.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

/// Hash algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA-1 (160-bit)
    ///
    /// The algorithm the SPDX verification-code convention is defined
    /// against. Default for per-file checksums and the package rollup.
    #[default]
    Sha1,

    /// SHA-256 (256-bit)
    ///
    /// For codecs that emit additional checksum entries per file.
    Sha256,
}

impl HashAlgorithm {
    /// Get the hash output length in bytes
    #[inline]
    pub const fn output_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
        }
    }

    /// Get the hash output length as a hex string
    #[inline]
    pub const fn hex_len(&self) -> usize {
        self.output_len() * 2
    }

    /// Get the algorithm name as a string
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ChecksumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(Self::Sha1),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            _ => Err(ChecksumError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Checksum validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumError {
    /// Unknown hash algorithm name
    UnknownAlgorithm(String),
    /// Checksum string has wrong length for algorithm
    InvalidLength { expected: usize, got: usize },
    /// Checksum string contains invalid hex characters
    InvalidHex(String),
}

impl fmt::Display for ChecksumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAlgorithm(name) => write!(f, "unknown hash algorithm: {}", name),
            Self::InvalidLength { expected, got } => {
                write!(f, "invalid checksum length: expected {}, got {}", expected, got)
            }
            Self::InvalidHex(s) => write!(f, "invalid hex in checksum: {}", s),
        }
    }
}

impl std::error::Error for ChecksumError {}

/// A checksum value with its algorithm
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum {
    /// The algorithm used
    pub algorithm: HashAlgorithm,
    /// The checksum value as a lowercase hex string
    pub value: String,
}

impl Checksum {
    /// Create a new checksum value, validating length and hex content
    pub fn new(
        algorithm: HashAlgorithm,
        value: impl Into<String>,
    ) -> std::result::Result<Self, ChecksumError> {
        let value = value.into();
        let expected_len = algorithm.hex_len();

        if value.len() != expected_len {
            return Err(ChecksumError::InvalidLength {
                expected: expected_len,
                got: value.len(),
            });
        }

        if !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChecksumError::InvalidHex(value));
        }

        Ok(Self {
            algorithm,
            value: value.to_lowercase(),
        })
    }

    /// Create a checksum without validation (internal use)
    fn new_unchecked(algorithm: HashAlgorithm, value: String) -> Self {
        Self { algorithm, value }
    }

    /// Get the checksum value as a hex string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Incremental hasher for any supported algorithm
pub struct Hasher {
    algorithm: HashAlgorithm,
    state: HasherState,
}

enum HasherState {
    Sha1(Sha1),
    Sha256(Sha256),
}

impl Hasher {
    /// Create a new hasher with the specified algorithm
    pub fn new(algorithm: HashAlgorithm) -> Self {
        let state = match algorithm {
            HashAlgorithm::Sha1 => HasherState::Sha1(Sha1::new()),
            HashAlgorithm::Sha256 => HasherState::Sha256(Sha256::new()),
        };
        Self { algorithm, state }
    }

    /// Update the hasher with more data
    pub fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            HasherState::Sha1(hasher) => hasher.update(data),
            HasherState::Sha256(hasher) => hasher.update(data),
        }
    }

    /// Finalize and return the checksum
    pub fn finalize(self) -> Checksum {
        let value = match self.state {
            HasherState::Sha1(hasher) => hex::encode(hasher.finalize()),
            HasherState::Sha256(hasher) => hex::encode(hasher.finalize()),
        };
        Checksum::new_unchecked(self.algorithm, value)
    }

    /// Get the algorithm being used
    #[inline]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

/// Compute the checksum of a byte slice
pub fn digest_bytes(algorithm: HashAlgorithm, data: &[u8]) -> Checksum {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(data);
    hasher.finalize()
}

/// Compute the checksum of data from a reader
///
/// Streams the input; never buffers the whole content in memory.
pub fn digest_reader<R: Read>(algorithm: HashAlgorithm, reader: &mut R) -> io::Result<Checksum> {
    let mut hasher = Hasher::new(algorithm);
    let mut buffer = [0u8; 8192];

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hasher.finalize())
}

/// Compute the checksum of a file's content
///
/// An I/O failure aborts this one operation; callers in batch walks
/// decide whether to skip the file or propagate.
pub fn digest_file(algorithm: HashAlgorithm, path: &Path) -> Result<Checksum> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    digest_reader(algorithm, &mut file).map_err(|e| Error::io(path, e))
}

/// Compute a SHA-1 hex digest (convenience for the verification-code rollup)
#[inline]
pub fn sha1_hex(data: &[u8]) -> String {
    digest_bytes(HashAlgorithm::Sha1, data).value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_hash() {
        // The fixed vector every SPDX file checksum test builds on
        let hash = digest_bytes(HashAlgorithm::Sha1, b"123456");

        assert_eq!(hash.algorithm, HashAlgorithm::Sha1);
        assert_eq!(hash.value, "7c4a8d09ca3762af61e59520943dc26494f8941b");
        assert_eq!(hash.value.len(), 40);
    }

    #[test]
    fn test_sha256_hash() {
        let hash = digest_bytes(HashAlgorithm::Sha256, b"hello world");

        assert_eq!(hash.algorithm, HashAlgorithm::Sha256);
        assert_eq!(
            hash.value,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_digest_is_deterministic() {
        let a = digest_bytes(HashAlgorithm::Sha1, b"some content");
        let b = digest_bytes(HashAlgorithm::Sha1, b"some content");
        assert_eq!(a, b);

        // A single changed byte changes the digest
        let c = digest_bytes(HashAlgorithm::Sha1, b"some Content");
        assert_ne!(a, c);
    }

    #[test]
    fn test_hasher_incremental() {
        let full = digest_bytes(HashAlgorithm::Sha1, b"Hello, World!");

        let mut hasher = Hasher::new(HashAlgorithm::Sha1);
        hasher.update(b"Hello, ");
        hasher.update(b"World!");
        let incremental = hasher.finalize();

        assert_eq!(full, incremental);
    }

    #[test]
    fn test_digest_reader() {
        let data = b"Hello, World!";
        let mut cursor = std::io::Cursor::new(data);

        let streamed = digest_reader(HashAlgorithm::Sha1, &mut cursor).unwrap();
        let direct = digest_bytes(HashAlgorithm::Sha1, data);

        assert_eq!(streamed, direct);
    }

    #[test]
    fn test_digest_file_missing() {
        let err = digest_file(HashAlgorithm::Sha1, Path::new("/nonexistent/file.dat"));
        assert!(matches!(err, Err(Error::Io { .. })));
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!("sha1".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha1);
        assert_eq!("SHA-1".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha1);
        assert_eq!("sha256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert!("md5".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn test_checksum_validation() {
        let ok = Checksum::new(HashAlgorithm::Sha1, "7c4a8d09ca3762af61e59520943dc26494f8941b");
        assert!(ok.is_ok());

        let short = Checksum::new(HashAlgorithm::Sha1, "abc123");
        assert!(matches!(short, Err(ChecksumError::InvalidLength { .. })));

        let bad_hex = Checksum::new(HashAlgorithm::Sha1, "zc4a8d09ca3762af61e59520943dc26494f8941b");
        assert!(matches!(bad_hex, Err(ChecksumError::InvalidHex(_))));
    }

    #[test]
    fn test_checksum_lowercases() {
        let hash = Checksum::new(HashAlgorithm::Sha1, "7C4A8D09CA3762AF61E59520943DC26494F8941B").unwrap();
        assert_eq!(hash.as_str(), "7c4a8d09ca3762af61e59520943dc26494f8941b");
    }

    #[test]
    fn test_default_algorithm() {
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Sha1);
    }
}
