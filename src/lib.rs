// src/lib.rs

//! SbomEdit document model
//!
//! Editing core for SPDX software bill-of-materials documents: package
//! manifests scanned from directory trees, file classification and
//! checksumming, tamper-evident package verification codes, typed
//! relationships between document elements, and license assertions.
//!
//! # Architecture
//!
//! - Leaves first: `classify` and `checksum` are pure; `manifest` walks a
//!   tree with both; `verification` rolls a manifest up into one digest
//! - `relationship` and `license` are independent of the scanning stack
//!   but mutate the same document/package/file entities
//! - `model` owns the graph and is the only mutation path for file sets
//!   and verification codes; everything is serde-exposed for codecs
//! - Single-writer, synchronous: no operation here blocks except file I/O

pub mod checksum;
pub mod classify;
mod error;
pub mod license;
pub mod manifest;
pub mod model;
pub mod relationship;
pub mod verification;

pub use checksum::{digest_bytes, digest_file, digest_reader, Checksum, ChecksumError, HashAlgorithm, Hasher};
pub use classify::{FileClassifier, FileTag};
pub use error::{Error, Result};
pub use license::{
    ExtractedLicense, ExtractedLicenseRegistry, LicenseAssertion, LicenseCatalog, ListedLicense,
    StandardLicenseCatalog,
};
pub use manifest::{add_file_to_package, ManifestBuilder};
pub use model::{
    CreationInfo, Document, ExternalRef, FileEntry, Package, ReferenceCategory, VerificationCode,
    SPEC_VERSION, TOOL_CREATOR,
};
pub use relationship::{ElementRef, Relationship, RelationshipSet, RelationshipType};
pub use verification::{
    compute_verification_code, exclude_file_from_verification, is_file_excluded,
    recompute_verification_code, remove_files_from_package, unexclude_file_from_verification,
};
