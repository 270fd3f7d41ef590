// src/model/file.rs

//! A file owned by a package

use serde::{Deserialize, Serialize};

use crate::checksum::Checksum;
use crate::classify::FileTag;
use crate::license::LicenseAssertion;
use crate::relationship::{ElementRef, RelationshipSet};

/// One file in a package's manifest
///
/// The name is the path relative to the package root, URI-decoded, with
/// forward-slash separators and no leading separator. It is the file's
/// identity for relationship and exclusion lookups and never changes after
/// construction; renaming would silently detach exclusion-list entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    name: String,
    /// Classifier tags; may be empty for unclassifiable files
    pub tags: Vec<FileTag>,
    /// Content checksum
    pub checksum: Checksum,
    /// Concluded license
    pub concluded_license: LicenseAssertion,
    /// Licenses found in the file
    pub license_info_from_files: Vec<LicenseAssertion>,
    /// Copyright text
    pub copyright_text: String,
    /// Optional free-text comment
    pub comment: Option<String>,
    /// Relationships from this file (e.g. build-tool-of its package)
    pub relationships: RelationshipSet,
}

impl FileEntry {
    /// Create a file entry with the scanner defaults: `NoAssertion`
    /// concluded license and license-info, `"NOASSERTION"` copyright.
    pub fn new(name: impl Into<String>, tags: Vec<FileTag>, checksum: Checksum) -> Self {
        Self {
            name: name.into(),
            tags,
            checksum,
            concluded_license: LicenseAssertion::NoAssertion,
            license_info_from_files: vec![LicenseAssertion::NoAssertion],
            copyright_text: "NOASSERTION".to_string(),
            comment: None,
            relationships: RelationshipSet::new(),
        }
    }

    /// The package-relative name identifying this file
    pub fn name(&self) -> &str {
        &self.name
    }

    /// An element reference to this file
    pub fn element_ref(&self) -> ElementRef {
        ElementRef::file(&self.name)
    }
}
