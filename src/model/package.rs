// src/model/package.rs

//! Packages, their file manifests, and verification codes

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::license::LicenseAssertion;
use crate::model::file::FileEntry;
use crate::relationship::{ElementRef, Relationship, RelationshipSet, RelationshipType};

/// The digest summarizing a package's non-excluded file set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    value: String,
    /// File names omitted from the rollup, in exclusion order
    excluded_file_names: Vec<String>,
}

impl VerificationCode {
    /// The digest value (lowercase SHA-1 hex)
    pub fn value(&self) -> &str {
        &self.value
    }

    /// File names omitted from the rollup
    pub fn excluded_file_names(&self) -> &[String] {
        &self.excluded_file_names
    }

    /// Whether a file name is excluded
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.excluded_file_names.iter().any(|n| n == file_name)
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.value = value;
    }

    /// Add a name to the exclusion list if absent; returns whether it was added
    pub(crate) fn add_excluded(&mut self, file_name: &str) -> bool {
        if self.is_excluded(file_name) {
            return false;
        }
        self.excluded_file_names.push(file_name.to_string());
        true
    }

    /// Remove a name from the exclusion list; returns whether it was present
    pub(crate) fn remove_excluded(&mut self, file_name: &str) -> bool {
        let before = self.excluded_file_names.len();
        self.excluded_file_names.retain(|n| n != file_name);
        self.excluded_file_names.len() != before
    }
}

/// External reference categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceCategory {
    Security,
    PackageManager,
    Other,
}

impl ReferenceCategory {
    /// Get the SPDX tag for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Security => "SECURITY",
            Self::PackageManager => "PACKAGE_MANAGER",
            Self::Other => "OTHER",
        }
    }

    /// Parse a category from its SPDX tag
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SECURITY" => Some(Self::Security),
            "PACKAGE_MANAGER" => Some(Self::PackageManager),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for ReferenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reference to an external identifier for a package
/// (a CPE, a package-manager coordinate, a plain URI)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRef {
    pub category: ReferenceCategory,
    /// Listed reference type name ("maven-central") or a type URI
    pub ref_type: String,
    /// The identifier within the referenced scheme
    pub locator: String,
    pub comment: Option<String>,
}

/// A named unit of software with license metadata and a file manifest
///
/// A package either "has files analyzed" (scanned from a local root) or is
/// a remote reference. The two states are kept consistent: no analysis
/// means no files and no verification code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    name: String,
    /// License the package author declares
    pub declared_license: LicenseAssertion,
    /// License the document author concludes
    pub concluded_license: LicenseAssertion,
    /// Licenses observed across the package's files
    pub license_info_from_files: Vec<LicenseAssertion>,
    /// Copyright text
    pub copyright_text: String,
    /// Where the package was obtained from
    pub download_location: String,
    pub version_info: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub comment: Option<String>,
    pub source_info: Option<String>,
    pub homepage: Option<String>,
    pub originator: Option<String>,
    pub supplier: Option<String>,
    pub package_file_name: Option<String>,
    /// External identifiers for this package
    pub external_refs: Vec<ExternalRef>,
    /// Relationships from this package
    pub relationships: RelationshipSet,
    files: Vec<FileEntry>,
    files_analyzed: bool,
    verification_code: Option<VerificationCode>,
}

impl Package {
    /// Create a package with no files ("remote" until files are added)
    pub fn new(
        name: impl Into<String>,
        declared_license: LicenseAssertion,
        download_location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_license,
            concluded_license: LicenseAssertion::NoAssertion,
            license_info_from_files: vec![LicenseAssertion::NoAssertion],
            copyright_text: "NOASSERTION".to_string(),
            download_location: download_location.into(),
            version_info: None,
            description: None,
            summary: None,
            comment: None,
            source_info: None,
            homepage: None,
            originator: None,
            supplier: None,
            package_file_name: None,
            external_refs: Vec::new(),
            relationships: RelationshipSet::new(),
            files: Vec::new(),
            files_analyzed: false,
            verification_code: None,
        }
    }

    /// The package name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// An element reference to this package
    pub fn element_ref(&self) -> ElementRef {
        ElementRef::package(&self.name)
    }

    /// The file manifest, ordered by name for display
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Look up a file by its package-relative name
    pub fn file(&self, name: &str) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.name() == name)
    }

    pub(crate) fn file_mut(&mut self, name: &str) -> Option<&mut FileEntry> {
        self.files.iter_mut().find(|f| f.name() == name)
    }

    /// Whether this package's files have been analyzed
    pub fn files_analyzed(&self) -> bool {
        self.files_analyzed
    }

    /// The current verification code, if any
    pub fn verification_code(&self) -> Option<&VerificationCode> {
        self.verification_code.as_ref()
    }

    pub(crate) fn verification_code_mut(&mut self) -> &mut Option<VerificationCode> {
        &mut self.verification_code
    }

    /// Insert a file into the manifest, keeping name order.
    ///
    /// A file with the same name replaces the existing entry (names are
    /// identity). Marks the package as analyzed.
    pub(crate) fn insert_file(&mut self, entry: FileEntry) {
        self.files.retain(|f| f.name() != entry.name());
        let position = self.files.partition_point(|f| f.name() < entry.name());
        self.files.insert(position, entry);
        self.files_analyzed = true;
    }

    /// Drop every file whose name is in `names`; returns how many were removed
    pub(crate) fn retain_files_not_in(&mut self, names: &[&str]) -> usize {
        let before = self.files.len();
        self.files.retain(|f| !names.contains(&f.name()));
        before - self.files.len()
    }

    /// Mark the package file-less: clears the manifest, the verification
    /// code, and the analyzed flag.
    pub fn clear_files_analyzed(&mut self) {
        self.files.clear();
        self.verification_code = None;
        self.files_analyzed = false;
    }

    /// Ensure the named file does or does not have the given relationship
    /// to this package. Idempotent both ways.
    pub fn set_file_relationship(
        &mut self,
        file_name: &str,
        rel_type: RelationshipType,
        should_exist: bool,
    ) -> Result<()> {
        let target = ElementRef::package(self.name.clone());
        let file = self
            .file_mut(file_name)
            .ok_or_else(|| Error::UnknownFile(file_name.to_string()))?;
        file.relationships.set_presence(rel_type, target, should_exist)
    }

    /// Find the named file's relationship of the given type to this package
    pub fn file_relationship(
        &self,
        file_name: &str,
        rel_type: RelationshipType,
    ) -> Result<Option<&Relationship>> {
        let target = ElementRef::package(self.name.clone());
        let file = self
            .file(file_name)
            .ok_or_else(|| Error::UnknownFile(file_name.to_string()))?;
        file.relationships.find(rel_type, &target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::{digest_bytes, HashAlgorithm};

    fn entry(name: &str, content: &[u8]) -> FileEntry {
        FileEntry::new(name, Vec::new(), digest_bytes(HashAlgorithm::Sha1, content))
    }

    fn package() -> Package {
        Package::new("widget", LicenseAssertion::NoAssertion, "NOASSERTION")
    }

    #[test]
    fn test_new_package_is_remote() {
        let pkg = package();
        assert!(!pkg.files_analyzed());
        assert!(pkg.files().is_empty());
        assert!(pkg.verification_code().is_none());
        assert_eq!(pkg.copyright_text, "NOASSERTION");
        assert_eq!(pkg.license_info_from_files, vec![LicenseAssertion::NoAssertion]);
    }

    #[test]
    fn test_insert_file_keeps_name_order() {
        let mut pkg = package();
        pkg.insert_file(entry("src/zeta.c", b"z"));
        pkg.insert_file(entry("README.txt", b"r"));
        pkg.insert_file(entry("src/alpha.c", b"a"));

        let names: Vec<_> = pkg.files().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["README.txt", "src/alpha.c", "src/zeta.c"]);
        assert!(pkg.files_analyzed());
    }

    #[test]
    fn test_insert_file_same_name_replaces() {
        let mut pkg = package();
        pkg.insert_file(entry("main.c", b"old"));
        pkg.insert_file(entry("main.c", b"new"));

        assert_eq!(pkg.files().len(), 1);
        assert_eq!(
            pkg.file("main.c").unwrap().checksum,
            digest_bytes(HashAlgorithm::Sha1, b"new")
        );
    }

    #[test]
    fn test_clear_files_analyzed() {
        let mut pkg = package();
        pkg.insert_file(entry("main.c", b"x"));
        pkg.verification_code_mut().replace(VerificationCode::default());

        pkg.clear_files_analyzed();
        assert!(!pkg.files_analyzed());
        assert!(pkg.files().is_empty());
        assert!(pkg.verification_code().is_none());
    }

    #[test]
    fn test_set_file_relationship_unknown_file() {
        let mut pkg = package();
        let err = pkg.set_file_relationship("ghost.c", RelationshipType::BuildToolOf, true);
        assert!(matches!(err, Err(Error::UnknownFile(_))));
    }

    #[test]
    fn test_set_file_relationship_toggles() {
        let mut pkg = package();
        pkg.insert_file(entry("tools/gen.py", b"g"));

        pkg.set_file_relationship("tools/gen.py", RelationshipType::BuildToolOf, true)
            .unwrap();
        pkg.set_file_relationship("tools/gen.py", RelationshipType::BuildToolOf, true)
            .unwrap();
        assert!(pkg
            .file_relationship("tools/gen.py", RelationshipType::BuildToolOf)
            .unwrap()
            .is_some());
        assert_eq!(pkg.file("tools/gen.py").unwrap().relationships.len(), 1);

        pkg.set_file_relationship("tools/gen.py", RelationshipType::BuildToolOf, false)
            .unwrap();
        assert!(pkg
            .file_relationship("tools/gen.py", RelationshipType::BuildToolOf)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_verification_code_exclusions() {
        let mut code = VerificationCode::default();
        assert!(code.add_excluded("manifest.spdx"));
        assert!(!code.add_excluded("manifest.spdx"));
        assert!(code.is_excluded("manifest.spdx"));
        assert!(!code.is_excluded("main.c"));
        assert!(code.remove_excluded("manifest.spdx"));
        assert!(!code.remove_excluded("manifest.spdx"));
    }

    #[test]
    fn test_reference_category_roundtrip() {
        for cat in [
            ReferenceCategory::Security,
            ReferenceCategory::PackageManager,
            ReferenceCategory::Other,
        ] {
            assert_eq!(ReferenceCategory::parse(cat.as_str()), Some(cat));
        }
        assert_eq!(ReferenceCategory::parse("PERSISTENT_ID"), None);
    }
}
