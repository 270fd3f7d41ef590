// src/model/mod.rs

//! The in-memory SPDX document model
//!
//! A document owns its packages, each package owns its files, and every
//! element carries a relationship list. The whole graph is public and
//! serde-serializable so format codecs (tag-value, RDF, JSON-LD) can
//! consume and produce it without reaching into crate internals; mutation
//! of file sets and verification codes goes through this crate's
//! operations only.

mod file;
mod package;

pub use file::FileEntry;
pub use package::{ExternalRef, Package, ReferenceCategory, VerificationCode};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::license::{ExtractedLicenseRegistry, LicenseAssertion, LicenseCatalog};
use crate::relationship::{ElementRef, Relationship, RelationshipSet, RelationshipType};

/// The SPDX specification version documents are created against
pub const SPEC_VERSION: &str = "SPDX-2.1";

/// The creator string recorded in new documents
pub const TOOL_CREATOR: &str = "Tool: sbomedit";

/// Who created a document and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreationInfo {
    pub creators: Vec<String>,
    pub created: DateTime<Utc>,
}

/// Root container for one editing session
///
/// Owns the described packages, the extracted-license registry, and the
/// document-level relationship list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    namespace: String,
    pub name: String,
    pub spec_version: String,
    pub creation_info: CreationInfo,
    /// Relationships from the document (package descriptions)
    pub relationships: RelationshipSet,
    packages: Vec<Package>,
    extracted_licenses: ExtractedLicenseRegistry,
}

impl Document {
    /// Create an empty document
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            spec_version: SPEC_VERSION.to_string(),
            creation_info: CreationInfo {
                creators: vec![TOOL_CREATOR.to_string()],
                created: Utc::now(),
            },
            relationships: RelationshipSet::new(),
            packages: Vec::new(),
            extracted_licenses: ExtractedLicenseRegistry::new(),
        }
    }

    /// Create a document describing the given packages.
    ///
    /// Only the document-side describes edge is attached, with no inverse
    /// on the packages.
    pub fn with_packages(
        namespace: impl Into<String>,
        name: impl Into<String>,
        packages: impl IntoIterator<Item = Package>,
    ) -> Result<Self> {
        let mut document = Self::new(namespace, name);
        for pkg in packages {
            let target = pkg.element_ref();
            document.insert_package(pkg)?;
            document
                .relationships
                .insert(Relationship::new(RelationshipType::Describes, target));
        }
        Ok(document)
    }

    /// The document namespace URI
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// An element reference to this document
    pub fn element_ref(&self) -> ElementRef {
        ElementRef::document(&self.namespace)
    }

    /// The owned packages, in addition order
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Look up a package by name
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name() == name)
    }

    /// Look up a package by name for mutation
    pub fn package_mut(&mut self, name: &str) -> Option<&mut Package> {
        self.packages.iter_mut().find(|p| p.name() == name)
    }

    fn insert_package(&mut self, package: Package) -> Result<()> {
        if self.package(package.name()).is_some() {
            return Err(Error::InvariantViolation(format!(
                "package '{}' already in document",
                package.name()
            )));
        }
        self.packages.push(package);
        Ok(())
    }

    /// Add a package and describe it (both relationship edges).
    pub fn add_package(&mut self, package: Package) -> Result<()> {
        let name = package.name().to_string();
        self.insert_package(package)?;
        self.describe_package(&name)
    }

    /// Attach the paired description edges between this document and an
    /// owned package: document describes package, package is described by
    /// document.
    ///
    /// One logical operation: the package lookup happens before either
    /// edge is inserted, so a failure commits neither. On a fresh
    /// document/package pair this creates exactly two relationships;
    /// edges already present are not duplicated.
    pub fn describe_package(&mut self, package_name: &str) -> Result<()> {
        let doc_ref = self.element_ref();
        let pkg_ref = ElementRef::package(package_name);

        let package = self
            .packages
            .iter_mut()
            .find(|p| p.name() == package_name)
            .ok_or_else(|| Error::UnknownPackage(package_name.to_string()))?;

        package
            .relationships
            .insert(Relationship::new(RelationshipType::DescribedBy, doc_ref));
        self.relationships
            .insert(Relationship::new(RelationshipType::Describes, pkg_ref));
        Ok(())
    }

    /// The packages this document describes, in relationship-list order
    pub fn packages_described_by(&self) -> Vec<&Package> {
        self.relationships
            .iter()
            .filter(|r| r.rel_type == RelationshipType::Describes)
            .filter_map(|r| match &r.target {
                ElementRef::Package { name } => self.package(name),
                _ => None,
            })
            .collect()
    }

    /// The document's extracted-license registry
    pub fn extracted_licenses(&self) -> &ExtractedLicenseRegistry {
        &self.extracted_licenses
    }

    /// Register a new extracted license in this document.
    ///
    /// Fails on empty fields or a duplicate id; callers wanting to reuse
    /// an identical (name, text) entry should look it up first via
    /// [`ExtractedLicenseRegistry::find_by_name_and_text`].
    pub fn register_extracted_license(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<LicenseAssertion> {
        let license = self.extracted_licenses.register(id, name, text)?;
        Ok(LicenseAssertion::extracted(license))
    }

    /// Record an extracted license observed in a file: reuse an identical
    /// (name, text) registry entry or register a new one under `id`, then
    /// add the assertion to the file's license-info-from-files.
    pub fn attach_extracted_license_to_file(
        &mut self,
        package_name: &str,
        file_name: &str,
        id: impl Into<String>,
        name: &str,
        text: &str,
    ) -> Result<LicenseAssertion> {
        let existing = self
            .extracted_licenses
            .find_by_name_and_text(name, text)
            .cloned();
        let license = match existing {
            Some(license) => license,
            None => self.extracted_licenses.register(id, name, text)?.clone(),
        };
        let assertion = LicenseAssertion::Extracted(license);

        let file = self
            .package_mut(package_name)
            .ok_or_else(|| Error::UnknownPackage(package_name.to_string()))?
            .file_mut(file_name)
            .ok_or_else(|| Error::UnknownFile(file_name.to_string()))?;
        if !file.license_info_from_files.contains(&assertion) {
            file.license_info_from_files.push(assertion.clone());
        }
        Ok(assertion)
    }

    /// Set a package's declared license, validating against the catalog
    /// and this document's extracted-license registry.
    pub fn set_package_declared_license(
        &mut self,
        package_name: &str,
        assertion: LicenseAssertion,
        catalog: &dyn LicenseCatalog,
    ) -> Result<()> {
        assertion.validate(catalog, &self.extracted_licenses)?;
        let package = self
            .package_mut(package_name)
            .ok_or_else(|| Error::UnknownPackage(package_name.to_string()))?;
        package.declared_license = assertion;
        Ok(())
    }

    /// Set a package's concluded license, with the same validation
    pub fn set_package_concluded_license(
        &mut self,
        package_name: &str,
        assertion: LicenseAssertion,
        catalog: &dyn LicenseCatalog,
    ) -> Result<()> {
        assertion.validate(catalog, &self.extracted_licenses)?;
        let package = self
            .package_mut(package_name)
            .ok_or_else(|| Error::UnknownPackage(package_name.to_string()))?;
        package.concluded_license = assertion;
        Ok(())
    }

    /// Set a file's concluded license, with the same validation
    pub fn set_file_concluded_license(
        &mut self,
        package_name: &str,
        file_name: &str,
        assertion: LicenseAssertion,
        catalog: &dyn LicenseCatalog,
    ) -> Result<()> {
        assertion.validate(catalog, &self.extracted_licenses)?;
        let file = self
            .package_mut(package_name)
            .ok_or_else(|| Error::UnknownPackage(package_name.to_string()))?
            .file_mut(file_name)
            .ok_or_else(|| Error::UnknownFile(file_name.to_string()))?;
        file.concluded_license = assertion;
        Ok(())
    }
}
