// src/relationship.rs

//! Typed, directed relationships between document elements
//!
//! Each document, package, and file carries an owned relationship list.
//! Targets are identified by element kind and name, not object identity:
//! two file values with the same name are indistinguishable here. Entries
//! are unique per (type, target) and keep insertion order, which is the
//! order any listing consumer sees.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// SPDX relationship types, closed enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipType {
    Describes,
    DescribedBy,
    Contains,
    ContainedBy,
    Generates,
    GeneratedFrom,
    AncestorOf,
    DescendantOf,
    VariantOf,
    DistributionArtifact,
    PatchFor,
    PatchApplied,
    CopyOf,
    FileAdded,
    FileDeleted,
    FileModified,
    ExpandedFromArchive,
    DynamicLink,
    StaticLink,
    DataFileOf,
    TestCaseOf,
    BuildToolOf,
    DocumentationOf,
    OptionalComponentOf,
    MetafileOf,
    PackageOf,
    Amends,
    PrerequisiteFor,
    HasPrerequisite,
    Other,
}

impl RelationshipType {
    /// Get the SPDX tag for this type ("DYNAMIC_LINK")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Describes => "DESCRIBES",
            Self::DescribedBy => "DESCRIBED_BY",
            Self::Contains => "CONTAINS",
            Self::ContainedBy => "CONTAINED_BY",
            Self::Generates => "GENERATES",
            Self::GeneratedFrom => "GENERATED_FROM",
            Self::AncestorOf => "ANCESTOR_OF",
            Self::DescendantOf => "DESCENDANT_OF",
            Self::VariantOf => "VARIANT_OF",
            Self::DistributionArtifact => "DISTRIBUTION_ARTIFACT",
            Self::PatchFor => "PATCH_FOR",
            Self::PatchApplied => "PATCH_APPLIED",
            Self::CopyOf => "COPY_OF",
            Self::FileAdded => "FILE_ADDED",
            Self::FileDeleted => "FILE_DELETED",
            Self::FileModified => "FILE_MODIFIED",
            Self::ExpandedFromArchive => "EXPANDED_FROM_ARCHIVE",
            Self::DynamicLink => "DYNAMIC_LINK",
            Self::StaticLink => "STATIC_LINK",
            Self::DataFileOf => "DATA_FILE_OF",
            Self::TestCaseOf => "TEST_CASE_OF",
            Self::BuildToolOf => "BUILD_TOOL_OF",
            Self::DocumentationOf => "DOCUMENTATION_OF",
            Self::OptionalComponentOf => "OPTIONAL_COMPONENT_OF",
            Self::MetafileOf => "METAFILE_OF",
            Self::PackageOf => "PACKAGE_OF",
            Self::Amends => "AMENDS",
            Self::PrerequisiteFor => "PREREQUISITE_FOR",
            Self::HasPrerequisite => "HAS_PREREQUISITE",
            Self::Other => "OTHER",
        }
    }

    /// Parse a type from its SPDX tag
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().find(|t| t.as_str() == s).copied()
    }

    /// Human-readable form for listings ("Dynamic link")
    pub fn display_name(&self) -> String {
        let lower = self.as_str().to_lowercase().replace('_', " ");
        let mut chars = lower.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Return all relationship types
    pub fn all() -> &'static [RelationshipType] {
        &[
            Self::Describes,
            Self::DescribedBy,
            Self::Contains,
            Self::ContainedBy,
            Self::Generates,
            Self::GeneratedFrom,
            Self::AncestorOf,
            Self::DescendantOf,
            Self::VariantOf,
            Self::DistributionArtifact,
            Self::PatchFor,
            Self::PatchApplied,
            Self::CopyOf,
            Self::FileAdded,
            Self::FileDeleted,
            Self::FileModified,
            Self::ExpandedFromArchive,
            Self::DynamicLink,
            Self::StaticLink,
            Self::DataFileOf,
            Self::TestCaseOf,
            Self::BuildToolOf,
            Self::DocumentationOf,
            Self::OptionalComponentOf,
            Self::MetafileOf,
            Self::PackageOf,
            Self::Amends,
            Self::PrerequisiteFor,
            Self::HasPrerequisite,
            Self::Other,
        ]
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// By-name reference to a document element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRef {
    /// The document, identified by its namespace URI
    Document { namespace: String },
    /// A package, identified by name
    Package { name: String },
    /// A file, identified by its package-relative name
    File { name: String },
}

impl ElementRef {
    /// Reference a document by namespace URI
    pub fn document(namespace: impl Into<String>) -> Self {
        Self::Document { namespace: namespace.into() }
    }

    /// Reference a package by name
    pub fn package(name: impl Into<String>) -> Self {
        Self::Package { name: name.into() }
    }

    /// Reference a file by its package-relative name
    pub fn file(name: impl Into<String>) -> Self {
        Self::File { name: name.into() }
    }

    /// Whether this reference points at a package
    pub fn is_package(&self) -> bool {
        matches!(self, Self::Package { .. })
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document { namespace } => write!(f, "document:{}", namespace),
            Self::Package { name } => write!(f, "package:{}", name),
            Self::File { name } => write!(f, "file:{}", name),
        }
    }
}

/// One directed, typed relationship from a source element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// The relationship type tag
    pub rel_type: RelationshipType,
    /// The target element
    pub target: ElementRef,
    /// Optional free-text comment
    pub comment: Option<String>,
}

impl Relationship {
    /// Create a relationship with no comment
    pub fn new(rel_type: RelationshipType, target: ElementRef) -> Self {
        Self { rel_type, target, comment: None }
    }
}

/// An element's owned relationship list
///
/// Insertion-ordered; at most one entry per (type, target) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipSet {
    entries: Vec<Relationship>,
}

impl RelationshipSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a (type, target) entry exists
    pub fn contains(&self, rel_type: RelationshipType, target: &ElementRef) -> bool {
        self.entries
            .iter()
            .any(|r| r.rel_type == rel_type && r.target == *target)
    }

    /// Find the relationship matching (type, target).
    ///
    /// At most one entry may match; more than one is a data-corruption
    /// condition surfaced as [`Error::InvariantViolation`]. It cannot arise
    /// through this set's own mutations, only from deserialized input.
    pub fn find(
        &self,
        rel_type: RelationshipType,
        target: &ElementRef,
    ) -> Result<Option<&Relationship>> {
        let mut matches = self
            .entries
            .iter()
            .filter(|r| r.rel_type == rel_type && r.target == *target);
        let first = matches.next();
        if matches.next().is_some() {
            return Err(Error::InvariantViolation(format!(
                "multiple {} relationships to {}",
                rel_type, target
            )));
        }
        Ok(first)
    }

    /// Insert a relationship unless its (type, target) already exists.
    ///
    /// Returns whether the entry was inserted; an identical triple is
    /// never duplicated.
    pub fn insert(&mut self, relationship: Relationship) -> bool {
        if self.contains(relationship.rel_type, &relationship.target) {
            return false;
        }
        self.entries.push(relationship);
        true
    }

    /// Ensure the (type, target) relationship exists or doesn't.
    ///
    /// Creates a comment-less entry when `should_exist` and none matches;
    /// removes exactly the matching entry when `!should_exist`. Idempotent
    /// in both directions.
    pub fn set_presence(
        &mut self,
        rel_type: RelationshipType,
        target: ElementRef,
        should_exist: bool,
    ) -> Result<()> {
        let existing = self.find(rel_type, &target)?.is_some();
        if should_exist && !existing {
            self.entries.push(Relationship::new(rel_type, target));
        } else if !should_exist && existing {
            self.remove_exact(rel_type, &target);
        }
        Ok(())
    }

    /// Remove the single entry matching both type and target.
    ///
    /// Returns whether an entry was removed.
    pub fn remove_exact(&mut self, rel_type: RelationshipType, target: &ElementRef) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|r| !(r.rel_type == rel_type && r.target == *target));
        self.entries.len() != before
    }

    /// Remove every entry whose type matches OR whose target matches.
    ///
    /// This is the removal the original SPDX editing tool performs, wider
    /// than the (type, target) conjunction used by [`find`](Self::find) and
    /// [`set_presence`](Self::set_presence); kept so documents edited here
    /// round-trip the same way. Returns the number of entries removed.
    pub fn remove_matching_any(
        &mut self,
        rel_type: RelationshipType,
        target: &ElementRef,
    ) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|r| r.rel_type != rel_type && r.target != *target);
        before - self.entries.len()
    }

    /// Iterate relationships in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }

    /// Number of relationships
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RelationshipSet {
    type Item = &'a Relationship;
    type IntoIter = std::slice::Iter<'a, Relationship>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
