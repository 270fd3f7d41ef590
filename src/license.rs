// src/license.rs

//! License assertions, the standard-license catalog, and extracted licenses
//!
//! Every license-bearing field (declared, concluded, per-file) holds one of
//! four mutually exclusive assertion modes. `Listed` ids resolve against an
//! explicit catalog handle; `Extracted` licenses are custom texts registered
//! per document, identified by a document-local id.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A license from the standard SPDX catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedLicense {
    /// Catalog id ("Apache-2.0")
    pub id: String,
    /// Canonical full name ("Apache License 2.0")
    pub name: String,
}

/// Read-only handle to a catalog of standard license ids
///
/// Threaded explicitly into every operation that resolves a `Listed`
/// assertion, so tests can substitute a small fixed license set.
pub trait LicenseCatalog {
    /// Resolve an id to its canonical license
    fn lookup(&self, id: &str) -> Option<ListedLicense>;

    /// All known ids, sorted
    fn license_ids(&self) -> Vec<String>;
}

/// Standard license ids and canonical names, SPDX 2.1 vintage.
const STANDARD_LICENSES: &[(&str, &str)] = &[
    ("0BSD", "BSD Zero Clause License"),
    ("AGPL-3.0", "GNU Affero General Public License v3.0"),
    ("Apache-1.1", "Apache Software License 1.1"),
    ("Apache-2.0", "Apache License 2.0"),
    ("Artistic-2.0", "Artistic License 2.0"),
    ("BSD-2-Clause", "BSD 2-Clause \"Simplified\" License"),
    ("BSD-3-Clause", "BSD 3-Clause \"New\" or \"Revised\" License"),
    ("BSD-4-Clause", "BSD 4-Clause \"Original\" or \"Old\" License"),
    ("BSL-1.0", "Boost Software License 1.0"),
    ("CC-BY-4.0", "Creative Commons Attribution 4.0"),
    ("CC-BY-SA-4.0", "Creative Commons Attribution Share Alike 4.0"),
    ("CC0-1.0", "Creative Commons Zero v1.0 Universal"),
    ("CDDL-1.0", "Common Development and Distribution License 1.0"),
    ("EPL-1.0", "Eclipse Public License 1.0"),
    ("EUPL-1.1", "European Union Public License 1.1"),
    ("GPL-2.0", "GNU General Public License v2.0 only"),
    ("GPL-2.0+", "GNU General Public License v2.0 or later"),
    ("GPL-3.0", "GNU General Public License v3.0 only"),
    ("GPL-3.0+", "GNU General Public License v3.0 or later"),
    ("ISC", "ISC License"),
    ("LGPL-2.1", "GNU Lesser General Public License v2.1 only"),
    ("LGPL-2.1+", "GNU Lesser General Public License v2.1 or later"),
    ("LGPL-3.0", "GNU Lesser General Public License v3.0 only"),
    ("MIT", "MIT License"),
    ("MPL-2.0", "Mozilla Public License 2.0"),
    ("NCSA", "University of Illinois/NCSA Open Source License"),
    ("OFL-1.1", "SIL Open Font License 1.1"),
    ("OpenSSL", "OpenSSL License"),
    ("PHP-3.01", "PHP License v3.01"),
    ("PostgreSQL", "PostgreSQL License"),
    ("Python-2.0", "Python License 2.0"),
    ("Ruby", "Ruby License"),
    ("Unlicense", "The Unlicense"),
    ("W3C", "W3C Software Notice and License"),
    ("WTFPL", "Do What The F*ck You Want To Public License"),
    ("X11", "X11 License"),
    ("Zlib", "zlib License"),
];

/// The built-in standard license catalog
#[derive(Debug, Clone, Default)]
pub struct StandardLicenseCatalog;

impl LicenseCatalog for StandardLicenseCatalog {
    fn lookup(&self, id: &str) -> Option<ListedLicense> {
        STANDARD_LICENSES
            .iter()
            .find(|(known, _)| *known == id)
            .map(|(id, name)| ListedLicense {
                id: (*id).to_string(),
                name: (*name).to_string(),
            })
    }

    fn license_ids(&self) -> Vec<String> {
        // Table is kept sorted; collect preserves that
        STANDARD_LICENSES.iter().map(|(id, _)| (*id).to_string()).collect()
    }
}

/// A custom license text registered within one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedLicense {
    /// Document-local id ("LicenseRef-1")
    pub id: String,
    /// Display name
    pub name: String,
    /// The extracted license text
    pub text: String,
}

/// Per-document registry of extracted licenses
///
/// Keyed by id (unique); also searchable by (name, text) so callers can
/// reuse an identical entry instead of registering a near-duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedLicenseRegistry {
    entries: Vec<ExtractedLicense>,
}

impl ExtractedLicenseRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new extracted license.
    ///
    /// Requires non-empty id, name, and text; fails with
    /// [`Error::DuplicateLicenseId`] if the id is taken. Callers wanting to
    /// avoid near-duplicate entries should check
    /// [`find_by_name_and_text`](Self::find_by_name_and_text) first.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<&ExtractedLicense> {
        let (id, name, text) = (id.into(), name.into(), text.into());
        if id.is_empty() {
            return Err(Error::EmptyLicenseField("id"));
        }
        if name.is_empty() {
            return Err(Error::EmptyLicenseField("name"));
        }
        if text.is_empty() {
            return Err(Error::EmptyLicenseField("text"));
        }
        if self.find_by_id(&id).is_some() {
            return Err(Error::DuplicateLicenseId(id));
        }

        self.entries.push(ExtractedLicense { id, name, text });
        Ok(self.entries.last().expect("entry just pushed"))
    }

    /// Find an extracted license by its id
    pub fn find_by_id(&self, id: &str) -> Option<&ExtractedLicense> {
        self.entries.iter().find(|l| l.id == id)
    }

    /// Find an extracted license with the given name and text
    pub fn find_by_name_and_text(&self, name: &str, text: &str) -> Option<&ExtractedLicense> {
        self.entries.iter().find(|l| l.name == name && l.text == text)
    }

    /// Iterate registered licenses in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ExtractedLicense> {
        self.entries.iter()
    }

    /// Number of registered licenses
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A license assertion on a document element
///
/// Closed variant type; every consumption site matches exhaustively, so no
/// "unsupported license kind" fallback path exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseAssertion {
    /// The element is known to carry no license
    None,
    /// No assertion is made about the element's license
    NoAssertion,
    /// A license identified by a standard catalog id
    Listed {
        id: String,
    },
    /// A custom license registered in the owning document
    Extracted(ExtractedLicense),
}

impl LicenseAssertion {
    /// Build a `Listed` assertion, resolving the id against the catalog
    pub fn listed(id: impl Into<String>, catalog: &dyn LicenseCatalog) -> Result<Self> {
        let id = id.into();
        match catalog.lookup(&id) {
            Some(_) => Ok(Self::Listed { id }),
            None => Err(Error::UnknownLicenseId(id)),
        }
    }

    /// Build an `Extracted` assertion from a registered entry
    pub fn extracted(license: &ExtractedLicense) -> Self {
        Self::Extracted(license.clone())
    }

    /// Validate this assertion against the catalog and the owning
    /// document's extracted-license registry.
    pub fn validate(
        &self,
        catalog: &dyn LicenseCatalog,
        registry: &ExtractedLicenseRegistry,
    ) -> Result<()> {
        match self {
            Self::None | Self::NoAssertion => Ok(()),
            Self::Listed { id } => match catalog.lookup(id) {
                Some(_) => Ok(()),
                None => Err(Error::UnknownLicenseId(id.clone())),
            },
            Self::Extracted(license) => match registry.find_by_id(&license.id) {
                Some(_) => Ok(()),
                None => Err(Error::UnknownLicenseId(license.id.clone())),
            },
        }
    }
}

impl fmt::Display for LicenseAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::NoAssertion => write!(f, "NOASSERTION"),
            Self::Listed { id } => write!(f, "{}", id),
            Self::Extracted(license) => write!(f, "{}", license.id),
        }
    }
}
