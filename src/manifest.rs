// src/manifest.rs

//! Building package manifests from directory trees
//!
//! A manifest build walks a root directory, classifies and checksums every
//! retained file, and produces a package whose verification code covers
//! the resulting file set. Without a root the result is a "remote"
//! package: a reference to an external dependency with no files and no
//! verification code.

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::checksum::{digest_file, HashAlgorithm};
use crate::classify::FileClassifier;
use crate::error::{Error, Result};
use crate::license::{LicenseAssertion, LicenseCatalog};
use crate::model::{FileEntry, Package};
use crate::verification::recompute_verification_code;

/// Builds a package from a directory tree (or none)
///
/// ```ignore
/// use sbomedit::{ManifestBuilder, StandardLicenseCatalog};
///
/// let pkg = ManifestBuilder::new("widget")
///     .declared_license(LicenseAssertion::Listed { id: "GPL-2.0".into() })
///     .download_location("https://example.org/widget.tar.gz")
///     .root_path("/src/widget")
///     .skip_hidden(true)
///     .build(&StandardLicenseCatalog)?;
/// ```
pub struct ManifestBuilder {
    name: String,
    declared_license: LicenseAssertion,
    download_location: String,
    root: Option<PathBuf>,
    skip_hidden: bool,
    algorithm: HashAlgorithm,
}

impl ManifestBuilder {
    /// Create a builder with no root path, `NoAssertion` declared license,
    /// `"NOASSERTION"` download location, and hidden files skipped.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_license: LicenseAssertion::NoAssertion,
            download_location: "NOASSERTION".to_string(),
            root: None,
            skip_hidden: true,
            algorithm: HashAlgorithm::Sha1,
        }
    }

    /// Set the declared license
    pub fn declared_license(mut self, license: LicenseAssertion) -> Self {
        self.declared_license = license;
        self
    }

    /// Set the download location
    pub fn download_location(mut self, location: impl Into<String>) -> Self {
        self.download_location = location.into();
        self
    }

    /// Set the directory to scan. Without one, `build` produces a remote
    /// package.
    pub fn root_path(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Whether to skip hidden files and prune hidden directories
    pub fn skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    /// Set the per-file checksum algorithm
    pub fn algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Build the package.
    ///
    /// A `Listed` declared license is resolved against `catalog` before
    /// any I/O happens. The walk is exhaustive: no file is dropped except
    /// by the hidden-file policy, and a file that cannot be read is
    /// logged and omitted without aborting the build. The verification
    /// code is computed once the file set is complete.
    pub fn build(&self, catalog: &dyn LicenseCatalog) -> Result<Package> {
        if let LicenseAssertion::Listed { id } = &self.declared_license {
            catalog
                .lookup(id)
                .ok_or_else(|| Error::UnknownLicenseId(id.clone()))?;
        }

        let mut package = Package::new(
            self.name.clone(),
            self.declared_license.clone(),
            self.download_location.clone(),
        );

        let Some(root) = &self.root else {
            // Remote package: no files, no verification code
            return Ok(package);
        };

        let walker = WalkDir::new(root).into_iter();
        let entries: Box<dyn Iterator<Item = walkdir::Result<DirEntry>>> = if self.skip_hidden {
            // filter_entry prunes hidden directories rather than
            // skipping their files one by one; the root the caller chose
            // is never subject to the hidden policy
            Box::new(walker.filter_entry(|e| e.depth() == 0 || !is_hidden(e)))
        } else {
            Box::new(walker)
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry: {}", err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match new_file_entry(root, entry.path(), self.algorithm) {
                Ok(file) => package.insert_file(file),
                Err(err) => {
                    warn!("unable to add file '{}': {}", entry.path().display(), err);
                }
            }
        }

        recompute_verification_code(&mut package)?;
        Ok(package)
    }
}

/// Add one file to a package, checksumming and classifying it the same
/// way a full build would, then recompute the verification code.
///
/// Unlike the batch walk, an I/O failure here is fatal to the operation.
/// Returns the added file's package-relative name.
pub fn add_file_to_package(
    package: &mut Package,
    root: &Path,
    file_path: &Path,
) -> Result<String> {
    let entry = new_file_entry(root, file_path, HashAlgorithm::Sha1)?;
    let name = entry.name().to_string();
    package.insert_file(entry);
    recompute_verification_code(package)?;
    Ok(name)
}

/// Construct one manifest entry: relative name, checksum, classifier tags
fn new_file_entry(root: &Path, path: &Path, algorithm: HashAlgorithm) -> Result<FileEntry> {
    let name = relative_name(root, path)?;
    let checksum = digest_file(algorithm, path)?;
    let tags = FileClassifier::classify_with_probe(path);
    Ok(FileEntry::new(name, tags, checksum))
}

/// The package-relative file name: forward-slash separated, URI-decoded
/// (built from real path components, so nothing is percent-encoded), no
/// leading separator.
fn relative_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| Error::PathOutsideRoot { path: path.to_path_buf() })?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

/// Hidden means a dot-prefixed name, or the hidden attribute on Windows
fn is_hidden(entry: &DirEntry) -> bool {
    if entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
    {
        return true;
    }
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
        if let Ok(metadata) = entry.metadata() {
            return metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0;
        }
    }
    false
}
