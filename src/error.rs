// src/error.rs

//! Error types for document editing operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while editing an SPDX document model
#[derive(Debug, Error)]
pub enum Error {
    /// I/O failure while reading a single file. Non-fatal during a
    /// directory walk (the file is logged and omitted), fatal for
    /// single-file operations such as adding one file to a package.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `Listed` license id did not resolve against the standard catalog,
    /// or an `Extracted` license id is not registered in the document.
    #[error("unknown license id '{0}'")]
    UnknownLicenseId(String),

    /// Extracted-license registration collided with an already registered id.
    #[error("extracted license id '{0}' is already registered")]
    DuplicateLicenseId(String),

    /// Extracted-license registration requires a non-empty id, name, and text.
    #[error("extracted license {0} must not be empty")]
    EmptyLicenseField(&'static str),

    /// A verification code was requested for a package with zero eligible
    /// (non-excluded) files.
    #[error("package '{0}' has no files eligible for verification")]
    EmptyManifest(String),

    /// More than one relationship matched a (type, target) pair on the
    /// same source element. Cannot arise through this crate's mutation
    /// surface; reachable only via codec-deserialized input.
    #[error("relationship invariant violated: {0}")]
    InvariantViolation(String),

    /// A by-name package lookup failed.
    #[error("no package named '{0}' in document")]
    UnknownPackage(String),

    /// A by-name file lookup failed.
    #[error("no file named '{0}' in package")]
    UnknownFile(String),

    /// A file handed to `add_file_to_package` does not live under the
    /// package root.
    #[error("'{}' is outside the package root", path.display())]
    PathOutsideRoot { path: PathBuf },
}

/// Result type for document editing operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an I/O error with the path it occurred on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
