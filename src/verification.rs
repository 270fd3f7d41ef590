// src/verification.rs

//! Package verification codes
//!
//! The verification code is a single SHA-1 digest summarizing the identity
//! of every non-excluded file in a package: collect the per-file checksum
//! strings, sort them lexicographically, concatenate with no separator,
//! and hash the concatenation. Any drift in the file set, file content, or
//! exclusion list changes the code.
//!
//! The exclusion list exists so a serialized manifest (the package's own
//! `.spdx` file) can live inside the tree it describes without
//! invalidating itself.

use crate::checksum::sha1_hex;
use crate::error::{Error, Result};
use crate::model::{Package, VerificationCode};

/// Compute the verification code for a package's current file set.
///
/// Files named in the exclusion list are filtered out of the rollup.
/// A package with zero eligible files has no meaningful code; that is an
/// [`Error::EmptyManifest`], never a digest of the empty string.
pub fn compute_verification_code(package: &Package) -> Result<String> {
    let empty: &[String] = &[];
    let excluded = package
        .verification_code()
        .map(VerificationCode::excluded_file_names)
        .unwrap_or(empty);

    let mut checksums: Vec<&str> = package
        .files()
        .iter()
        .filter(|f| !excluded.iter().any(|name| name == f.name()))
        .map(|f| f.checksum.as_str())
        .collect();

    if checksums.is_empty() {
        return Err(Error::EmptyManifest(package.name().to_string()));
    }

    checksums.sort_unstable();
    Ok(sha1_hex(checksums.concat().as_bytes()))
}

/// Recompute and store the package's verification code, preserving the
/// exclusion list.
pub fn recompute_verification_code(package: &mut Package) -> Result<()> {
    let value = compute_verification_code(package)?;
    package
        .verification_code_mut()
        .get_or_insert_with(VerificationCode::default)
        .set_value(value);
    Ok(())
}

/// Exclude a file name from the rollup and recompute. Idempotent.
///
/// The name need not match a manifest file; excluding an unknown name
/// leaves the code unchanged.
pub fn exclude_file_from_verification(package: &mut Package, file_name: &str) -> Result<()> {
    package
        .verification_code_mut()
        .get_or_insert_with(VerificationCode::default)
        .add_excluded(file_name);
    recompute_verification_code(package)
}

/// Remove a file name from the exclusion list and recompute. Idempotent.
pub fn unexclude_file_from_verification(package: &mut Package, file_name: &str) -> Result<()> {
    if let Some(code) = package.verification_code_mut() {
        code.remove_excluded(file_name);
    }
    recompute_verification_code(package)
}

/// Whether a file name is currently excluded from the rollup
pub fn is_file_excluded(package: &Package, file_name: &str) -> bool {
    package
        .verification_code()
        .map(|code| code.is_excluded(file_name))
        .unwrap_or(false)
}

/// Remove the named files from the package.
///
/// Removing the last file clears the verification code and the analyzed
/// flag rather than leaving a stale code; otherwise the code is
/// recomputed.
pub fn remove_files_from_package(package: &mut Package, file_names: &[&str]) -> Result<()> {
    package.retain_files_not_in(file_names);
    if package.files().is_empty() {
        package.clear_files_analyzed();
        Ok(())
    } else {
        recompute_verification_code(package)
    }
}
