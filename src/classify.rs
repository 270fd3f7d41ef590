// src/classify.rs

//! File-to-tag classification based on extension and MIME type
//!
//! Every file in a scanned package carries a set of SPDX file type tags.
//! Classification is by fixed extension tables plus an optional MIME probe;
//! the rules are not exclusive, so one file may receive several tags
//! (a `.jar` is both `Binary` and `Archive`). Files matching no rule get
//! an empty tag set, which is not an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// SPDX file type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileTag {
    /// Source code (by extension table)
    Source,
    /// Compiled or object code (by extension table)
    Binary,
    /// Plain text (txt, text)
    Text,
    /// Archive container (tar, gz, jar, zip, 7z, arj)
    Archive,
    /// A serialized SPDX document (.spdx)
    Spdx,
    /// MIME probe reported audio/*
    Audio,
    /// MIME probe reported image/*
    Image,
    /// MIME probe reported application/*
    Application,
}

const SOURCE_EXTENSIONS: &[&str] = &[
    "c", "cpp", "java", "h", "cs", "cxx", "asmx", "mm", "m", "php", "groovy", "ruby", "py",
];
const BINARY_EXTENSIONS: &[&str] = &["class", "exe", "dll", "obj", "o", "jar", "bin"];
const TEXT_EXTENSIONS: &[&str] = &["txt", "text"];
const ARCHIVE_EXTENSIONS: &[&str] = &["tar", "gz", "jar", "zip", "7z", "arj"];

impl FileTag {
    /// Get the string representation of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Binary => "binary",
            Self::Text => "text",
            Self::Archive => "archive",
            Self::Spdx => "spdx",
            Self::Audio => "audio",
            Self::Image => "image",
            Self::Application => "application",
        }
    }

    /// Parse a tag from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "source" => Some(Self::Source),
            "binary" => Some(Self::Binary),
            "text" => Some(Self::Text),
            "archive" => Some(Self::Archive),
            "spdx" => Some(Self::Spdx),
            "audio" => Some(Self::Audio),
            "image" => Some(Self::Image),
            "application" => Some(Self::Application),
            _ => None,
        }
    }

    /// Human-readable form for listings ("Source", "Archive")
    pub fn display_name(&self) -> String {
        let tag = self.as_str();
        let mut chars = tag.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Return all tags
    pub fn all() -> &'static [FileTag] {
        &[
            Self::Source,
            Self::Binary,
            Self::Text,
            Self::Archive,
            Self::Spdx,
            Self::Audio,
            Self::Image,
            Self::Application,
        ]
    }
}

impl fmt::Display for FileTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies files into SPDX file type tags
pub struct FileClassifier;

impl FileClassifier {
    /// Classify a file by path and an optional MIME probe result.
    ///
    /// Deterministic given the same extension tables and probe value.
    /// Rules are checked in table order and are not exclusive.
    pub fn classify(path: &Path, mime_type: Option<&str>) -> Vec<FileTag> {
        let extension = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.rsplit_once('.'))
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        let mut tags = Vec::new();
        if SOURCE_EXTENSIONS.contains(&extension.as_str()) {
            tags.push(FileTag::Source);
        }
        if BINARY_EXTENSIONS.contains(&extension.as_str()) {
            tags.push(FileTag::Binary);
        }
        if TEXT_EXTENSIONS.contains(&extension.as_str()) {
            tags.push(FileTag::Text);
        }
        if ARCHIVE_EXTENSIONS.contains(&extension.as_str()) {
            tags.push(FileTag::Archive);
        }
        if extension == "spdx" {
            tags.push(FileTag::Spdx);
        }

        if let Some(mime) = mime_type {
            if mime.starts_with("audio/") {
                tags.push(FileTag::Audio);
            }
            if mime.starts_with("image/") {
                tags.push(FileTag::Image);
            }
            if mime.starts_with("application/") {
                tags.push(FileTag::Application);
            }
        }

        tags
    }

    /// Classify a file, probing its MIME type from the path.
    ///
    /// A probe miss is non-fatal: the file simply gets no MIME-based tag.
    pub fn classify_with_probe(path: &Path) -> Vec<FileTag> {
        let mime = probe_mime(path);
        if mime.is_none() {
            debug!("no MIME type for {}", path.display());
        }
        Self::classify(path, mime)
    }
}

/// Guess a file's MIME type from its path
pub fn probe_mime(path: &Path) -> Option<&'static str> {
    mime_guess::from_path(path).first_raw()
}
