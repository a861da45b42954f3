//! Error types for scanning and configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Remediation shown to users whose root path is rejected.
pub const PATH_HINT: &str = "copy the path from the file manager's address bar, \
     and remove stray quotes or a trailing '>' left over from a shell prompt";

/// Fatal errors for a scan call. Per-entry failures never surface here.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The root does not exist, is not a directory, or cannot be listed.
    #[error("Invalid path {path}: {reason}. Hint: {}", PATH_HINT)]
    InvalidPath { path: PathBuf, reason: String },
}

impl ScanError {
    pub fn invalid_path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while building or loading a category table.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The same extension is listed under two categories.
    #[error("extension '{extension}' is listed under both '{first}' and '{second}'")]
    OverlappingExtension {
        extension: String,
        first: String,
        second: String,
    },

    #[error("category at position {position} has an empty label")]
    EmptyLabel { position: usize },

    /// Duplicate label, or a custom category named like the fallback.
    #[error("category label '{label}' is duplicated or reserved")]
    DuplicateLabel { label: String },

    #[error("cannot read category file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid category JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// What kind of entry was skipped during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipKind {
    /// File size could not be read; recorded with size 0.
    File,
    /// Directory could not be listed; its subtree is missing.
    Directory,
}

/// A non-fatal failure tallied in the scan's error count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub kind: SkipKind,
    pub message: String,
}

impl SkippedEntry {
    pub fn new(path: impl Into<PathBuf>, kind: SkipKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}
