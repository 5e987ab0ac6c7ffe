//! Content digests and their blob-store filenames.

use crate::error::{MirrorError, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `algorithm:hash`, with no path separators or dots in the hash.
static DIGEST_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9+._-]*:[A-Za-z0-9=_-]+$").unwrap());

/// A validated blob digest such as `sha256:4f2a...`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Parse and validate a digest string.
    ///
    /// # Examples
    ///
    /// ```
    /// use ollama_mirror_core::manifest::Digest;
    ///
    /// assert!(Digest::parse("sha256:abcd").is_ok());
    /// assert!(Digest::parse("sha256:../../etc/passwd").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        if DIGEST_PATTERN.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(MirrorError::InvalidDigest(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filename of this blob inside the Ollama blob store.
    ///
    /// Ollama stores `sha256:abcd` as `sha256-abcd`.
    pub fn blob_file_name(&self) -> String {
        self.0.replacen(':', "-", 1)
    }

    /// Full path of this blob under `blobs_dir`.
    pub fn blob_path(&self, blobs_dir: &Path) -> PathBuf {
        blobs_dir.join(self.blob_file_name())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Digest {
    type Err = MirrorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
