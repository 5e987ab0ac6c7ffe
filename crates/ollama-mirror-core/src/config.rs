//! Centralized configuration for the Ollama mirror.
//!
//! Layout constants for the Ollama model store and the LM Studio model tree,
//! plus the per-run paths and options handed to the pipeline.

use std::path::{Path, PathBuf};

/// On-disk layout of both model stores.
pub struct LayoutConfig;

impl LayoutConfig {
    // Ollama side
    pub const MANIFESTS_DIR_NAME: &'static str = "manifests";
    pub const BLOBS_DIR_NAME: &'static str = "blobs";

    // LM Studio side
    pub const PROVIDER_DIR_NAME: &'static str = "ollama";
    pub const MODEL_FILE_EXTENSION: &'static str = "gguf";
    pub const PROJECTOR_FILE_SUFFIX: &'static str = "-projector.bin";

    /// Minimum path components below the manifests root
    /// (`{registry}/.../{model}/{variant}`).
    pub const MIN_MANIFEST_DEPTH: usize = 3;
}

/// Layer media types understood by the mirror.
pub struct MediaTypes;

impl MediaTypes {
    pub const MODEL: &'static str = "application/vnd.ollama.image.model";
    pub const PROJECTOR: &'static str = "application/vnd.ollama.image.projector";
}

/// Source and destination roots for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorPaths {
    /// Ollama models directory (holds `manifests/` and `blobs/`)
    pub ollama_dir: PathBuf,
    /// LM Studio models directory
    pub lmstudio_dir: PathBuf,
}

impl MirrorPaths {
    pub fn new(ollama_dir: impl Into<PathBuf>, lmstudio_dir: impl Into<PathBuf>) -> Self {
        Self {
            ollama_dir: ollama_dir.into(),
            lmstudio_dir: lmstudio_dir.into(),
        }
    }

    pub fn manifests_dir(&self) -> PathBuf {
        self.ollama_dir.join(LayoutConfig::MANIFESTS_DIR_NAME)
    }

    pub fn blobs_dir(&self) -> PathBuf {
        self.ollama_dir.join(LayoutConfig::BLOBS_DIR_NAME)
    }

    /// Directory LM Studio lists as the `ollama` provider.
    pub fn provider_dir(&self) -> PathBuf {
        self.lmstudio_dir.join(LayoutConfig::PROVIDER_DIR_NAME)
    }

    pub fn ollama_dir(&self) -> &Path {
        &self.ollama_dir
    }

    pub fn lmstudio_dir(&self) -> &Path {
        &self.lmstudio_dir
    }
}

/// Behavioural switches for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorOptions {
    /// Describe links instead of creating them.
    pub dry_run: bool,
    /// Emit per-file warnings and per-link notices.
    pub verbose: bool,
}
