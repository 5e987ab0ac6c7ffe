//! Manifest schema and the model records extracted from it.

use crate::config::MediaTypes;
use crate::manifest::digest::Digest;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// An Ollama image manifest as stored under `manifests/`.
///
/// Only the layer list matters for mirroring, so every field is optional and
/// falls back to its zero value when missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Manifest {
    pub schema_version: i64,
    pub media_type: Option<String>,
    pub config: Descriptor,
    #[serde(deserialize_with = "null_as_empty")]
    pub layers: Vec<Descriptor>,
}

/// Reference to a single blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Descriptor {
    pub media_type: String,
    pub digest: String,
    /// Signed, as written by the registry tooling.
    pub size: i64,
}

/// `"layers": null` reads as no layers.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Descriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Descriptor>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Descriptor {
    pub fn kind(&self) -> LayerKind {
        LayerKind::from_media_type(&self.media_type)
    }
}

/// What a layer holds, as far as the mirror cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Main model weights (GGUF)
    Model,
    /// Multimodal projector
    Projector,
    /// Template, params, license, system prompt, ...
    Other,
}

impl LayerKind {
    pub fn from_media_type(media_type: &str) -> Self {
        match media_type {
            MediaTypes::MODEL => LayerKind::Model,
            MediaTypes::PROJECTOR => LayerKind::Projector,
            _ => LayerKind::Other,
        }
    }
}

/// A model variant discovered in the manifest tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    /// Display name, `{model}-{variant}`
    pub name: String,
    /// Digest of the primary weights layer
    pub main_model_blob: Digest,
    /// Auxiliary blob digest -> suggested filename
    pub additional_blobs: BTreeMap<Digest, String>,
}

/// Why a manifest file did not produce a [`ModelInfo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file or directory entry could not be read.
    Unreadable(String),
    /// The file is not a valid manifest document.
    InvalidManifest(String),
    /// Fewer path components below the root than expected.
    UnexpectedPath,
    /// The primary layer references a malformed digest.
    InvalidDigest(String),
    /// No layer carries the model media type.
    MissingModelLayer { model: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(e) => write!(f, "could not read manifest: {}", e),
            SkipReason::InvalidManifest(e) => write!(f, "could not parse manifest: {}", e),
            SkipReason::UnexpectedPath => write!(f, "unexpected manifest path format"),
            SkipReason::InvalidDigest(d) => write!(f, "invalid model layer digest {:?}", d),
            SkipReason::MissingModelLayer { model } => {
                write!(f, "no main model blob found for {}", model)
            }
        }
    }
}

/// A manifest file that was passed over during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedManifest {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// An auxiliary layer left out of an otherwise usable model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLayer {
    pub path: PathBuf,
    pub model: String,
    pub digest: String,
}

/// A [`ModelInfo`] plus the auxiliary digests that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub model: ModelInfo,
    pub rejected_digests: Vec<String>,
}

/// Result of walking a manifest tree.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Models in traversal order
    pub models: Vec<ModelInfo>,
    /// Files that did not yield a model
    pub skipped: Vec<SkippedManifest>,
    /// Auxiliary layers dropped from discovered models
    pub rejected_layers: Vec<RejectedLayer>,
}

impl Discovery {
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
