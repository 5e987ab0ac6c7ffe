//! Ollama Mirror Core - expose Ollama's blob store to LM Studio.
//!
//! Ollama keeps models as content-addressed blobs referenced by manifests.
//! LM Studio wants named `.gguf` files in `{models}/{provider}/{model}/`.
//! This crate walks the manifests and builds that layout out of symlinks,
//! so both tools share one copy of every blob.
//!
//! # Example
//!
//! ```rust,no_run
//! use ollama_mirror_core::{discover_models, LinkMaterializer, MirrorOptions, MirrorPaths};
//!
//! fn main() -> ollama_mirror_core::Result<()> {
//!     let paths = MirrorPaths::new("/home/me/.ollama/models", "/home/me/.cache/lm-studio/models");
//!
//!     let discovery = discover_models(&paths.manifests_dir())?;
//!     let materializer = LinkMaterializer::new(&paths, MirrorOptions::default());
//!     let summary = materializer.materialize_all(&discovery.models);
//!
//!     println!("{} created, {} skipped", summary.created, summary.skipped);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod manifest;
pub mod mirror;
pub mod platform;

pub use config::{LayoutConfig, MediaTypes, MirrorOptions, MirrorPaths};
pub use error::{MirrorError, Result};
pub use manifest::{
    discover_models, Digest, Discovery, ModelInfo, RejectedLayer, SkipReason, SkippedManifest,
};
pub use mirror::{
    AuxiliaryLink, AuxiliaryStatus, LinkAction, LinkMaterializer, MaterializeOutcome,
    MirrorSummary, ModelReport,
};
