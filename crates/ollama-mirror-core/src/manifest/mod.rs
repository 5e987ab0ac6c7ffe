//! Ollama manifest handling.
//!
//! ```text
//! manifests/{registry}/{namespace}/{model}/{variant}
//!     │
//!     ├── types     - Manifest schema, ModelInfo, skip reasons
//!     ├── digest    - Digest validation and blob filenames
//!     ├── naming    - Display names and destination filenames
//!     └── discovery - Tree walk producing ModelInfo records
//! ```

mod digest;
mod discovery;
mod naming;
mod types;

pub use digest::Digest;
pub use discovery::{discover_models, extract_model_info};
pub use naming::{model_name_from_relative_path, primary_file_name, projector_file_name};
pub use types::{
    Descriptor, Discovery, Extraction, LayerKind, Manifest, ModelInfo, RejectedLayer, SkipReason,
    SkippedManifest,
};
