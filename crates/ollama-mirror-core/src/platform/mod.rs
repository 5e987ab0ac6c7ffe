//! Platform abstraction layer.
//!
//! All `#[cfg]` blocks for OS-specific behaviour live here:
//! - `paths` - Default model directories per platform
//! - `links` - Symlink creation and non-following existence checks

pub mod links;
pub mod paths;

pub use links::{create_symlink, entry_exists};
pub use paths::{default_lmstudio_dir, default_ollama_dir};
