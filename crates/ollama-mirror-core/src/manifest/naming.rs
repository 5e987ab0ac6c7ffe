//! Display names and destination filenames for discovered models.

use crate::config::LayoutConfig;
use std::path::{Component, Path};

/// Derive a model's display name from its manifest path.
///
/// `rel` is relative to the manifests root and looks like
/// `registry.ollama.ai/library/llama3/8b`. The last two components become
/// `llama3-8b`. Paths shallower than [`LayoutConfig::MIN_MANIFEST_DEPTH`]
/// yield `None`, as do paths with a non-UTF-8 component: a lossy conversion
/// would let two distinct variants map to the same name.
pub fn model_name_from_relative_path(rel: &Path) -> Option<String> {
    let parts = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect::<Option<Vec<&str>>>()?;

    if parts.len() < LayoutConfig::MIN_MANIFEST_DEPTH {
        return None;
    }

    let model = parts[parts.len() - 2];
    let variant = parts[parts.len() - 1];
    Some(format!("{}-{}", model, variant))
}

/// `{name}.gguf`
pub fn primary_file_name(name: &str) -> String {
    format!("{}.{}", name, LayoutConfig::MODEL_FILE_EXTENSION)
}

/// `{name}-projector.bin`
pub fn projector_file_name(name: &str) -> String {
    format!("{}{}", name, LayoutConfig::PROJECTOR_FILE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_library_model_name() {
        let rel = PathBuf::from("registry.ollama.ai/library/llama3/8b");
        assert_eq!(model_name_from_relative_path(&rel).as_deref(), Some("llama3-8b"));
    }

    #[test]
    fn test_three_components_is_enough() {
        let rel = PathBuf::from("hf.co/qwen/latest");
        assert_eq!(model_name_from_relative_path(&rel).as_deref(), Some("qwen-latest"));
    }

    #[test]
    fn test_deeper_paths_use_last_two() {
        let rel = PathBuf::from("registry.example.com/team/sub/mistral/7b-q4");
        assert_eq!(
            model_name_from_relative_path(&rel).as_deref(),
            Some("mistral-7b-q4")
        );
    }

    #[test]
    fn test_shallow_paths_are_rejected() {
        assert_eq!(model_name_from_relative_path(Path::new("llama3/8b")), None);
        assert_eq!(model_name_from_relative_path(Path::new("8b")), None);
        assert_eq!(model_name_from_relative_path(Path::new("")), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_component_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let rel = Path::new("registry.ollama.ai/library/llama3")
            .join(OsStr::from_bytes(b"8b\xff"));
        assert_eq!(model_name_from_relative_path(&rel), None);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(primary_file_name("llava-7b"), "llava-7b.gguf");
        assert_eq!(projector_file_name("llava-7b"), "llava-7b-projector.bin");
    }
}
