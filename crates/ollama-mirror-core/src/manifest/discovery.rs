//! Manifest discovery.
//!
//! Walks the Ollama `manifests/` tree and turns each manifest into a
//! [`ModelInfo`]. Any per-file problem becomes a [`SkippedManifest`]; only an
//! unwalkable root is an error.

use crate::error::{MirrorError, Result};
use crate::manifest::digest::Digest;
use crate::manifest::naming::{model_name_from_relative_path, projector_file_name};
use crate::manifest::types::{
    Discovery, Extraction, LayerKind, Manifest, ModelInfo, RejectedLayer, SkipReason,
    SkippedManifest,
};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::trace;
use walkdir::WalkDir;

/// Discover every model under `manifests_dir`.
///
/// Traversal is sorted by file name, so the result order is stable for a
/// given tree. Hidden files are ignored; hidden directories are still walked.
pub fn discover_models(manifests_dir: &Path) -> Result<Discovery> {
    check_root(manifests_dir)?;

    let mut discovery = Discovery::default();

    for entry in WalkDir::new(manifests_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(MirrorError::ManifestRootUnreadable {
                    path: manifests_dir.to_path_buf(),
                    message: err.to_string(),
                });
            }
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| manifests_dir.to_path_buf());
                trace!("Skipping unreadable entry {}: {}", path.display(), err);
                discovery.skipped.push(SkippedManifest {
                    path,
                    reason: SkipReason::Unreadable(err.to_string()),
                });
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        match scan_manifest(manifests_dir, entry.path()) {
            Ok(Extraction {
                model,
                rejected_digests,
            }) => {
                trace!(
                    "Found {} (main blob {}, {} additional)",
                    model.name,
                    model.main_model_blob,
                    model.additional_blobs.len()
                );
                for digest in rejected_digests {
                    trace!("Dropping auxiliary layer {:?} of {}", digest, model.name);
                    discovery.rejected_layers.push(RejectedLayer {
                        path: entry.path().to_path_buf(),
                        model: model.name.clone(),
                        digest,
                    });
                }
                discovery.models.push(model);
            }
            Err(reason) => {
                trace!("Skipping manifest {}: {}", entry.path().display(), reason);
                discovery.skipped.push(SkippedManifest {
                    path: entry.path().to_path_buf(),
                    reason,
                });
            }
        }
    }

    Ok(discovery)
}

fn check_root(manifests_dir: &Path) -> Result<()> {
    let metadata =
        std::fs::metadata(manifests_dir).map_err(|e| MirrorError::ManifestRootUnreadable {
            path: manifests_dir.to_path_buf(),
            message: e.to_string(),
        })?;

    if !metadata.is_dir() {
        return Err(MirrorError::ManifestRootUnreadable {
            path: manifests_dir.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    Ok(())
}

/// Read, parse and name a single manifest file.
fn scan_manifest(
    manifests_dir: &Path,
    path: &Path,
) -> std::result::Result<Extraction, SkipReason> {
    let data =
        std::fs::read_to_string(path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;

    let manifest: Manifest =
        serde_json::from_str(&data).map_err(|e| SkipReason::InvalidManifest(e.to_string()))?;

    let relative = path.strip_prefix(manifests_dir).unwrap_or(path);
    let name = model_name_from_relative_path(relative).ok_or(SkipReason::UnexpectedPath)?;

    extract_model_info(name, &manifest)
}

/// Pull the primary and auxiliary blobs out of a parsed manifest.
///
/// When several layers carry the model media type, the last one wins, and
/// only that digest has to be valid. Auxiliary layers with a malformed digest
/// are left out and reported in [`Extraction::rejected_digests`].
pub fn extract_model_info(
    name: String,
    manifest: &Manifest,
) -> std::result::Result<Extraction, SkipReason> {
    let mut main_model_digest = None;
    let mut additional_blobs = BTreeMap::new();
    let mut rejected_digests = Vec::new();

    for layer in &manifest.layers {
        match layer.kind() {
            LayerKind::Model => main_model_digest = Some(layer.digest.as_str()),
            LayerKind::Projector => match Digest::parse(&layer.digest) {
                Ok(digest) => {
                    additional_blobs.insert(digest, projector_file_name(&name));
                }
                Err(MirrorError::InvalidDigest(raw)) => rejected_digests.push(raw),
                Err(_) => rejected_digests.push(layer.digest.clone()),
            },
            LayerKind::Other => {}
        }
    }

    let Some(raw) = main_model_digest else {
        return Err(SkipReason::MissingModelLayer { model: name });
    };
    let main_model_blob = match Digest::parse(raw) {
        Ok(digest) => digest,
        Err(MirrorError::InvalidDigest(raw)) => return Err(SkipReason::InvalidDigest(raw)),
        Err(_) => return Err(SkipReason::InvalidDigest(raw.to_string())),
    };

    Ok(Extraction {
        model: ModelInfo {
            name,
            main_model_blob,
            additional_blobs,
        },
        rejected_digests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MediaTypes;
    use crate::manifest::types::Descriptor;
    use tempfile::TempDir;

    fn layer(media_type: &str, digest: &str) -> Descriptor {
        Descriptor {
            media_type: media_type.to_string(),
            digest: digest.to_string(),
            size: 1,
        }
    }

    fn manifest_with(layers: Vec<Descriptor>) -> Manifest {
        Manifest {
            schema_version: 2,
            media_type: None,
            config: layer("application/vnd.docker.container.image.v1+json", "sha256:cfg"),
            layers,
        }
    }

    fn write_manifest(root: &Path, rel: &str, layers: &[(&str, &str)]) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let layers: Vec<_> = layers
            .iter()
            .map(|(m, d)| serde_json::json!({"mediaType": m, "digest": d, "size": 1}))
            .collect();
        let doc = serde_json::json!({
            "schemaVersion": 2,
            "mediaType": "application/vnd.docker.distribution.manifest.v2+json",
            "config": {"mediaType": "application/vnd.docker.container.image.v1+json", "digest": "sha256:cfg", "size": 1},
            "layers": layers,
        });
        std::fs::write(path, serde_json::to_vec(&doc).unwrap()).unwrap();
    }

    #[test]
    fn test_extract_main_and_projector() {
        let manifest = manifest_with(vec![
            layer(MediaTypes::MODEL, "sha256:aaa111"),
            layer(MediaTypes::PROJECTOR, "sha256:bbb222"),
            layer("application/vnd.ollama.image.template", "not a digest"),
        ]);

        let extraction = extract_model_info("llava-7b".into(), &manifest).unwrap();
        assert!(extraction.rejected_digests.is_empty());
        let model = extraction.model;
        assert_eq!(model.main_model_blob.as_str(), "sha256:aaa111");
        assert_eq!(model.additional_blobs.len(), 1);
        assert_eq!(
            model.additional_blobs[&Digest::parse("sha256:bbb222").unwrap()],
            "llava-7b-projector.bin"
        );
    }

    #[test]
    fn test_last_model_layer_wins() {
        let manifest = manifest_with(vec![
            layer(MediaTypes::MODEL, "sha256:first"),
            layer(MediaTypes::MODEL, "sha256:second"),
        ]);

        let model = extract_model_info("m-v".into(), &manifest).unwrap().model;
        assert_eq!(model.main_model_blob.as_str(), "sha256:second");
    }

    #[test]
    fn test_only_winning_model_digest_is_validated() {
        let manifest = manifest_with(vec![
            layer(MediaTypes::MODEL, "not a digest"),
            layer(MediaTypes::MODEL, "sha256:second"),
        ]);

        let model = extract_model_info("m-v".into(), &manifest).unwrap().model;
        assert_eq!(model.main_model_blob.as_str(), "sha256:second");
    }

    #[test]
    fn test_bad_projector_digest_keeps_model() {
        let manifest = manifest_with(vec![
            layer(MediaTypes::MODEL, "sha256:aaa111"),
            layer(MediaTypes::PROJECTOR, "sha256:bb/b"),
        ]);

        let extraction = extract_model_info("llava-7b".into(), &manifest).unwrap();
        assert_eq!(extraction.model.main_model_blob.as_str(), "sha256:aaa111");
        assert!(extraction.model.additional_blobs.is_empty());
        assert_eq!(extraction.rejected_digests, vec!["sha256:bb/b".to_string()]);
    }

    #[test]
    fn test_missing_model_layer() {
        let manifest = manifest_with(vec![layer(MediaTypes::PROJECTOR, "sha256:bbb222")]);
        assert_eq!(
            extract_model_info("m-v".into(), &manifest),
            Err(SkipReason::MissingModelLayer { model: "m-v".into() })
        );
    }

    #[test]
    fn test_invalid_digest_rejects_manifest() {
        let manifest = manifest_with(vec![layer(MediaTypes::MODEL, "sha256:../../x")]);
        assert_eq!(
            extract_model_info("m-v".into(), &manifest),
            Err(SkipReason::InvalidDigest("sha256:../../x".into()))
        );
    }

    #[test]
    fn test_discover_skips_hidden_and_shallow_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_manifest(root, "registry.ollama.ai/library/llama3/8b", &[(MediaTypes::MODEL, "sha256:aaa111")]);
        write_manifest(root, "registry.ollama.ai/library/llama3/.8b.swp", &[(MediaTypes::MODEL, "sha256:hid")]);
        write_manifest(root, "llama3/8b", &[(MediaTypes::MODEL, "sha256:shallow")]);

        let discovery = discover_models(root).unwrap();

        assert_eq!(discovery.models.len(), 1);
        assert_eq!(discovery.models[0].name, "llama3-8b");
        assert_eq!(discovery.skipped.len(), 1);
        assert_eq!(discovery.skipped[0].reason, SkipReason::UnexpectedPath);
        assert_eq!(discovery.skipped[0].path, root.join("llama3/8b"));
    }

    #[test]
    fn test_discover_records_rejected_projector() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_manifest(
            root,
            "registry.ollama.ai/library/llava/7b",
            &[(MediaTypes::MODEL, "sha256:aaa111"), (MediaTypes::PROJECTOR, "sha256:bb/b")],
        );

        let discovery = discover_models(root).unwrap();

        assert_eq!(discovery.models.len(), 1);
        assert_eq!(discovery.models[0].name, "llava-7b");
        assert!(discovery.skipped.is_empty());
        assert_eq!(discovery.rejected_layers.len(), 1);
        assert_eq!(discovery.rejected_layers[0].model, "llava-7b");
        assert_eq!(discovery.rejected_layers[0].digest, "sha256:bb/b");
        assert_eq!(
            discovery.rejected_layers[0].path,
            root.join("registry.ollama.ai/library/llava/7b")
        );
    }

    #[test]
    fn test_discover_walks_hidden_directories() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), ".mirror/library/phi3/mini", &[(MediaTypes::MODEL, "sha256:ccc333")]);

        let discovery = discover_models(temp.path()).unwrap();
        assert_eq!(discovery.models.len(), 1);
        assert_eq!(discovery.models[0].name, "phi3-mini");
    }

    #[test]
    fn test_discover_order_is_sorted() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_manifest(root, "r/library/qwen/7b", &[(MediaTypes::MODEL, "sha256:q")]);
        write_manifest(root, "r/library/gemma/2b", &[(MediaTypes::MODEL, "sha256:g")]);
        write_manifest(root, "r/library/gemma/7b", &[(MediaTypes::MODEL, "sha256:h")]);

        let names: Vec<_> = discover_models(root)
            .unwrap()
            .models
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["gemma-2b", "gemma-7b", "qwen-7b"]);
    }

    #[test]
    fn test_discover_empty_root() {
        let temp = TempDir::new().unwrap();
        let discovery = discover_models(temp.path()).unwrap();
        assert!(discovery.is_empty());
        assert!(discovery.skipped.is_empty());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let err = discover_models(&temp.path().join("manifests")).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_file_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("manifests");
        std::fs::write(&file, b"{}").unwrap();

        let err = discover_models(&file).unwrap_err();
        assert!(matches!(err, MirrorError::ManifestRootUnreadable { .. }));
    }
}
