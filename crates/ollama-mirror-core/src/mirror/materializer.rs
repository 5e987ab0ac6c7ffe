//! Link materializer.
//!
//! Builds `{provider}/{model}/{model}.gguf` symlinks (plus auxiliary links such
//! as projectors) pointing into the Ollama blob store. Existing paths are never
//! touched, so re-running after an interrupted run picks up where it stopped.

use crate::config::{MirrorOptions, MirrorPaths};
use crate::error::MirrorError;
use crate::manifest::{primary_file_name, ModelInfo};
use crate::mirror::types::{
    AuxiliaryLink, AuxiliaryStatus, LinkAction, MaterializeOutcome, MirrorSummary, ModelReport,
};
use crate::platform::{create_symlink, entry_exists};
use std::path::PathBuf;
use tracing::trace;

/// Creates the LM Studio side of the mirror.
#[derive(Debug, Clone)]
pub struct LinkMaterializer {
    /// Ollama blob store
    blobs_dir: PathBuf,
    /// `{lmstudio}/ollama`
    provider_dir: PathBuf,
    /// Describe links instead of creating them
    dry_run: bool,
}

impl LinkMaterializer {
    pub fn new(paths: &MirrorPaths, options: MirrorOptions) -> Self {
        Self {
            blobs_dir: paths.blobs_dir(),
            provider_dir: paths.provider_dir(),
            dry_run: options.dry_run,
        }
    }

    /// Directory holding all links for `model`.
    pub fn model_dir(&self, model: &ModelInfo) -> PathBuf {
        self.provider_dir.join(&model.name)
    }

    /// The primary link for `model`.
    pub fn primary_link(&self, model: &ModelInfo) -> LinkAction {
        LinkAction {
            source: model.main_model_blob.blob_path(&self.blobs_dir),
            target: self.model_dir(model).join(primary_file_name(&model.name)),
        }
    }

    /// Auxiliary links for `model`, in digest order.
    pub fn auxiliary_links(&self, model: &ModelInfo) -> Vec<(String, LinkAction)> {
        let model_dir = self.model_dir(model);
        model
            .additional_blobs
            .iter()
            .map(|(digest, file_name)| {
                (
                    file_name.clone(),
                    LinkAction {
                        source: digest.blob_path(&self.blobs_dir),
                        target: model_dir.join(file_name),
                    },
                )
            })
            .collect()
    }

    /// Materialize a single model.
    pub fn materialize(&self, model: &ModelInfo) -> MaterializeOutcome {
        let primary = self.primary_link(model);

        if entry_exists(&primary.target) {
            trace!("{} already exists, skipping", primary.target.display());
            return MaterializeOutcome::Skipped {
                primary: primary.target,
            };
        }

        if self.dry_run {
            let auxiliary = self
                .auxiliary_links(model)
                .into_iter()
                .map(|(_, link)| link)
                .collect();
            return MaterializeOutcome::Planned { primary, auxiliary };
        }

        let model_dir = self.model_dir(model);
        if let Err(e) = std::fs::create_dir_all(&model_dir) {
            trace!("Could not create {}: {}", model_dir.display(), e);
            return MaterializeOutcome::Failed {
                error: MirrorError::io_with_path(e, model_dir),
            };
        }

        if let Err(error) = create_symlink(&primary.source, &primary.target) {
            trace!("{}", error);
            return MaterializeOutcome::Failed { error };
        }
        trace!(
            "Linked {} -> {}",
            primary.target.display(),
            primary.source.display()
        );

        let auxiliary = self
            .auxiliary_links(model)
            .into_iter()
            .map(|(file_name, link)| {
                let status = link_auxiliary(&link);
                AuxiliaryLink {
                    file_name,
                    link,
                    status,
                }
            })
            .collect();

        MaterializeOutcome::Created { primary, auxiliary }
    }

    /// Materialize every model in order.
    pub fn materialize_all(&self, models: &[ModelInfo]) -> MirrorSummary {
        self.materialize_all_with(models, |_| {})
    }

    /// Like [`materialize_all`](Self::materialize_all), calling `on_report`
    /// after each model so progress can be shown as it happens.
    pub fn materialize_all_with<F>(&self, models: &[ModelInfo], mut on_report: F) -> MirrorSummary
    where
        F: FnMut(&ModelReport),
    {
        let mut summary = MirrorSummary::default();

        for model in models {
            let report = ModelReport {
                model: model.name.clone(),
                outcome: self.materialize(model),
            };
            on_report(&report);
            summary.record(report);
        }

        summary
    }
}

fn link_auxiliary(link: &LinkAction) -> AuxiliaryStatus {
    if entry_exists(&link.target) {
        return AuxiliaryStatus::AlreadyExists;
    }

    match create_symlink(&link.source, &link.target) {
        Ok(()) => {
            trace!(
                "Linked {} -> {}",
                link.target.display(),
                link.source.display()
            );
            AuxiliaryStatus::Created
        }
        Err(e) => {
            trace!("{}", e);
            AuxiliaryStatus::Failed(e.to_string())
        }
    }
}
