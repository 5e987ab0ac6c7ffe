//! Outcome types for link materialization.

use crate::error::MirrorError;
use serde::Serialize;
use std::path::PathBuf;

/// A single symlink: `target` will point at `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkAction {
    /// Blob in the Ollama store
    pub source: PathBuf,
    /// Link path in the LM Studio tree
    pub target: PathBuf,
}

/// What happened to one auxiliary link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuxiliaryStatus {
    Created,
    AlreadyExists,
    Failed(String),
}

/// An auxiliary link attempted during a live run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxiliaryLink {
    pub file_name: String,
    pub link: LinkAction,
    pub status: AuxiliaryStatus,
}

/// Result of materializing one model.
#[derive(Debug)]
pub enum MaterializeOutcome {
    /// Something already sits at the primary link path.
    Skipped { primary: PathBuf },
    /// Dry run: links that would be created.
    Planned {
        primary: LinkAction,
        auxiliary: Vec<LinkAction>,
    },
    /// Primary link created; auxiliary links attempted.
    Created {
        primary: LinkAction,
        auxiliary: Vec<AuxiliaryLink>,
    },
    /// Model directory or primary link could not be created.
    Failed { error: MirrorError },
}

impl MaterializeOutcome {
    /// Whether this model counts towards the "created" tally.
    ///
    /// A dry run counts the links it would have created.
    pub fn counts_as_created(&self) -> bool {
        matches!(
            self,
            MaterializeOutcome::Created { .. } | MaterializeOutcome::Planned { .. }
        )
    }
}

/// Outcome for a named model.
#[derive(Debug)]
pub struct ModelReport {
    pub model: String,
    pub outcome: MaterializeOutcome,
}

/// Totals for a whole run.
#[derive(Debug, Default)]
pub struct MirrorSummary {
    /// Models whose primary link was created (or would be)
    pub created: usize,
    /// Models skipped or failed
    pub skipped: usize,
    /// Per-model outcomes in processing order
    pub reports: Vec<ModelReport>,
}

impl MirrorSummary {
    pub fn record(&mut self, report: ModelReport) {
        if report.outcome.counts_as_created() {
            self.created += 1;
        } else {
            self.skipped += 1;
        }
        self.reports.push(report);
    }
}
