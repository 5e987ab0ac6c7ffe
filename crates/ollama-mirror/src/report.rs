//! Console report.
//!
//! Stdout is the tool's only reporting channel. Each section is built as a
//! list of lines first so the wording can be tested without capturing stdout.

use ollama_mirror_core::{
    AuxiliaryStatus, MaterializeOutcome, MirrorError, MirrorOptions, MirrorPaths, MirrorSummary,
    ModelInfo, ModelReport, RejectedLayer, SkippedManifest,
};

pub struct Reporter {
    options: MirrorOptions,
}

impl Reporter {
    pub fn new(options: MirrorOptions) -> Self {
        Self { options }
    }

    pub fn banner(&self, paths: &MirrorPaths) {
        emit(self.banner_lines(paths));
    }

    pub fn skipped_manifests(&self, skipped: &[SkippedManifest]) {
        emit(self.skipped_lines(skipped));
    }

    pub fn rejected_layers(&self, rejected: &[RejectedLayer]) {
        emit(self.rejected_lines(rejected));
    }

    pub fn no_models(&self) {
        println!("No models found in Ollama directory");
    }

    pub fn discovered(&self, models: &[ModelInfo]) {
        emit(self.discovered_lines(models));
    }

    pub fn model(&self, report: &ModelReport) {
        emit(self.model_lines(report));
    }

    pub fn summary(&self, summary: &MirrorSummary) {
        emit(self.summary_lines(summary));
    }

    fn banner_lines(&self, paths: &MirrorPaths) -> Vec<String> {
        let mut lines = vec![
            format!("Scanning Ollama models in: {}", paths.ollama_dir().display()),
            format!("Target LM Studio directory: {}", paths.lmstudio_dir().display()),
        ];
        if self.options.dry_run {
            lines.push("DRY RUN MODE - No changes will be made".to_string());
        }
        lines.push(String::new());
        lines
    }

    fn skipped_lines(&self, skipped: &[SkippedManifest]) -> Vec<String> {
        if !self.options.verbose {
            return Vec::new();
        }
        skipped
            .iter()
            .map(|s| format!("Warning: {} ({})", s.reason, s.path.display()))
            .collect()
    }

    fn rejected_lines(&self, rejected: &[RejectedLayer]) -> Vec<String> {
        if !self.options.verbose {
            return Vec::new();
        }
        rejected
            .iter()
            .map(|r| {
                format!(
                    "Warning: {}: ignoring layer with invalid digest {:?} ({})",
                    r.model,
                    r.digest,
                    r.path.display()
                )
            })
            .collect()
    }

    fn discovered_lines(&self, models: &[ModelInfo]) -> Vec<String> {
        let mut lines = vec![format!("Found {} models:", models.len())];
        lines.extend(models.iter().map(|m| format!("  - {}", m.name)));
        lines.push(String::new());
        lines
    }

    fn model_lines(&self, report: &ModelReport) -> Vec<String> {
        let name = &report.model;
        let verbose = self.options.verbose;

        match &report.outcome {
            MaterializeOutcome::Skipped { .. } => {
                vec![format!("SKIPPED: {} (already exists)", name)]
            }
            MaterializeOutcome::Planned { primary, auxiliary } => {
                let mut lines = vec![format!("CREATING: {}", name)];
                lines.extend(std::iter::once(primary).chain(auxiliary).map(|link| {
                    format!(
                        "  Would create: {} -> {}",
                        link.target.display(),
                        link.source.display()
                    )
                }));
                lines
            }
            MaterializeOutcome::Created { primary, auxiliary } => {
                let mut lines = vec![format!("CREATING: {}", name)];
                if verbose {
                    lines.push(format!(
                        "  Main model: {} -> {}",
                        primary.target.display(),
                        primary.source.display()
                    ));
                }
                for aux in auxiliary {
                    match &aux.status {
                        AuxiliaryStatus::Created if verbose => lines.push(format!(
                            "  Additional: {} -> {}",
                            aux.link.target.display(),
                            aux.link.source.display()
                        )),
                        AuxiliaryStatus::AlreadyExists if verbose => lines.push(format!(
                            "  Additional component {} already exists",
                            aux.file_name
                        )),
                        AuxiliaryStatus::Failed(reason) => lines.push(format!(
                            "Warning: Could not create additional symlink {}: {}",
                            aux.file_name, reason
                        )),
                        _ => {}
                    }
                }
                lines
            }
            MaterializeOutcome::Failed { error } => {
                let what = match error {
                    MirrorError::SymlinkFailed { .. } => "symlink",
                    _ => "directory",
                };
                vec![
                    format!("CREATING: {}", name),
                    format!("ERROR: Could not create {} for {}: {}", what, name, error),
                ]
            }
        }
    }

    fn summary_lines(&self, summary: &MirrorSummary) -> Vec<String> {
        let mut lines = vec![
            String::new(),
            format!(
                "Summary: {} created, {} skipped",
                summary.created, summary.skipped
            ),
        ];
        if summary.created > 0 && !self.options.dry_run {
            lines.push(
                "Models are now available in LM Studio under the 'ollama' provider".to_string(),
            );
        }
        lines
    }
}

fn emit(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}
