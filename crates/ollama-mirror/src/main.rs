//! ollama-mirror - make Ollama models loadable from LM Studio.
//!
//! Scans the Ollama manifest tree and symlinks every model's blobs into
//! `{lmstudio}/ollama/{model}/`. Safe to re-run: existing links are skipped.

mod report;

use anyhow::Result;
use clap::Parser;
use ollama_mirror_core::{discover_models, platform, LinkMaterializer, MirrorOptions, MirrorPaths};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use report::Reporter;

#[derive(Parser, Debug)]
#[command(name = "ollama-mirror")]
#[command(about = "Expose Ollama models to LM Studio via symlinks")]
struct Args {
    /// Ollama models directory (defaults to ~/.ollama/models)
    #[arg(long, env = "OLLAMA_MODELS")]
    ollama_dir: Option<PathBuf>,

    /// LM Studio models directory (defaults to ~/.cache/lm-studio/models)
    #[arg(long)]
    lmstudio_dir: Option<PathBuf>,

    /// Show what would be done without creating anything
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn paths(&self) -> Result<MirrorPaths> {
        let ollama_dir = match &self.ollama_dir {
            Some(path) => path.clone(),
            None => platform::default_ollama_dir()?,
        };
        let lmstudio_dir = match &self.lmstudio_dir {
            Some(path) => path.clone(),
            None => platform::default_lmstudio_dir()?,
        };
        Ok(MirrorPaths::new(ollama_dir, lmstudio_dir))
    }

    fn options(&self) -> MirrorOptions {
        MirrorOptions {
            dry_run: self.dry_run,
            verbose: self.verbose,
        }
    }
}

fn init_logging(verbose: bool) {
    // RUST_LOG wins over --verbose.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let paths = args.paths()?;
    let options = args.options();
    let reporter = Reporter::new(options);
    debug!("Resolved paths: {:?}", paths);

    reporter.banner(&paths);

    let discovery = discover_models(&paths.manifests_dir())?;
    reporter.skipped_manifests(&discovery.skipped);
    reporter.rejected_layers(&discovery.rejected_layers);

    if discovery.is_empty() {
        reporter.no_models();
        return Ok(());
    }
    reporter.discovered(&discovery.models);

    let materializer = LinkMaterializer::new(&paths, options);
    let summary = materializer.materialize_all_with(&discovery.models, |r| reporter.model(r));

    reporter.summary(&summary);

    Ok(())
}
