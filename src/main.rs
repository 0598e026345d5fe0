use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use surveyclean::{process, schema::SurveyLayout};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Normalize yearly survey CSV column names into a common schema"
)]
struct Args {
    /// Directory to create for cleaned output
    #[arg(long, default_value = "data_clean")]
    output_dir: PathBuf,

    /// Survey layout (YAML or JSON); the built-in layout is used if omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base directory for relative source paths
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_filter = if args.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) resolve layout ───────────────────────────────────────────
    let mut layout = match &args.config {
        Some(path) => SurveyLayout::from_path(path)
            .with_context(|| format!("loading survey layout {}", path.display()))?,
        None => SurveyLayout::default(),
    };
    if let Some(root) = &args.data_root {
        layout = layout.with_data_root(root);
    }
    info!(
        sources = layout.sources.len(),
        mappings = layout.mappings.len(),
        "survey layout ready"
    );

    // ─── 3) load + normalize ─────────────────────────────────────────
    let datasets = process::run_pipeline(&layout, &args.output_dir)?;

    info!("all done: {} surveys normalized", datasets.len());
    Ok(())
}
