// src/process/mod.rs
use anyhow::{bail, Context, Result};
use arrow::{
    csv::ReaderBuilder,
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::{
    fs::{self, File},
    io::BufReader,
    path::Path,
    sync::Arc,
    time::Instant,
};
use tracing::{debug, info};

use crate::schema::SurveyLayout;

pub mod dataset;
pub mod normalize;
pub mod rename;
pub mod utils;

pub use dataset::{Dataset, SurveyDataset};
pub use normalize::normalize_all;
pub use rename::{rename_columns, RenameReport};

use utils::clean_header;

/// Rows per Arrow batch when reading a survey file.
const BATCH_SIZE: usize = 8_192;

/// Read only the header row of a CSV file.
fn read_headers(path: &Path) -> Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path))?;
    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("Failed to read header row of {:?}", path))?
        .iter()
        .map(clean_header)
        .collect();
    if headers.is_empty() {
        bail!("CSV file {:?} has no header row", path);
    }
    Ok(headers)
}

/// Load one survey CSV into memory with every column typed as `Utf8`.
///
/// Empty cells, and trailing cells missing from short rows, become nulls.
/// Rows wider than the header are rejected.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let start = Instant::now();

    let headers = read_headers(path)?;
    let fields: Vec<Field> = headers
        .iter()
        .map(|n| Field::new(n, DataType::Utf8, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let file = File::open(path).with_context(|| format!("Failed to open CSV file: {:?}", path))?;
    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .with_batch_size(BATCH_SIZE)
        .with_truncated_rows(true)
        .build(BufReader::new(file))
        .with_context(|| format!("creating CSV reader for {:?}", path))?;

    let batches = reader
        .collect::<Result<Vec<RecordBatch>, _>>()
        .with_context(|| format!("CSV parse error in {:?}", path))?;

    let dataset = Dataset::new(schema, batches);
    debug!(
        rows = dataset.num_rows(),
        columns = dataset.num_columns(),
        elapsed = ?start.elapsed(),
        "loaded"
    );
    Ok(dataset)
}

/// Load every source of `layout`, in order, before anything is renamed.
pub fn load_all(layout: &SurveyLayout) -> Result<Vec<SurveyDataset>> {
    let mut out = Vec::with_capacity(layout.sources.len());
    for src in &layout.sources {
        info!(year = %src.year, path = %src.path.display(), "loading survey");
        let dataset = load_dataset(&src.path)
            .with_context(|| format!("loading survey for year {}", src.year))?;
        out.push(SurveyDataset {
            year: src.year.clone(),
            dataset,
        });
    }
    Ok(out)
}

/// Create `output_dir`, load all surveys, then normalize their column names.
///
/// Nothing is written to `output_dir`; the renamed datasets are returned.
pub fn run_pipeline(layout: &SurveyLayout, output_dir: &Path) -> Result<Vec<SurveyDataset>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {:?}", output_dir))?;

    let mut datasets = load_all(layout)?;
    info!("loaded {} surveys", datasets.len());

    let reports = normalize_all(&mut datasets, &layout.mappings)?;
    for (year, report) in &reports {
        info!(
            year = %year,
            renamed = report.renamed.len(),
            missing = report.missing.len(),
            "normalized"
        );
    }
    Ok(datasets)
}
