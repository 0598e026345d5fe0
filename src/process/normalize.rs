use tracing::{error, info};

use super::{rename_columns, RenameReport, SurveyDataset};
use crate::error::NormalizeError;
use crate::schema::MappingTable;

/// Apply each year's mapping to its dataset, in collection order.
///
/// The mapping is looked up before the year's dataset is touched. The first
/// year without one aborts the whole pass; later years are not visited.
pub fn normalize_all(
    datasets: &mut [SurveyDataset],
    mappings: &MappingTable,
) -> Result<Vec<(String, RenameReport)>, NormalizeError> {
    let mut reports = Vec::with_capacity(datasets.len());

    for SurveyDataset { year, dataset } in datasets.iter_mut() {
        let Some(mapping) = mappings.get(year.as_str()) else {
            error!(year = %year, "no column mapping configured");
            return Err(NormalizeError::MissingColumnMapping { year: year.clone() });
        };

        let report = rename_columns(dataset, mapping).map_err(|source| {
            NormalizeError::Relabel {
                year: year.clone(),
                source,
            }
        })?;
        info!(year = %year, renamed = report.renamed.len(), "renamed columns");
        reports.push((year.clone(), report));
    }

    Ok(reports)
}
