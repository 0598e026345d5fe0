use arrow::{datatypes::Field, error::ArrowError};
use std::collections::HashSet;
use tracing::{debug, warn};

use super::Dataset;
use crate::schema::{CanonicalColumn, ColumnMapping};

/// What a single mapping did to a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameReport {
    /// `(raw name, canonical column)` for every label that was replaced.
    pub renamed: Vec<(String, CanonicalColumn)>,
    /// Mapped raw names that the dataset carries neither raw nor already renamed.
    pub missing: Vec<String>,
}

impl RenameReport {
    pub fn is_noop(&self) -> bool {
        self.renamed.is_empty()
    }
}

/// Replace every column label found among `mapping`'s raw names with the
/// matching canonical tag. Unmapped columns and all row data are left alone.
///
/// A second call with the same mapping finds nothing to rename.
pub fn rename_columns(
    dataset: &mut Dataset,
    mapping: &ColumnMapping,
) -> Result<RenameReport, ArrowError> {
    let schema = dataset.schema();
    let mut report = RenameReport::default();

    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|f| match mapping.canonical_for(f.name()) {
            Some(col) => {
                report.renamed.push((f.name().clone(), col));
                (**f).clone().with_name(col.tag())
            }
            None => (**f).clone(),
        })
        .collect();

    let present: HashSet<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    for (col, raw) in mapping.iter() {
        // An already-normalized column counts as done, not missing.
        if !present.contains(raw) && !present.contains(col.tag()) {
            warn!(raw, tag = col.tag(), "mapped column not present in dataset");
            report.missing.push(raw.to_string());
        }
    }

    if report.is_noop() {
        return Ok(report);
    }

    dataset.relabel(fields)?;
    debug!(renamed = report.renamed.len(), "relabelled columns");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::dataset::tests::dataset_from;
    use anyhow::Result;

    fn mapping() -> ColumnMapping {
        ColumnMapping::new()
            .with(CanonicalColumn::Salary, "Salary")
            .with(CanonicalColumn::ProgrammingLanguage, "LanguageWorkedWith")
            .with(CanonicalColumn::Age, "Age")
    }

    #[test]
    fn renames_mapped_columns_only() -> Result<()> {
        let mut ds = dataset_from(&[
            ("Respondent", vec![Some("1"), Some("2")]),
            ("Salary", vec![Some("10"), None]),
            ("LanguageWorkedWith", vec![Some("Rust;C"), Some("Go")]),
        ])?;

        let report = rename_columns(&mut ds, &mapping())?;

        assert_eq!(ds.column_names(), vec!["Respondent", "salary", "language"]);
        assert_eq!(
            report.renamed,
            vec![
                ("Salary".to_string(), CanonicalColumn::Salary),
                (
                    "LanguageWorkedWith".to_string(),
                    CanonicalColumn::ProgrammingLanguage
                ),
            ]
        );
        assert_eq!(report.missing, vec!["Age".to_string()]);
        assert_eq!(ds.num_rows(), 2);
        assert_eq!(
            ds.column_values("salary"),
            Some(vec![Some("10".to_string()), None])
        );
        assert_eq!(
            ds.column_values("Respondent"),
            Some(vec![Some("1".to_string()), Some("2".to_string())])
        );
        Ok(())
    }

    #[test]
    fn second_pass_is_a_noop() -> Result<()> {
        let mut ds = dataset_from(&[("Salary", vec![Some("10")]), ("Age", vec![Some("33")])])?;
        rename_columns(&mut ds, &mapping())?;
        let schema_after_first = ds.schema();

        let report = rename_columns(&mut ds, &mapping())?;

        assert!(report.is_noop());
        assert!(report.missing.is_empty());
        assert!(std::sync::Arc::ptr_eq(&schema_after_first, &ds.schema()));
        assert_eq!(ds.column_names(), vec!["salary", "age"]);
        Ok(())
    }

    #[test]
    fn empty_mapping_changes_nothing() -> Result<()> {
        let mut ds = dataset_from(&[("Salary", vec![Some("10")])])?;
        let report = rename_columns(&mut ds, &ColumnMapping::new())?;
        assert!(report.is_noop());
        assert!(report.missing.is_empty());
        assert_eq!(ds.column_names(), vec!["Salary"]);
        Ok(())
    }

    #[test]
    fn renaming_is_case_sensitive() -> Result<()> {
        let mut ds = dataset_from(&[("salary", vec![Some("1")]), ("SALARY", vec![Some("2")])])?;
        let report = rename_columns(&mut ds, &mapping())?;
        assert!(report.is_noop());
        assert_eq!(ds.column_names(), vec!["salary", "SALARY"]);
        Ok(())
    }
}
