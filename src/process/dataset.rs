use arrow::{
    array::{Array, StringArray},
    datatypes::{Field, Schema, SchemaRef},
    error::ArrowError,
    record_batch::RecordBatch,
};
use std::sync::Arc;

/// One year's responses held in memory: a string-typed schema plus its batches.
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

/// A dataset tagged with the survey year it came from.
#[derive(Debug, Clone)]
pub struct SurveyDataset {
    pub year: String,
    pub dataset: Dataset,
}

impl Dataset {
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    pub fn schema(&self) -> SchemaRef {
        Arc::clone(&self.schema)
    }

    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    pub fn column_names(&self) -> Vec<String> {
        self.schema.fields().iter().map(|f| f.name().clone()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.schema.fields().iter().any(|f| f.name() == name)
    }

    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    /// All values of the first column called `name`, across batches, in row order.
    /// Returns `None` if no such column exists.
    pub fn column_values(&self, name: &str) -> Option<Vec<Option<String>>> {
        let idx = self.schema.index_of(name).ok()?;
        let mut out = Vec::with_capacity(self.num_rows());
        for batch in &self.batches {
            let col = batch.column(idx);
            let sarr = col.as_any().downcast_ref::<StringArray>()?;
            out.extend(sarr.iter().map(|v| v.map(str::to_string)));
        }
        Some(out)
    }

    /// Swap in new field labels, keeping every column array as-is.
    ///
    /// `fields` must line up one-to-one with the current schema. On error the
    /// dataset is left unchanged.
    pub(crate) fn relabel(&mut self, fields: Vec<Field>) -> Result<(), ArrowError> {
        if fields.len() != self.schema.fields().len() {
            return Err(ArrowError::SchemaError(format!(
                "expected {} fields, got {}",
                self.schema.fields().len(),
                fields.len()
            )));
        }
        let schema = Arc::new(Schema::new_with_metadata(
            fields,
            self.schema.metadata().clone(),
        ));
        let batches = self
            .batches
            .iter()
            .map(|b| RecordBatch::try_new(Arc::clone(&schema), b.columns().to_vec()))
            .collect::<Result<Vec<_>, _>>()?;

        self.schema = schema;
        self.batches = batches;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::Result;
    use arrow::{array::ArrayRef, datatypes::DataType};

    /// Build a single-batch dataset of string columns; `None` cells become nulls.
    pub(crate) fn dataset_from(columns: &[(&str, Vec<Option<&str>>)]) -> Result<Dataset> {
        let fields: Vec<Field> = columns
            .iter()
            .map(|(name, _)| Field::new(*name, DataType::Utf8, true))
            .collect();
        let schema = Arc::new(Schema::new(fields));
        let arrays: Vec<ArrayRef> = columns
            .iter()
            .map(|(_, vals)| Arc::new(StringArray::from(vals.clone())) as ArrayRef)
            .collect();
        let batch = RecordBatch::try_new(Arc::clone(&schema), arrays)?;
        Ok(Dataset::new(schema, vec![batch]))
    }

    #[test]
    fn accessors_report_shape_and_values() -> Result<()> {
        let ds = dataset_from(&[
            ("Salary", vec![Some("100"), None]),
            ("Country", vec![Some("NZ"), Some("DK")]),
        ])?;
        assert_eq!(ds.num_rows(), 2);
        assert_eq!(ds.num_columns(), 2);
        assert_eq!(ds.column_names(), vec!["Salary", "Country"]);
        assert!(ds.has_column("Country"));
        assert_eq!(
            ds.column_values("Salary"),
            Some(vec![Some("100".to_string()), None])
        );
        assert_eq!(ds.column_values("Age"), None);
        Ok(())
    }

    #[test]
    fn relabel_shares_column_arrays() -> Result<()> {
        let mut ds = dataset_from(&[("A", vec![Some("x")]), ("B", vec![Some("y")])])?;
        let before = Arc::clone(ds.batches()[0].column(0));

        ds.relabel(vec![
            Field::new("a", DataType::Utf8, true),
            Field::new("B", DataType::Utf8, true),
        ])?;

        assert_eq!(ds.column_names(), vec!["a", "B"]);
        assert!(Arc::ptr_eq(&before, ds.batches()[0].column(0)));
        assert_eq!(ds.batches()[0].schema(), ds.schema());
        Ok(())
    }

    #[test]
    fn relabel_with_wrong_width_leaves_dataset_alone() -> Result<()> {
        let mut ds = dataset_from(&[("A", vec![Some("x")])])?;
        let res = ds.relabel(vec![]);
        assert!(res.is_err());
        assert_eq!(ds.column_names(), vec!["A"]);
        Ok(())
    }
}
