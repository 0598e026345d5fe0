// src/schema/layout.rs

use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use super::{CanonicalColumn, ColumnMapping};
use crate::error::ConfigError;

/// Year → mapping lookup table.
pub type MappingTable = BTreeMap<String, ColumnMapping>;

/// One survey edition and the CSV file holding its responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySource {
    pub year: String,
    pub path: PathBuf,
}

/// Which files to load (in order) and how each year's columns are renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyLayout {
    pub sources: Vec<SurveySource>,
    #[serde(default)]
    pub mappings: MappingTable,
}

const DEFAULT_SOURCES: [(&str, &str); 10] = [
    ("2015", "data/2015 Stack Overflow Developer Survey Responses.csv"),
    (
        "2016",
        "data/2016 Stack Overflow Survey Results/2016 Stack Overflow Survey Responses.csv",
    ),
    ("2017", "data/stack-overflow-developer-survey-2017/survey_results_public.csv"),
    ("2018", "data/stack-overflow-developer-survey-2018/survey_results_public.csv"),
    ("2019", "data/stack-overflow-developer-survey-2019/survey_results_public.csv"),
    ("2020", "data/stack-overflow-developer-survey-2020/survey_results_public.csv"),
    ("2021", "data/stack-overflow-developer-survey-2021/survey_results_public.csv"),
    ("2022", "data/stack-overflow-developer-survey-2022/survey_results_public.csv"),
    ("2023", "data/stack-overflow-developer-survey-2023/survey_results_public.csv"),
    ("2024", "data/stack-overflow-developer-survey-2024/survey_results_public.csv"),
];

impl Default for SurveyLayout {
    /// Built-in layout. Only "2011" has a mapping, so a run over the
    /// 2015–2024 sources stops at the first year.
    fn default() -> Self {
        let sources = DEFAULT_SOURCES
            .iter()
            .map(|(year, path)| SurveySource {
                year: (*year).to_string(),
                path: PathBuf::from(path),
            })
            .collect();

        let mut mappings = MappingTable::new();
        mappings.insert(
            "2011".to_string(),
            ColumnMapping::new()
                .with(CanonicalColumn::Salary, "Salary")
                .with(CanonicalColumn::Country, "Country")
                .with(
                    CanonicalColumn::YearsOfExperience,
                    "Years IT / Programming Experience",
                )
                .with(CanonicalColumn::Age, "Age")
                .with(
                    CanonicalColumn::ProgrammingLanguage,
                    "Which languages are you proficient in?",
                ),
        );

        Self { sources, mappings }
    }
}

impl SurveyLayout {
    /// Load a layout from `.yaml`/`.yml` or `.json`, then validate it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let text = match ext.as_deref() {
            Some("yaml" | "yml" | "json") => fs::read_to_string(path)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        let layout = if ext.as_deref() == Some("json") {
            Self::from_json_str(&text)?
        } else {
            Self::from_yaml_str(&text)?
        };
        debug!(
            path = %path.display(),
            sources = layout.sources.len(),
            mappings = layout.mappings.len(),
            "loaded survey layout"
        );
        Ok(layout)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let layout: Self = serde_yaml::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let layout: Self = serde_json::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Reject repeated source years and mappings that reuse a raw column name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut years = HashSet::with_capacity(self.sources.len());
        for src in &self.sources {
            if !years.insert(src.year.as_str()) {
                return Err(ConfigError::DuplicateSource {
                    year: src.year.clone(),
                });
            }
        }
        for (year, mapping) in &self.mappings {
            if let Some(raw) = mapping.first_duplicate_raw() {
                return Err(ConfigError::DuplicateRawColumn {
                    year: year.clone(),
                    raw: raw.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Resolve relative source paths against `root`; absolute paths are kept.
    pub fn with_data_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        let root = root.as_ref();
        for src in &mut self.sources {
            if src.path.is_relative() {
                src.path = root.join(&src.path);
            }
        }
        self
    }

    pub fn mapping_for(&self, year: &str) -> Option<&ColumnMapping> {
        self.mappings.get(year)
    }
}
