// src/schema/types.rs

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::ConfigError;

/// A semantic field of the normalized survey schema.
///
/// The serialized form is the column tag written into renamed datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalColumn {
    Salary,
    Country,
    YearsOfExperience,
    Age,
    #[serde(rename = "language")]
    ProgrammingLanguage,
}

impl CanonicalColumn {
    pub const ALL: [CanonicalColumn; 5] = [
        CanonicalColumn::Salary,
        CanonicalColumn::Country,
        CanonicalColumn::YearsOfExperience,
        CanonicalColumn::Age,
        CanonicalColumn::ProgrammingLanguage,
    ];

    /// Column label used after normalization.
    pub fn tag(self) -> &'static str {
        match self {
            CanonicalColumn::Salary => "salary",
            CanonicalColumn::Country => "country",
            CanonicalColumn::YearsOfExperience => "years_of_experience",
            CanonicalColumn::Age => "age",
            CanonicalColumn::ProgrammingLanguage => "language",
        }
    }
}

impl fmt::Display for CanonicalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CanonicalColumn {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonicalColumn::ALL
            .into_iter()
            .find(|c| c.tag() == s)
            .ok_or_else(|| ConfigError::UnknownCanonicalColumn(s.to_string()))
    }
}
