pub mod layout;
pub mod mapping;
pub mod types;

pub use layout::{MappingTable, SurveyLayout, SurveySource};
pub use mapping::ColumnMapping;
pub use types::CanonicalColumn;
