//! Quiz rows, ingestion and export.

pub mod export;
mod loader;
mod row;
mod source;
mod table;

pub use export::ExportFormat;
pub use loader::{Loader, LoaderConfig};
pub use row::{
    ANSWER_COLUMN, ANSWER_SOURCE_COLUMN, ATTRIBUTE_COLUMN, FULL_ANSWER_COLUMN, Field,
    OPTION_COUNT, QUESTION_COLUMN, REQUIRED_COLUMNS, RESULT_COLUMNS, Row, STATE_COLUMN,
};
pub use source::SourceMetadata;
pub use table::Dataset;
