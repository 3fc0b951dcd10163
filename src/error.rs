
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowsiftError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Load error: {0}")]
    Load(String),
    #[error("Empty source: {0}")]
    EmptySource(String),
    #[error("Save error: {0}")]
    Save(String),
    #[error("No table loaded")]
    NoTable,
    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, RowsiftError>;

// Helper conversions
impl From<arrow::error::ArrowError> for RowsiftError {
    fn from(e: arrow::error::ArrowError) -> Self { Self::Load(e.to_string()) }
}
impl From<config::ConfigError> for RowsiftError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
