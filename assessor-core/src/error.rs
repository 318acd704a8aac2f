use std::io::Error as IoError;
use std::path::PathBuf;

use csv::Error as CsvError;
use serde_json::Error as JsonError;
use thiserror::Error;
use toml::de::Error as TomlError;

#[derive(Error, Debug)]
pub enum AssessorError {
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] JsonError),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] TomlError),

    #[error("Reference table not found: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("Reference table is missing required columns: {}", .missing.join(", "))]
    MalformedSchema { missing: Vec<String> },

    #[error("Row {row}: {reason}")]
    RowConversion { row: usize, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Export failed: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, AssessorError>;
