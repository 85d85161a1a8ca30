use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset is missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid value {value:?} in column '{column}' at row {row}")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("No data available")]
    EmptyDataset,

    #[error("Model error: {0}")]
    Model(String),

    #[error("Feature schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
