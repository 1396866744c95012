use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("row has {found} cells but the table has {expected} columns")]
    RowWidth { expected: usize, found: usize },
    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },
    #[error("unknown dataset: {0}")]
    UnknownDataset(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
