use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinanzasError {
    #[error("El archivo está vacío o no tiene el formato correcto: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("No transaction at index {0}")]
    OutOfRange(usize),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FinanzasError>;
