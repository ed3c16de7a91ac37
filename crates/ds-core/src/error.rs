use thiserror::Error;

#[derive(Error, Debug)]
pub enum DsError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("Unsupported documentation style: {0}")]
    UnsupportedStyle(String),
    #[error("History record not found: {id}")]
    HistoryNotFound { id: String },
    #[error("Generator error: {0}")]
    Generator(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DsError>;
