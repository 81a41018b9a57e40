use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummarizeError {
    #[error("document is empty or contains no sentences")]
    EmptyInput,
    #[error("document contains only stopwords")]
    NoSignificantWords,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
