// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PeppermillError {
    #[error("Could not open input file: {source} (path: {path})")]
    InputOpen {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Unable to open output file {path}: {source}")]
    OutputOpen {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Unsupported generator: {0}")]
    UnsupportedGenerator(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PeppermillError>;
