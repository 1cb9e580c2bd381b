use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimateError {
    #[error("Data file not found: {}", .0.display())]
    DataNotFound(PathBuf),

    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Estimate is missing required field: {0}")]
    MissingField(&'static str),

    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, EstimateError>;
