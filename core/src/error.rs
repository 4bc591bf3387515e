use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Cannot read {path}: {source}")]
    Ingest {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("Loader for '{source_name}' panicked")]
    LoaderPanicked { source_name: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
