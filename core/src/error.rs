use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid range: lo={lo} must not exceed hi={hi}")]
    InvalidRange { lo: f64, hi: f64 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Metric '{metric}' missing from category '{category}'")]
    MissingMetric { category: String, metric: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
