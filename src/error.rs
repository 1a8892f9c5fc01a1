pub type ScrollyResult<T> = Result<T, ScrollyError>;

#[derive(thiserror::Error, Debug)]
pub enum ScrollyError {
    #[error("empty dataset: aggregation requires at least one row")]
    EmptyDataset,

    #[error("index {index} out of range for {len} scenes")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("ingest error: {0}")]
    Ingest(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollyError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn ingest(msg: impl Into<String>) -> Self {
        Self::Ingest(msg.into())
    }
}
