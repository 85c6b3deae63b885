use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Dimension resolution failed: {0}")]
    Resolution(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
