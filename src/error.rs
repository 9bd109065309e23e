use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("task not found (id={0})")]
    NotFound(u64),
}

pub type StoreResult<T> = Result<T, StoreError>;
