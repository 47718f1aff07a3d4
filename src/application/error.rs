use thiserror::Error;

use crate::domain::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Expense id '{0}' matches more than one expense")]
    AmbiguousId(String),

    #[error("Render failed: {0}")]
    Render(#[from] std::io::Error),

    #[error("JSON render failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV render failed: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    /// The validation error inside, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            AppError::Validation(err) => Some(err),
            _ => None,
        }
    }
}
