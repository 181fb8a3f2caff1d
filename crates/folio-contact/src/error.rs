use thiserror::Error;

use crate::submission::ValidationError;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("{0}")]
    Rejected(String),

    #[error("{0} is not configured")]
    MissingSetting(String),
}
