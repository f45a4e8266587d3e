mod problem_service;
mod submission_query;

pub use problem_service::{ProblemService, ProblemView};
pub use submission_query::SubmissionQueries;

use algoarena_core::ValidationError;
use algoarena_core::domain::DomainError;
use thiserror::Error;

use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Field(#[from] DomainError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Internal(anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate { field } => Self::Field(DomainError::Duplicate { field }),
            RepositoryError::Database(db_err) => Self::Internal(anyhow::Error::new(db_err)),
            RepositoryError::Other(other) => Self::Internal(other),
        }
    }
}
