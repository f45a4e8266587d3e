use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Columns carrying a unique index, as they appear in driver messages, paired
/// with the wire name reported back to clients.
const UNIQUE_COLUMNS: [(&str, &str); 3] = [
    ("problem_id", "problemId"),
    ("title", "title"),
    ("email", "email"),
];

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{field} already exists")]
    Duplicate { field: String },
    #[error("database error: {0}")]
    Database(#[source] DbErr),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RepoResult<T> = Result<T, RepositoryError>;

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Self::Duplicate {
                field: unique_field(&message),
            },
            _ => Self::Database(err),
        }
    }
}

fn unique_field(message: &str) -> String {
    UNIQUE_COLUMNS
        .iter()
        .find(|(column, _)| message.contains(column))
        .map(|(_, field)| (*field).to_string())
        .unwrap_or_else(|| "field".to_string())
}
