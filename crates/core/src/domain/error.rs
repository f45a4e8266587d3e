use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid tags: {}. Valid tags are: array, linkedList, graph, dp", .0.join(", "))]
    InvalidTags(Vec<String>),
    #[error("Invalid difficulty '{0}'. Must be: easy, medium, or hard")]
    InvalidDifficulty(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("at least one {0} is required")]
    EmptyCollection(&'static str),
    #[error("{field} already exists")]
    Duplicate { field: String },
}

impl DomainError {
    /// Name of the offending field, as it appears on the wire.
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidTags(_) => "tags",
            Self::InvalidDifficulty(_) => "difficulty",
            Self::MissingField(field) | Self::EmptyCollection(field) => field,
            Self::Duplicate { field } => field,
        }
    }
}
