use thiserror::Error;

/// Coarse classification of a [`BlogError`], for callers that branch on
/// the failure rather than its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Conflict,
    Reference,
    Integrity,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Conflict => "conflict",
            ErrorKind::Reference => "reference",
            ErrorKind::Integrity => "integrity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlogError {
    /// A uniqueness constraint would be broken (duplicate email).
    #[error("{0}")]
    Conflict(String),

    /// A foreign key points at a missing or disallowed record.
    #[error("{0}")]
    Reference(String),

    /// A required single-entity relationship has no target in the store.
    #[error("{0}")]
    Integrity(String),
}

impl BlogError {
    pub fn email_taken() -> Self {
        BlogError::Conflict("Email taken!".to_string())
    }

    pub fn user_missing() -> Self {
        BlogError::Reference("User does not exist!".to_string())
    }

    pub fn post_missing() -> Self {
        BlogError::Reference("Post does not exist!".to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::Conflict(_) => ErrorKind::Conflict,
            BlogError::Reference(_) => ErrorKind::Reference,
            BlogError::Integrity(_) => ErrorKind::Integrity,
        }
    }
}

pub type Result<T> = std::result::Result<T, BlogError>;

/// Failure of a dispatched operation: either a bad request or a domain error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Cannot query field '{field}' on type '{type_name}'")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },

    #[error(transparent)]
    Blog(#[from] BlogError),
}
