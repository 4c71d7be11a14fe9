use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Capacity exceeded: store already holds the maximum of {max} vectors")]
    CapacityExceeded { max: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Flat classification of a [`DomainError`], for callers that branch on the
/// failure category rather than its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DimensionMismatch,
    CapacityExceeded,
    NotFound,
    UnknownBackend,
    InvalidConfig,
    InvalidInput,
    Storage,
    Parse,
    Io,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            DomainError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            DomainError::NotFound(_) => ErrorKind::NotFound,
            DomainError::UnknownBackend(_) => ErrorKind::UnknownBackend,
            DomainError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            DomainError::InvalidInput(_) => ErrorKind::InvalidInput,
            DomainError::Storage(_) => ErrorKind::Storage,
            DomainError::Parse(_) => ErrorKind::Parse,
            DomainError::Io(_) => ErrorKind::Io,
        }
    }

    /// Fails with `DimensionMismatch` unless `actual == expected`.
    pub fn check_dimension(expected: usize, actual: usize) -> Result<(), DomainError> {
        if expected != actual {
            return Err(DomainError::DimensionMismatch { expected, actual });
        }
        Ok(())
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Parse(e.to_string())
    }
}
