use thiserror::Error;

/// Errors reported by [`LanguageService`](super::LanguageService) operations
/// that address a specific file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Unknown file: {0}")]
    UnknownFile(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
