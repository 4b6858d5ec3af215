//! Domain errors for the banner store.

use std::fmt;

use thiserror::Error;

/// The error kinds a caller is expected to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Internal,
}

/// Domain-level errors returned by the retrieval and write paths.
#[derive(Debug, Error)]
pub enum BannerError {
    #[error("Banner not found: {0}")]
    NotFound(String),

    #[error("Banner conflict: {0}")]
    Conflict(String),

    #[error("Internal error during {operation}: {message}")]
    Internal { operation: &'static str, message: String },
}

pub type DomainResult<T> = Result<T, BannerError>;

impl BannerError {
    pub fn internal(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Internal {
            operation,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Translate a store driver error, attaching the operation and key it happened on.
    ///
    /// Unique constraint violations are the only driver errors with domain meaning:
    /// they surface as [`BannerError::Conflict`]. Everything else collapses into
    /// [`BannerError::Internal`].
    pub fn from_store(operation: &'static str, key: impl fmt::Display, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return Self::Conflict(format!("{key} is already claimed by another banner"));
            }
        }
        Self::internal(operation, format!("{key}: {err}"))
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(BannerError::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(BannerError::Conflict("x".into()).kind(), ErrorKind::Conflict);
        assert_eq!(BannerError::internal("op", "boom").kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_non_constraint_store_error_is_internal() {
        let err = BannerError::from_store("get_banner", "feature 1, tag 2", sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind(), ErrorKind::Internal);
        let rendered = err.to_string();
        assert!(rendered.contains("get_banner"));
        assert!(rendered.contains("feature 1, tag 2"));
    }
}
