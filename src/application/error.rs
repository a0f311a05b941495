//! # Application Errors
//!
//! Error types for the application layer.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)         - Business rule violations
//! ├── Repository(RepositoryError) - Storage failures
//! ├── Config(ConfigError)         - Rejected settings
//! ├── Validation(String)          - Input validation failures
//! └── NotFound                    - Referenced entity missing
//! ```
//!
//! A lead that cannot be priced or assigned is not an error: see
//! [`AssignmentOutcome`](crate::application::services::AssignmentOutcome).
//!
//! # Examples
//!
//! ```
//! use lead_desk::application::error::ApplicationError;
//!
//! let err = ApplicationError::validation("client name is required");
//! assert!(err.is_validation());
//!
//! let err = ApplicationError::not_found("Seller", "s-42");
//! assert!(err.is_not_found());
//! ```

use crate::config::ConfigError;
use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Repository error from storage.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("not found: {resource_type} with id {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::Domain(DomainError::UnknownSeller(_)) => true,
            Self::Repository(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Domain(DomainError::InvalidValue(_) | DomainError::InvalidQueueOrder(_))
        )
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
