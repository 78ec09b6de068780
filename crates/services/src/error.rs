//! Shared error types for the services crate.

use thiserror::Error;

use api::{ApiError, ConfigError, IdentityError};
use atheno_core::model::{AttemptError, EssayDraftError, EssayError, QuizDraftError};

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `QuizTakingService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `EssayWritingService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EssayServiceError {
    #[error(transparent)]
    Essay(#[from] EssayError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `AuthoringService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthoringError {
    #[error(transparent)]
    Quiz(#[from] QuizDraftError),
    #[error(transparent)]
    Essay(#[from] EssayDraftError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `DashboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DashboardError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to seed offline content: {0}")]
    Seed(#[source] ApiError),
}

impl QuizServiceError {
    /// Whether the caller should send the user back to sign in.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::Api(ApiError::MissingToken | ApiError::Unauthorized)
        )
    }
}
