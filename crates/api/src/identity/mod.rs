//! Identity provider clients: who is signed in, and the bearer token for them.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

mod firebase;
mod local;

pub use firebase::FirebaseIdentity;
pub use local::LocalIdentity;

/// Tokens this close to expiry are refreshed before use.
pub const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IdentityError {
    #[error("identity provider is not configured")]
    NotConfigured,

    #[error("no user is signed in")]
    SignedOut,

    /// The provider refused the request; carries its error code.
    #[error("identity provider rejected the request: {0}")]
    Rejected(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// A signed-in identity with its short-lived id token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySession {
    pub uid: String,
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl IdentitySession {
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(REFRESH_MARGIN_SECS) <= now
    }
}

/// Anything that can hand out a bearer token for backend calls.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Current id token, refreshed first if it is about to expire.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::SignedOut` when there is no session, or the
    /// provider's error if a refresh fails.
    async fn bearer_token(&self) -> Result<String, IdentityError>;
}

#[async_trait]
pub trait IdentityProvider: TokenSource {
    /// # Errors
    ///
    /// Returns `IdentityError::Rejected` for bad credentials.
    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentitySession, IdentityError>;

    /// # Errors
    ///
    /// Returns `IdentityError::Rejected` if the account cannot be created.
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentitySession, IdentityError>;

    fn sign_out(&self);

    fn current(&self) -> Option<IdentitySession>;
}

/// Fixed token, for tests and scripted clients.
#[derive(Debug, Clone)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self(None)
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn bearer_token(&self) -> Result<String, IdentityError> {
        self.0.clone().ok_or(IdentityError::SignedOut)
    }
}
