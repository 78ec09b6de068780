use thiserror::Error;

use crate::identity::IdentityError;

/// Errors surfaced by backend gateways.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not signed in")]
    MissingToken,

    #[error("request was not authorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("backend responded with status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map an HTTP status to an error; `None` for success codes.
    #[must_use]
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            401 | 403 => Some(Self::Unauthorized),
            404 => Some(Self::NotFound),
            other => Some(Self::Status(other)),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::NotConfigured | IdentityError::SignedOut => Self::MissingToken,
            IdentityError::Rejected(_) => Self::Unauthorized,
            IdentityError::Http(inner) => Self::Transport(inner.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_variants() {
        assert_eq!(ApiError::from_status(200), None);
        assert_eq!(ApiError::from_status(204), None);
        assert_eq!(ApiError::from_status(401), Some(ApiError::Unauthorized));
        assert_eq!(ApiError::from_status(403), Some(ApiError::Unauthorized));
        assert_eq!(ApiError::from_status(404), Some(ApiError::NotFound));
        assert_eq!(ApiError::from_status(500), Some(ApiError::Status(500)));
    }

    #[test]
    fn signed_out_identity_is_a_missing_token() {
        assert_eq!(ApiError::from(IdentityError::SignedOut), ApiError::MissingToken);
        assert_eq!(
            ApiError::from(IdentityError::Rejected("INVALID_PASSWORD".into())),
            ApiError::Unauthorized
        );
    }
}
