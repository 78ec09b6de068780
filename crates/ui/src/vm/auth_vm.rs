use api::{ApiError, IdentityError};
use services::AuthError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Working,
    Failed(String),
}

impl FormStatus {
    #[must_use]
    pub fn is_working(&self) -> bool {
        matches!(self, Self::Working)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            Self::Idle | Self::Working => None,
        }
    }
}

/// Message for a failed sign-in or sign-up, keyed on the provider's error code.
#[must_use]
pub fn auth_error_message(err: &AuthError) -> String {
    match err {
        AuthError::InvalidInput(message) => capitalize(message),
        AuthError::Identity(IdentityError::Rejected(code)) => rejected_message(code).to_string(),
        AuthError::Identity(IdentityError::NotConfigured) => {
            "Sign-in is not configured. Set ATHENO_FIREBASE_API_KEY or run with --offline."
                .to_string()
        }
        AuthError::Api(ApiError::Unauthorized | ApiError::NotFound) => {
            "This account is not registered with Atheno.".to_string()
        }
        _ => "Could not reach the server. Please try again.".to_string(),
    }
}

fn rejected_message(code: &str) -> &'static str {
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Incorrect email or password."
        }
        "EMAIL_EXISTS" => "An account with this email already exists.",
        "USER_DISABLED" => "This account has been disabled.",
        "INVALID_EMAIL" => "Enter a valid email address.",
        code if code.starts_with("WEAK_PASSWORD") => "Password must be at least 6 characters.",
        code if code.starts_with("TOO_MANY_ATTEMPTS") => {
            "Too many attempts. Wait a moment and try again."
        }
        _ => "Sign-in failed. Please try again.",
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
