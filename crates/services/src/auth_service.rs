use std::sync::Arc;

use api::{AccountGateway, ApiError, IdentityProvider, Registration};
use atheno_core::model::{Role, User};

use crate::error::AuthError;

const MIN_PASSWORD_LEN: usize = 6;

/// Form data collected by the sign-up page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl SignUpForm {
    fn validate(&self) -> Result<(), AuthError> {
        if self.name.trim().is_empty() {
            return Err(AuthError::InvalidInput("name is required"));
        }
        if !self.email.contains('@') {
            return Err(AuthError::InvalidInput("enter a valid email address"));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidInput(
                "password must be at least 6 characters",
            ));
        }
        if self.password != self.confirm_password {
            return Err(AuthError::InvalidInput("passwords do not match"));
        }
        Ok(())
    }
}

/// Signs users in and out against the identity provider and resolves their
/// backend profile.
#[derive(Clone)]
pub struct AuthService {
    identity: Arc<dyn IdentityProvider>,
    accounts: Arc<dyn AccountGateway>,
}

impl AuthService {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>, accounts: Arc<dyn AccountGateway>) -> Self {
        Self { identity, accounts }
    }

    /// Sign in and fetch the backend user (which carries the role).
    ///
    /// The identity session is dropped again if the backend has no user for it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidInput` for blank fields, `AuthError::Identity`
    /// for rejected credentials, or `AuthError::Api` if the profile lookup fails.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput("email and password are required"));
        }
        self.identity.sign_in(email.trim(), password).await?;
        match self.accounts.current_user().await {
            Ok(user) => {
                log::info!("signed in as {} ({})", user.email, user.role);
                Ok(user)
            }
            Err(err) => {
                log::warn!("sign-in succeeded but profile lookup failed: {err}");
                self.identity.sign_out();
                Err(err.into())
            }
        }
    }

    /// Create the identity, then register it with the backend.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidInput` for form problems, `AuthError::Identity`
    /// if the provider refuses the account, or `AuthError::Api` if registration fails.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<User, AuthError> {
        form.validate()?;
        let session = self.identity.sign_up(form.email.trim(), &form.password).await?;
        let registration = Registration {
            email: session.email.clone(),
            name: form.name.trim().to_string(),
            role: form.role,
            identity_uid: session.uid,
        };
        match self.accounts.register(&registration).await {
            Ok(user) => {
                log::info!("registered {} as {}", user.email, user.role);
                Ok(user)
            }
            Err(err) => {
                log::warn!("backend registration failed: {err}");
                self.identity.sign_out();
                Err(err.into())
            }
        }
    }

    pub fn sign_out(&self) {
        self.identity.sign_out();
        log::info!("signed out");
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.identity.current().is_some()
    }

    /// The signed-in user, or `None` when there is no usable session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` for failures other than a missing or rejected token.
    pub async fn current_user(&self) -> Result<Option<User>, AuthError> {
        if !self.is_signed_in() {
            return Ok(None);
        }
        match self.accounts.current_user().await {
            Ok(user) => Ok(Some(user)),
            Err(ApiError::MissingToken | ApiError::Unauthorized) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SignUpForm {
        SignUpForm {
            name: "Ada".into(),
            email: "ada@school.dev".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            role: Role::Student,
        }
    }

    #[test]
    fn sign_up_form_checks_each_field() {
        assert!(form().validate().is_ok());

        let blank_name = SignUpForm { name: " ".into(), ..form() };
        assert!(matches!(blank_name.validate(), Err(AuthError::InvalidInput(_))));

        let bad_email = SignUpForm { email: "ada".into(), ..form() };
        assert!(matches!(bad_email.validate(), Err(AuthError::InvalidInput(_))));

        let short = SignUpForm {
            password: "abc".into(),
            confirm_password: "abc".into(),
            ..form()
        };
        assert!(matches!(short.validate(), Err(AuthError::InvalidInput(_))));

        let mismatch = SignUpForm { confirm_password: "secret2".into(), ..form() };
        assert!(matches!(
            mismatch.validate(),
            Err(AuthError::InvalidInput("passwords do not match"))
        ));
    }
}
