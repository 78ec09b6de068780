use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use atheno_core::Clock;
use chrono::Duration;

use super::{IdentityError, IdentityProvider, IdentitySession, TokenSource};

#[derive(Debug, Clone)]
struct LocalAccount {
    uid: String,
    password: String,
}

/// In-process identity for offline mode and tests.
///
/// The id token is the account uid, which is what the in-memory backend
/// resolves users by.
pub struct LocalIdentity {
    clock: Clock,
    accounts: Mutex<HashMap<String, LocalAccount>>,
    session: Mutex<Option<IdentitySession>>,
}

impl LocalIdentity {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            accounts: Mutex::new(HashMap::new()),
            session: Mutex::new(None),
        }
    }

    /// Register an account directly, bypassing sign-up.
    pub fn add_account(&self, email: &str, password: &str, uid: &str) {
        if let Ok(mut accounts) = self.accounts.lock() {
            accounts.insert(
                normalize_email(email),
                LocalAccount {
                    uid: uid.to_string(),
                    password: password.to_string(),
                },
            );
        }
    }

    fn open_session(&self, email: &str, uid: &str) -> IdentitySession {
        let session = IdentitySession {
            uid: uid.to_string(),
            email: email.to_string(),
            id_token: uid.to_string(),
            refresh_token: format!("refresh-{uid}"),
            expires_at: self.clock.now() + Duration::hours(1),
        };
        if let Ok(mut guard) = self.session.lock() {
            *guard = Some(session.clone());
        }
        session
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[async_trait]
impl TokenSource for LocalIdentity {
    async fn bearer_token(&self) -> Result<String, IdentityError> {
        self.current()
            .map(|session| session.id_token)
            .ok_or(IdentityError::SignedOut)
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentitySession, IdentityError> {
        let account = {
            let accounts = self
                .accounts
                .lock()
                .map_err(|e| IdentityError::Rejected(e.to_string()))?;
            accounts.get(&normalize_email(email)).cloned()
        };
        match account {
            None => Err(IdentityError::Rejected("EMAIL_NOT_FOUND".into())),
            Some(account) if account.password != password => {
                Err(IdentityError::Rejected("INVALID_PASSWORD".into()))
            }
            Some(account) => Ok(self.open_session(email.trim(), &account.uid)),
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentitySession, IdentityError> {
        if password.len() < 6 {
            return Err(IdentityError::Rejected("WEAK_PASSWORD".into()));
        }
        let key = normalize_email(email);
        let uid = {
            let mut accounts = self
                .accounts
                .lock()
                .map_err(|e| IdentityError::Rejected(e.to_string()))?;
            if accounts.contains_key(&key) {
                return Err(IdentityError::Rejected("EMAIL_EXISTS".into()));
            }
            let uid = format!("local-{}", accounts.len() + 1);
            accounts.insert(
                key,
                LocalAccount {
                    uid: uid.clone(),
                    password: password.to_string(),
                },
            );
            uid
        };
        Ok(self.open_session(email.trim(), &uid))
    }

    fn sign_out(&self) {
        if let Ok(mut guard) = self.session.lock() {
            *guard = None;
        }
    }

    fn current(&self) -> Option<IdentitySession> {
        self.session.lock().ok().and_then(|guard| guard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atheno_core::time::fixed_clock;

    #[tokio::test]
    async fn sign_up_then_sign_in_round_trip() {
        let identity = LocalIdentity::new(fixed_clock());
        let created = identity.sign_up("Ada@Example.com", "secret1").await.unwrap();
        identity.sign_out();
        assert!(identity.bearer_token().await.is_err());

        let session = identity.sign_in("ada@example.com", "secret1").await.unwrap();
        assert_eq!(session.uid, created.uid);
        assert_eq!(identity.bearer_token().await.unwrap(), created.uid);
    }

    #[tokio::test]
    async fn rejects_wrong_password_and_duplicates() {
        let identity = LocalIdentity::new(fixed_clock());
        identity.add_account("t@school.dev", "hunter22", "t-1");

        let err = identity.sign_in("t@school.dev", "nope").await.unwrap_err();
        assert!(matches!(err, IdentityError::Rejected(code) if code == "INVALID_PASSWORD"));

        let err = identity.sign_up("t@school.dev", "another1").await.unwrap_err();
        assert!(matches!(err, IdentityError::Rejected(code) if code == "EMAIL_EXISTS"));

        let err = identity.sign_up("new@school.dev", "123").await.unwrap_err();
        assert!(matches!(err, IdentityError::Rejected(code) if code == "WEAK_PASSWORD"));
    }
}
