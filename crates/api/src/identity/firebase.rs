use std::sync::Mutex;

use async_trait::async_trait;
use atheno_core::Clock;
use chrono::Duration;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{IdentityError, IdentityProvider, IdentitySession, TokenSource};
use crate::config::FirebaseConfig;

/// Email/password identity over the Identity Toolkit REST api.
pub struct FirebaseIdentity {
    client: Client,
    config: Option<FirebaseConfig>,
    clock: Clock,
    slot: Mutex<SessionSlot>,
}

/// Stored session plus a counter bumped on every sign-out.
#[derive(Default)]
struct SessionSlot {
    session: Option<IdentitySession>,
    sign_outs: u64,
}

impl FirebaseIdentity {
    #[must_use]
    pub fn new(config: Option<FirebaseConfig>, clock: Clock) -> Self {
        Self {
            client: Client::new(),
            config,
            clock,
            slot: Mutex::new(SessionSlot::default()),
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    fn config(&self) -> Result<&FirebaseConfig, IdentityError> {
        self.config.as_ref().ok_or(IdentityError::NotConfigured)
    }

    fn snapshot(&self) -> Option<IdentitySession> {
        self.slot.lock().ok().and_then(|slot| slot.session.clone())
    }

    fn sign_outs(&self) -> u64 {
        self.slot.lock().map(|slot| slot.sign_outs).unwrap_or(u64::MAX)
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            slot.session = None;
            slot.sign_outs = slot.sign_outs.wrapping_add(1);
        }
    }

    /// Stores a fresh sign-in unless a sign-out landed since `seen_sign_outs` was read.
    fn commit_sign_in(
        &self,
        seen_sign_outs: u64,
        session: IdentitySession,
    ) -> Result<(), IdentityError> {
        let mut slot = self.slot.lock().map_err(|_| IdentityError::SignedOut)?;
        if slot.sign_outs != seen_sign_outs {
            return Err(IdentityError::SignedOut);
        }
        slot.session = Some(session);
        Ok(())
    }

    /// Swaps in `next` only while the stored session still holds `previous_refresh`.
    fn commit_refresh(
        &self,
        previous_refresh: &str,
        next: Option<IdentitySession>,
    ) -> Result<(), IdentityError> {
        let mut slot = self.slot.lock().map_err(|_| IdentityError::SignedOut)?;
        let current = slot
            .session
            .as_ref()
            .is_some_and(|session| session.refresh_token == previous_refresh);
        if !current {
            return Err(IdentityError::SignedOut);
        }
        slot.session = next;
        Ok(())
    }

    async fn password_call(
        &self,
        method: &str,
        email: &str,
        password: &str,
    ) -> Result<IdentitySession, IdentityError> {
        let config = self.config()?;
        let seen_sign_outs = self.sign_outs();
        let payload = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let response = self
            .client
            .post(config.account_url(method))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body: PasswordResponse = response.json().await?;
        let session = IdentitySession {
            uid: body.local_id,
            email: body.email,
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_at: self.clock.now() + Duration::seconds(parse_expires_in(&body.expires_in)),
        };
        self.commit_sign_in(seen_sign_outs, session.clone())?;
        Ok(session)
    }

    async fn refresh(&self, session: &IdentitySession) -> Result<IdentitySession, IdentityError> {
        let config = self.config()?;
        log::debug!("refreshing id token for {}", session.uid);
        let response = self
            .client
            .post(config.refresh_url())
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", session.refresh_token.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let err = rejection(response).await;
            // A refused refresh token will never work again.
            self.commit_refresh(&session.refresh_token, None)?;
            return Err(err);
        }

        let body: RefreshResponse = response.json().await?;
        let refreshed = IdentitySession {
            uid: body.user_id,
            email: session.email.clone(),
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_at: self.clock.now() + Duration::seconds(parse_expires_in(&body.expires_in)),
        };
        self.commit_refresh(&session.refresh_token, Some(refreshed.clone()))?;
        Ok(refreshed)
    }
}

#[async_trait]
impl TokenSource for FirebaseIdentity {
    async fn bearer_token(&self) -> Result<String, IdentityError> {
        let session = self.snapshot().ok_or(IdentityError::SignedOut)?;
        if !session.needs_refresh(self.clock.now()) {
            return Ok(session.id_token);
        }
        Ok(self.refresh(&session).await?.id_token)
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentitySession, IdentityError> {
        self.password_call("signInWithPassword", email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentitySession, IdentityError> {
        self.password_call("signUp", email, password).await
    }

    fn sign_out(&self) {
        self.clear();
    }

    fn current(&self) -> Option<IdentitySession> {
        self.snapshot()
    }
}

async fn rejection(response: reqwest::Response) -> IdentityError {
    let status = response.status();
    match response.json::<ErrorEnvelope>().await {
        Ok(envelope) => IdentityError::Rejected(envelope.error.message),
        Err(_) => IdentityError::Rejected(format!("status {}", status.as_u16())),
    }
}

/// Provider sends seconds as a string; fall back to one hour.
fn parse_expires_in(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(3600)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    user_id: String,
    #[serde(default)]
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use atheno_core::time::fixed_clock;

    #[test]
    fn expires_in_parses_with_fallback() {
        assert_eq!(parse_expires_in("3600"), 3600);
        assert_eq!(parse_expires_in(" 120 "), 120);
        assert_eq!(parse_expires_in(""), 3600);
    }

    #[test]
    fn password_response_uses_camel_case() {
        let body: PasswordResponse = serde_json::from_str(
            r#"{"localId":"u1","email":"a@b.c","idToken":"id","refreshToken":"r","expiresIn":"3600","kind":"x"}"#,
        )
        .unwrap();
        assert_eq!(body.local_id, "u1");
        assert_eq!(body.id_token, "id");
    }

    #[test]
    fn error_envelope_extracts_code() {
        let body: ErrorEnvelope =
            serde_json::from_str(r#"{"error":{"code":400,"message":"EMAIL_NOT_FOUND"}}"#).unwrap();
        assert_eq!(body.error.message, "EMAIL_NOT_FOUND");
    }

    #[tokio::test]
    async fn unconfigured_identity_cannot_sign_in() {
        let identity = FirebaseIdentity::new(None, fixed_clock());
        assert!(!identity.enabled());
        assert!(matches!(
            identity.sign_in("a@b.c", "pw").await,
            Err(IdentityError::NotConfigured)
        ));
        assert!(matches!(
            identity.bearer_token().await,
            Err(IdentityError::SignedOut)
        ));
    }

    fn session(id_token: &str, refresh_token: &str) -> IdentitySession {
        IdentitySession {
            uid: "u1".into(),
            email: "a@b.c".into(),
            id_token: id_token.into(),
            refresh_token: refresh_token.into(),
            expires_at: fixed_clock().now() + Duration::minutes(30),
        }
    }

    fn signed_in(id_token: &str, refresh_token: &str) -> FirebaseIdentity {
        let identity = FirebaseIdentity::new(None, fixed_clock());
        identity
            .commit_sign_in(identity.sign_outs(), session(id_token, refresh_token))
            .unwrap();
        identity
    }

    #[tokio::test]
    async fn fresh_session_token_is_returned_without_network() {
        let identity = signed_in("fresh", "r");
        assert_eq!(identity.bearer_token().await.unwrap(), "fresh");

        identity.sign_out();
        assert!(identity.current().is_none());
    }

    #[test]
    fn refresh_replaces_session_holding_the_same_refresh_token() {
        let identity = signed_in("old", "r1");
        identity
            .commit_refresh("r1", Some(session("new", "r2")))
            .unwrap();
        let current = identity.current().unwrap();
        assert_eq!(current.id_token, "new");
        assert_eq!(current.refresh_token, "r2");
    }

    #[test]
    fn refresh_finishing_after_sign_out_stays_signed_out() {
        let identity = signed_in("old", "r1");
        let in_flight = identity.current().unwrap();

        identity.sign_out();
        let result = identity.commit_refresh(&in_flight.refresh_token, Some(session("new", "r2")));

        assert!(matches!(result, Err(IdentityError::SignedOut)));
        assert!(identity.current().is_none());
    }

    #[test]
    fn stale_refresh_does_not_clobber_a_newer_sign_in() {
        let identity = signed_in("old", "r1");
        identity.sign_out();
        identity
            .commit_sign_in(identity.sign_outs(), session("other", "r9"))
            .unwrap();

        assert!(matches!(
            identity.commit_refresh("r1", None),
            Err(IdentityError::SignedOut)
        ));
        assert_eq!(identity.current().unwrap().refresh_token, "r9");
    }

    #[test]
    fn sign_in_finishing_after_sign_out_is_discarded() {
        let identity = FirebaseIdentity::new(None, fixed_clock());
        let seen = identity.sign_outs();

        identity.sign_out();
        let result = identity.commit_sign_in(seen, session("late", "r1"));

        assert!(matches!(result, Err(IdentityError::SignedOut)));
        assert!(identity.current().is_none());
    }
}
