//! Identity service client (Supabase GoTrue REST).
//!
//! Every request carries the project anon key in the `apikey` header. The
//! bearer token is the anon key for anonymous calls and the user's access
//! token once a user is involved.

mod session;

use std::path::PathBuf;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use session::TokenResponse;
pub use session::{Session, SessionCache, User};
use thiserror::Error;

use crate::shared::error_message_from_body;

/// Identity service errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The service answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not have the expected shape.
    #[error("Unexpected response from identity service: {0}")]
    Parse(String),

    /// The local session cache could not be read or written.
    #[error("Session cache error: {0}")]
    Cache(String),
}

impl AuthError {
    fn network(err: &reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }

    fn cache(err: &anyhow::Error) -> Self {
        Self::Cache(format!("{err:#}"))
    }

    /// True when the service refused the credentials or token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Rejected { status, .. }
                if *status == StatusCode::UNAUTHORIZED.as_u16()
                    || *status == StatusCode::FORBIDDEN.as_u16()
        )
    }
}

/// Result of a sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The service auto-confirmed the account and issued a session.
    SignedIn(Session),
    /// The account exists but the email must be verified first.
    PendingVerification,
}

/// Client for the identity service.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    cache: SessionCache,
}

impl AuthClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        cache_path: PathBuf,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            cache: SessionCache::new(cache_path),
        }
    }

    /// True when a session is cached locally (it may still be stale).
    pub fn has_cached_session(&self) -> bool {
        self.cache.exists()
    }

    /// Signs in with email and password and caches the session.
    ///
    /// # Errors
    /// Returns `Rejected` for invalid credentials, `Network` when the service
    /// is unreachable.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        tracing::debug!(email, "signing in");
        let request = self
            .anon_request(self.http.post(self.token_url("password")))
            .json(&serde_json::json!({ "email": email, "password": password }));

        let response = send_checked(request).await?;
        let token: TokenResponse = parse_json(response).await?;
        let session = token.into_session();

        self.cache.save(&session).map_err(|e| AuthError::cache(&e))?;
        tracing::info!(user_id = %session.user.id, "signed in");
        Ok(session)
    }

    /// Registers a new account.
    ///
    /// # Errors
    /// Returns `Rejected` when the service refuses the registration.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        tracing::debug!(email, "signing up");
        let request = self
            .anon_request(self.http.post(format!("{}/auth/v1/signup", self.base_url)))
            .json(&serde_json::json!({ "email": email, "password": password }));

        let response = send_checked(request).await?;
        let body: serde_json::Value = parse_json(response).await?;

        // A confirmed account comes back as a token grant; otherwise the body
        // is the bare user awaiting verification.
        if body.get("access_token").is_none() {
            tracing::info!("sign-up pending email verification");
            return Ok(SignUpOutcome::PendingVerification);
        }

        let token: TokenResponse =
            serde_json::from_value(body).map_err(|e| AuthError::Parse(e.to_string()))?;
        let session = token.into_session();
        self.cache.save(&session).map_err(|e| AuthError::cache(&e))?;
        tracing::info!(user_id = %session.user.id, "signed up with immediate session");
        Ok(SignUpOutcome::SignedIn(session))
    }

    /// Returns the current session, or `None` when nobody is signed in.
    ///
    /// An expired access token is refreshed first, then the user is verified
    /// against the service. A rejected refresh or verification clears the
    /// cache and yields `None`.
    ///
    /// # Errors
    /// Returns an error when the cache is unreadable or the service cannot be
    /// reached.
    pub async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(mut session) = self.cache.load().map_err(|e| AuthError::cache(&e))? else {
            return Ok(None);
        };

        if session.is_expired() {
            tracing::debug!("access token expired, refreshing");
            match self.refresh(&session.refresh_token).await {
                Ok(refreshed) => {
                    session = refreshed;
                    self.cache.save(&session).map_err(|e| AuthError::cache(&e))?;
                }
                Err(AuthError::Rejected { status, message }) if (400..500).contains(&status) => {
                    tracing::info!(status, %message, "refresh rejected, dropping session");
                    self.cache.clear().map_err(|e| AuthError::cache(&e))?;
                    return Ok(None);
                }
                Err(e) => return Err(e),
            }
        }

        match self.fetch_user(&session.access_token).await {
            Ok(user) => {
                if user != session.user {
                    session.user = user;
                    self.cache.save(&session).map_err(|e| AuthError::cache(&e))?;
                }
                Ok(Some(session))
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!("cached session no longer valid");
                self.cache.clear().map_err(|e| AuthError::cache(&e))?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Ends the current session.
    ///
    /// A session the service no longer knows counts as signed out. Without a
    /// cached session this is a no-op.
    ///
    /// # Errors
    /// Returns an error when the service cannot be reached or refuses for
    /// another reason.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.cache.load().map_err(|e| AuthError::cache(&e))? else {
            return Ok(());
        };

        let request = self
            .http
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token);

        match send_checked(request).await {
            Ok(_) => {}
            Err(AuthError::Rejected { status, .. })
                if matches!(
                    StatusCode::from_u16(status),
                    Ok(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND)
                ) =>
            {
                tracing::debug!(status, "session already gone on the service");
            }
            Err(e) => return Err(e),
        }

        self.cache.clear().map_err(|e| AuthError::cache(&e))?;
        tracing::info!(user_id = %session.user.id, "signed out");
        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let request = self
            .anon_request(self.http.post(self.token_url("refresh_token")))
            .json(&serde_json::json!({ "refresh_token": refresh_token }));

        let response = send_checked(request).await?;
        let token: TokenResponse = parse_json(response).await?;
        Ok(token.into_session())
    }

    async fn fetch_user(&self, access_token: &str) -> Result<User, AuthError> {
        let request = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token);

        let response = send_checked(request).await?;
        parse_json(response).await
    }

    fn token_url(&self, grant_type: &str) -> String {
        format!("{}/auth/v1/token?grant_type={grant_type}", self.base_url)
    }

    fn anon_request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }
}

async fn send_checked(request: RequestBuilder) -> Result<Response, AuthError> {
    let response = request.send().await.map_err(|e| AuthError::network(&e))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message_from_body(&body)
        .unwrap_or_else(|| format!("Identity service returned HTTP {status}"));
    tracing::debug!(status = status.as_u16(), %message, "identity request rejected");
    Err(AuthError::Rejected {
        status: status.as_u16(),
        message,
    })
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, AuthError> {
    let body = response.text().await.map_err(|e| AuthError::network(&e))?;
    serde_json::from_str(&body).map_err(|e| AuthError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_detection() {
        let unauthorized = AuthError::Rejected {
            status: 401,
            message: "JWT expired".to_string(),
        };
        let bad_request = AuthError::Rejected {
            status: 400,
            message: "Invalid login credentials".to_string(),
        };
        assert!(unauthorized.is_unauthorized());
        assert!(!bad_request.is_unauthorized());
        assert!(!AuthError::Network("down".to_string()).is_unauthorized());
    }

    #[test]
    fn test_rejected_displays_service_message() {
        let err = AuthError::Rejected {
            status: 400,
            message: "Invalid login credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid login credentials");
    }
}
