//! Email/password authentication against the hosted identity service.
//!
//! The presence of a valid `Session` is the only signal that gates admin UI.
//! Authorization of individual admin operations stays with the backend.

use crate::error::AuthError;
use crate::storage::{LocalStorage, AUTH_SESSION_KEY};
use crate::supabase::SupabaseClient;
use chrono::Utc;
use reqwest::{Method, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// The signed-in user as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Token-bearing session returned by sign-in.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|at| at <= Utc::now().timestamp())
            .unwrap_or(false)
    }
}

// Tokens stay out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// `Anonymous -> [sign_in] -> Authenticated -> [sign_out] -> Anonymous`
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Anonymous,
    Authenticated(Session),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

/// GoTrue reports errors in two shapes depending on version.
#[derive(Debug, Deserialize)]
struct GoTrueError {
    error: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl GoTrueError {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    backend: SupabaseClient,
    storage: LocalStorage,
    session: Arc<RwLock<Option<Session>>>,
}

impl AuthClient {
    pub fn new(backend: SupabaseClient, storage: LocalStorage) -> Self {
        Self {
            backend,
            storage,
            session: Arc::new(RwLock::new(None)),
        }
    }

    pub fn state(&self) -> AuthState {
        match self.get_current_session() {
            Some(session) => AuthState::Authenticated(session),
            None => AuthState::Anonymous,
        }
    }

    /// Sign in with email and password.
    ///
    /// Blank credentials fail with `MissingCredentials` without a request.
    /// A rejected pair fails with `InvalidCredentials` carrying the service's
    /// message and leaves the client anonymous.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let url = format!("{}?grant_type=password", self.backend.auth_url("token"));
        let response = self
            .backend
            .request_with_token(Method::POST, &url, &self.anon_bearer())
            .json(&PasswordGrant { email, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(match status.as_u16() {
                400 | 401 | 422 => AuthError::InvalidCredentials(message),
                code => AuthError::Remote {
                    status: code,
                    message,
                },
            });
        }

        let mut session: Session = response.json().await?;
        if session.expires_at.is_none() {
            session.expires_at = session
                .expires_in
                .map(|secs| Utc::now().timestamp() + secs);
        }

        info!("Signed in as {}", session.user.email.as_deref().unwrap_or(&session.user.id));
        self.install(Some(session.clone()));
        Ok(session)
    }

    /// Invalidate the session remotely, then forget it locally.
    ///
    /// Without a session this is a local no-op. On a remote failure the
    /// session is kept so the UI stays consistent with the backend.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.current() else {
            debug!("sign_out called without a session");
            return Ok(());
        };

        let response = self
            .backend
            .request_with_token(
                Method::POST,
                &self.backend.auth_url("logout"),
                &session.access_token,
            )
            .send()
            .await?;

        let status = response.status();
        // An already-invalid token is as signed out as it gets
        if !status.is_success() && status.as_u16() != 401 {
            let message = error_message(response).await;
            return Err(AuthError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        info!("Signed out");
        self.install(None);
        Ok(())
    }

    /// The current non-expired session, restoring a persisted one if needed.
    pub fn get_current_session(&self) -> Option<Session> {
        if let Some(session) = self.current() {
            if !session.is_expired() {
                return Some(session);
            }
            debug!("In-memory session expired");
            self.install(None);
            return None;
        }

        let raw = self.storage.get_item(AUTH_SESSION_KEY)?;
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) if !session.is_expired() => {
                debug!("Restored persisted session");
                self.install(Some(session.clone()));
                Some(session)
            }
            Ok(_) => {
                debug!("Persisted session expired");
                self.install(None);
                None
            }
            Err(e) => {
                warn!("Discarding unreadable persisted session: {}", e);
                self.install(None);
                None
            }
        }
    }

    /// Fetch the signed-in user from the identity service.
    pub async fn get_user(&self) -> Result<AuthUser, AuthError> {
        let session = self
            .get_current_session()
            .ok_or(AuthError::NotAuthenticated)?;

        let response = self
            .backend
            .request_with_token(Method::GET, &self.backend.auth_url("user"), &session.access_token)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            self.install(None);
            return Err(AuthError::SessionExpired);
        }
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(AuthError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    fn current(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn anon_bearer(&self) -> String {
        // Sign-in must not reuse a stale user token
        self.backend.anon_key().to_string()
    }

    /// Store the session in memory, in local storage, and on the transport.
    fn install(&self, session: Option<Session>) {
        self.backend
            .set_access_token(session.as_ref().map(|s| s.access_token.clone()));

        let persisted = match &session {
            Some(s) => serde_json::to_string(s)
                .map_err(|e| e.to_string())
                .and_then(|json| {
                    self.storage
                        .set_item(AUTH_SESSION_KEY, &json)
                        .map_err(|e| e.to_string())
                }),
            None => self
                .storage
                .remove_item(AUTH_SESSION_KEY)
                .map_err(|e| e.to_string()),
        };
        if let Err(e) = persisted {
            warn!("Failed to persist auth session: {}", e);
        }

        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
    }
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<GoTrueError>(&body)
        .ok()
        .and_then(GoTrueError::into_message)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body
            }
        })
}
