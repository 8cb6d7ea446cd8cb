//! Sessions, flash messages and the authentication context.
//!
//! Session state lives in a [`tower_sessions`] store; the browser only holds the
//! opaque `session_id` cookie. A session is saved only once it has content, so
//! anonymous browsing never allocates one. Idle sessions expire after the
//! configured inactivity window, and the id is cycled on login and logout.

use crate::{entities::UserModel, errors::Result};
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::{
    Expiry, MemoryStore, SessionManagerLayer,
    cookie::{SameSite, time::Duration},
};
use tracing::debug;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session_id";

/// Notice shown when an anonymous request reaches a protected page
pub const LOGIN_REQUIRED: &str = "Please login to access this page.";

/// Where anonymous requests to protected pages are sent.
///
/// The query flag makes the login page show [`LOGIN_REQUIRED`] without
/// creating a session for the anonymous client.
pub const LOGIN_REDIRECT: &str = "/login?required=1";

const USER_KEY: &str = "user";
const FLASH_KEY: &str = "flashes";

/// Visual category of a flash message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    /// Completed action
    Success,
    /// Rejected or failed action
    Error,
}

/// A one-shot notice displayed on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Category, used as a CSS class
    pub level: FlashLevel,
    /// Text shown to the user
    pub message: String,
}

impl Flash {
    /// Builds a flash message.
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// The logged-in account as remembered by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Primary key of the user row
    pub id: i64,
    /// Login name
    pub username: String,
    /// Name used in greetings, falls back to the username
    pub display_name: String,
}

impl From<&UserModel> for SessionUser {
    fn from(user: &UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user
                .full_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| user.username.clone()),
        }
    }
}

/// Builds the session layer: in-memory store, `session_id` cookie, idle expiry.
#[must_use]
pub fn session_layer(idle_minutes: i64) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(idle_minutes)))
}

/// The current request's session.
#[derive(Debug, Clone)]
pub struct Session(tower_sessions::Session);

impl Session {
    /// The logged-in user, if any.
    ///
    /// # Errors
    /// `Error::Session` when the store cannot load the session.
    pub async fn user(&self) -> Result<Option<SessionUser>> {
        Ok(self.0.get::<SessionUser>(USER_KEY).await?)
    }

    /// Queues a flash message for the next rendered page.
    ///
    /// # Errors
    /// `Error::Session` when the store cannot load the session.
    pub async fn flash(&self, level: FlashLevel, message: impl Into<String>) -> Result<()> {
        let mut flashes = self
            .0
            .get::<Vec<Flash>>(FLASH_KEY)
            .await?
            .unwrap_or_default();
        flashes.push(Flash::new(level, message));
        self.0.insert(FLASH_KEY, flashes).await?;
        Ok(())
    }

    /// Removes and returns the queued flash messages.
    ///
    /// # Errors
    /// `Error::Session` when the store cannot load the session.
    pub async fn take_flashes(&self) -> Result<Vec<Flash>> {
        Ok(self
            .0
            .remove::<Vec<Flash>>(FLASH_KEY)
            .await?
            .unwrap_or_default())
    }

    /// Binds the user to a fresh session id; pending flashes carry over.
    ///
    /// # Errors
    /// `Error::Session` when the old session cannot be replaced.
    pub async fn login(&self, user: SessionUser) -> Result<()> {
        debug!(user_id = user.id, "Starting authenticated session");
        self.0.cycle_id().await?;
        self.0.insert(USER_KEY, user).await?;
        Ok(())
    }

    /// Forgets the user and moves to a fresh session id; pending flashes carry over.
    ///
    /// # Errors
    /// `Error::Session` when the old session cannot be replaced.
    pub async fn logout(&self) -> Result<()> {
        self.0.remove::<SessionUser>(USER_KEY).await?;
        self.0.cycle_id().await?;
        Ok(())
    }
}

impl From<tower_sessions::Session> for Session {
    fn from(session: tower_sessions::Session) -> Self {
        Self(session)
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> std::result::Result<Self, Self::Rejection> {
        tower_sessions::Session::from_request_parts(parts, state)
            .await
            .map(Self)
            .map_err(IntoResponse::into_response)
    }
}

/// Authenticated request context.
///
/// Extracting it from an anonymous request redirects to [`LOGIN_REDIRECT`].
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The request's session
    pub session: Session,
    /// The logged-in user
    pub user: SessionUser,
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;

        match session.user().await {
            Ok(Some(user)) => Ok(Self { session, user }),
            Ok(None) => {
                debug!(path = %parts.uri.path(), "Anonymous request to protected page");
                Err(Redirect::to(LOGIN_REDIRECT).into_response())
            }
            Err(e) => Err(e.into_response()),
        }
    }
}
