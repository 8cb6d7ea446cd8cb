//! HTTP layer - router, shared state and page rendering.
//!
//! Every management page requires an [`AuthContext`]; the login and
//! registration pages only need a [`Session`]. Handlers call into
//! [`crate::core`] and never touch entities directly.

mod auth;
mod bookings;
mod dashboard;
/// HTTP mapping of application errors
pub mod error;
mod events;
/// Form bodies parsed into core inputs
pub mod forms;
mod guests;
/// Sessions, flash messages and authentication
pub mod session;
/// Embedded page templates
pub mod templates;

use crate::{config::app::ServerConfig, errors::Result};
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use minijinja::{Value, context};
use sea_orm::DatabaseConnection;
use session::{AuthContext, Session};
use std::sync::Arc;
use templates::Templates;
use tower_http::trace::TraceLayer;
use tracing::info;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
    /// Compiled templates
    pub templates: Arc<Templates>,
}

impl AppState {
    /// Builds the state, compiling templates.
    ///
    /// # Errors
    /// Returns `Error::Template` when a template fails to compile.
    pub fn new(db: Arc<DatabaseConnection>) -> Result<Self> {
        Ok(Self {
            db,
            templates: Arc::new(Templates::new()?),
        })
    }
}

/// Builds the application router; sessions expire after `session_idle_minutes`
/// without a request.
pub fn router(state: AppState, session_idle_minutes: i64) -> Router {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
        .route("/", get(dashboard::dashboard))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/events", get(events::list))
        .route("/events/create", get(events::create_page).post(events::create))
        .route("/events/{id}", get(events::detail))
        .route("/events/{id}/edit", get(events::edit_page).post(events::update))
        .route("/events/{id}/delete", post(events::delete))
        .route("/guests", get(guests::list))
        .route("/guests/create", get(guests::create_page).post(guests::create))
        .route("/guests/{id}/edit", get(guests::edit_page).post(guests::update))
        .route("/guests/{id}/delete", post(guests::delete))
        .route("/bookings", get(bookings::list))
        .route("/bookings/create", get(bookings::create_page).post(bookings::create))
        .route("/bookings/{id}/edit", get(bookings::edit_page).post(bookings::update))
        .route("/bookings/{id}/delete", post(bookings::delete))
        .route("/health", get(health))
        .layer(session::session_layer(session_idle_minutes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl+C.
///
/// # Errors
/// Returns an error if templates fail to compile or the address cannot be bound.
pub async fn serve(server: &ServerConfig, db: DatabaseConnection) -> Result<()> {
    let state = AppState::new(Arc::new(db))?;
    let listener = tokio::net::TcpListener::bind(&server.bind_addr).await?;
    info!("Event planner listening on http://{}", server.bind_addr);

    axum::serve(listener, router(state, server.session_idle_minutes))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn health() -> &'static str {
    "ok"
}

/// Renders a page, adding the pending flashes and the logged-in user.
pub(crate) async fn render(
    state: &AppState,
    session: &Session,
    status: StatusCode,
    name: &str,
    ctx: Value,
) -> Result<Response> {
    let flashes = session.take_flashes().await?;
    let current_user = session.user().await?;
    let html = state.templates.render(
        name,
        context! {
            flashes => flashes,
            current_user => current_user,
            ..ctx
        },
    )?;
    Ok((status, Html(html)).into_response())
}

/// Renders a page for an authenticated request.
pub(crate) async fn render_page(
    state: &AppState,
    auth: &AuthContext,
    status: StatusCode,
    name: &str,
    ctx: Value,
) -> Result<Response> {
    render(state, &auth.session, status, name, ctx).await
}
