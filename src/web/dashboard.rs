use super::{AppState, render_page, session::AuthContext};
use crate::{core::stats, errors::Result};
use axum::{extract::State, http::StatusCode, response::Response};
use minijinja::context;

/// Dashboard with store-wide counts, budget and RSVP breakdown.
pub async fn dashboard(State(state): State<AppState>, auth: AuthContext) -> Result<Response> {
    let today = chrono::Local::now().date_naive();
    let summary = stats::load_dashboard_summary(&*state.db, today).await?;

    render_page(
        &state,
        &auth,
        StatusCode::OK,
        "dashboard.html",
        context! { summary => summary, today => today.to_string() },
    )
    .await
}
