//! Event pages.

use super::{
    AppState,
    error::form_error,
    forms::EventForm,
    render_page,
    session::{AuthContext, FlashLevel},
};
use crate::{
    core::event,
    entities::EventStatus,
    errors::{ErrorKind, Result},
};
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use minijinja::context;
use sea_orm::{ActiveEnum, Iterable};
use tracing::warn;

fn status_choices() -> Vec<String> {
    EventStatus::iter().map(|status| status.to_value()).collect()
}

async fn render_form(
    state: &AppState,
    auth: &AuthContext,
    status: StatusCode,
    form: &EventForm,
    event_id: Option<i64>,
    error: Option<String>,
) -> Result<Response> {
    let action = event_id.map_or_else(
        || "/events/create".to_string(),
        |id| format!("/events/{id}/edit"),
    );
    render_page(
        state,
        auth,
        status,
        "events/form.html",
        context! {
            form => form,
            event_id => event_id,
            action => action,
            statuses => status_choices(),
            error => error,
        },
    )
    .await
}

pub async fn list(State(state): State<AppState>, auth: AuthContext) -> Result<Response> {
    let events = event::list_events(&*state.db).await?;
    render_page(
        &state,
        &auth,
        StatusCode::OK,
        "events/list.html",
        context! { events => events },
    )
    .await
}

pub async fn create_page(State(state): State<AppState>, auth: AuthContext) -> Result<Response> {
    render_form(&state, &auth, StatusCode::OK, &EventForm::default(), None, None).await
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthContext,
    Form(form): Form<EventForm>,
) -> Result<Response> {
    let outcome = match form.to_input() {
        Ok(input) => event::create_event(&*state.db, input).await,
        Err(invalid) => Err(invalid.into()),
    };

    let err = match outcome {
        Ok(_) => {
            auth.session
                .flash(FlashLevel::Success, "Event created successfully!")
                .await?;
            return Ok(Redirect::to("/events").into_response());
        }
        Err(err) => err,
    };

    let (status, message) = form_error(err)?;
    warn!(reason = %message, "Event form rejected");
    render_form(&state, &auth, status, &form, None, Some(message)).await
}

pub async fn detail(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Response> {
    let detail = event::get_event_detail(&*state.db, id).await?;
    render_page(
        &state,
        &auth,
        StatusCode::OK,
        "events/detail.html",
        context! { detail => detail },
    )
    .await
}

pub async fn edit_page(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Response> {
    let event = event::require_event(&*state.db, id).await?;
    render_form(
        &state,
        &auth,
        StatusCode::OK,
        &EventForm::from_model(&event),
        Some(id),
        None,
    )
    .await
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
    Form(form): Form<EventForm>,
) -> Result<Response> {
    let outcome = match form.to_input() {
        Ok(input) => event::update_event(&*state.db, id, input).await,
        Err(invalid) => Err(invalid.into()),
    };

    let err = match outcome {
        Ok(_) => {
            auth.session
                .flash(FlashLevel::Success, "Event updated successfully!")
                .await?;
            return Ok(Redirect::to(&format!("/events/{id}")).into_response());
        }
        Err(err) => err,
    };

    let (status, message) = form_error(err)?;
    warn!(event_id = id, reason = %message, "Event form rejected");
    render_form(&state, &auth, status, &form, Some(id), Some(message)).await
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    match event::delete_event(&*state.db, id).await {
        Ok(_) => {
            auth.session
                .flash(FlashLevel::Success, "Event deleted successfully!")
                .await?;
        }
        Err(err) if err.kind() == ErrorKind::Persistence => {
            tracing::error!(event_id = id, error = %err, "Failed to delete event");
            auth.session
                .flash(FlashLevel::Error, "Error deleting event. Please try again.")
                .await?;
        }
        Err(err) => return Err(err),
    }
    Ok(Redirect::to("/events"))
}
