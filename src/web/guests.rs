//! Guest pages. Submissions are checked against the chosen event's venue capacity.

use super::{
    AppState,
    error::form_error,
    forms::GuestForm,
    render_page,
    session::{AuthContext, FlashLevel},
};
use crate::{
    core::{event, guest},
    entities::RsvpStatus,
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

async fn render_form(
    state: &AppState,
    auth: &AuthContext,
    status: StatusCode,
    form: &GuestForm,
    guest_id: Option<i64>,
    error: Option<String>,
) -> Result<Response> {
    let events = event::list_event_choices(&*state.db).await?;
    let action = guest_id.map_or_else(
        || "/guests/create".to_string(),
        |id| format!("/guests/{id}/edit"),
    );
    let rsvp_statuses: Vec<String> = RsvpStatus::iter().map(|s| s.to_value()).collect();

    render_page(
        state,
        auth,
        status,
        "guests/form.html",
        context! {
            form => form,
            guest_id => guest_id,
            action => action,
            events => events,
            rsvp_statuses => rsvp_statuses,
            error => error,
        },
    )
    .await
}

pub async fn list(State(state): State<AppState>, auth: AuthContext) -> Result<Response> {
    let guests = guest::list_guests(&*state.db).await?;
    render_page(
        &state,
        &auth,
        StatusCode::OK,
        "guests/list.html",
        context! { guests => guests },
    )
    .await
}

pub async fn create_page(State(state): State<AppState>, auth: AuthContext) -> Result<Response> {
    render_form(&state, &auth, StatusCode::OK, &GuestForm::default(), None, None).await
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthContext,
    Form(form): Form<GuestForm>,
) -> Result<Response> {
    let outcome = match form.to_input() {
        Ok(input) => guest::create_guest(&*state.db, input).await,
        Err(invalid) => Err(invalid.into()),
    };

    let err = match outcome {
        Ok(_) => {
            auth.session
                .flash(FlashLevel::Success, "Guest added successfully!")
                .await?;
            return Ok(Redirect::to("/guests").into_response());
        }
        Err(err) => err,
    };

    let (status, message) = form_error(err)?;
    warn!(reason = %message, "Guest form rejected");
    render_form(&state, &auth, status, &form, None, Some(message)).await
}

pub async fn edit_page(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Response> {
    let guest = guest::require_guest(&*state.db, id).await?;
    render_form(
        &state,
        &auth,
        StatusCode::OK,
        &GuestForm::from_model(&guest),
        Some(id),
        None,
    )
    .await
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
    Form(form): Form<GuestForm>,
) -> Result<Response> {
    let outcome = match form.to_input() {
        Ok(input) => guest::update_guest(&*state.db, id, input).await,
        Err(invalid) => Err(invalid.into()),
    };

    let err = match outcome {
        Ok(_) => {
            auth.session
                .flash(FlashLevel::Success, "Guest updated successfully!")
                .await?;
            return Ok(Redirect::to("/guests").into_response());
        }
        Err(err) => err,
    };

    let (status, message) = form_error(err)?;
    warn!(guest_id = id, reason = %message, "Guest form rejected");
    render_form(&state, &auth, status, &form, Some(id), Some(message)).await
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    match guest::delete_guest(&*state.db, id).await {
        Ok(_) => {
            auth.session
                .flash(FlashLevel::Success, "Guest deleted successfully!")
                .await?;
        }
        Err(err) if err.kind() == ErrorKind::Persistence => {
            tracing::error!(guest_id = id, error = %err, "Failed to delete guest");
            auth.session
                .flash(FlashLevel::Error, "Error deleting guest. Please try again.")
                .await?;
        }
        Err(err) => return Err(err),
    }
    Ok(Redirect::to("/guests"))
}
