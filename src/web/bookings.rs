//! Booking pages. New bookings are confirmed on creation.

use super::{
    AppState,
    error::form_error,
    forms::BookingForm,
    render_page,
    session::{AuthContext, FlashLevel},
};
use crate::{
    core::{booking, event},
    entities::{BookingStatus, BookingType},
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
    form: &BookingForm,
    booking_id: Option<i64>,
    error: Option<String>,
) -> Result<Response> {
    let events = event::list_event_choices(&*state.db).await?;
    let action = booking_id.map_or_else(
        || "/bookings/create".to_string(),
        |id| format!("/bookings/{id}/edit"),
    );
    let booking_types: Vec<String> = BookingType::iter().map(|t| t.to_value()).collect();
    let statuses: Vec<String> = BookingStatus::iter().map(|s| s.to_value()).collect();

    render_page(
        state,
        auth,
        status,
        "bookings/form.html",
        context! {
            form => form,
            booking_id => booking_id,
            action => action,
            events => events,
            booking_types => booking_types,
            statuses => statuses,
            error => error,
        },
    )
    .await
}

pub async fn list(State(state): State<AppState>, auth: AuthContext) -> Result<Response> {
    let bookings = booking::list_bookings(&*state.db).await?;
    render_page(
        &state,
        &auth,
        StatusCode::OK,
        "bookings/list.html",
        context! { bookings => bookings },
    )
    .await
}

pub async fn create_page(State(state): State<AppState>, auth: AuthContext) -> Result<Response> {
    render_form(&state, &auth, StatusCode::OK, &BookingForm::default(), None, None).await
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthContext,
    Form(form): Form<BookingForm>,
) -> Result<Response> {
    let outcome = match form.to_input() {
        Ok(input) => booking::create_booking(&*state.db, input).await,
        Err(invalid) => Err(invalid.into()),
    };

    let err = match outcome {
        Ok(_) => {
            auth.session
                .flash(FlashLevel::Success, "Booking created and automatically confirmed!")
                .await?;
            return Ok(Redirect::to("/bookings").into_response());
        }
        Err(err) => err,
    };

    let (status, message) = form_error(err)?;
    warn!(reason = %message, "Booking form rejected");
    render_form(&state, &auth, status, &form, None, Some(message)).await
}

pub async fn edit_page(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Response> {
    let booking = booking::require_booking(&*state.db, id).await?;
    render_form(
        &state,
        &auth,
        StatusCode::OK,
        &BookingForm::from_model(&booking),
        Some(id),
        None,
    )
    .await
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
    Form(form): Form<BookingForm>,
) -> Result<Response> {
    let outcome = match form.to_input() {
        Ok(input) => booking::update_booking(&*state.db, id, input).await,
        Err(invalid) => Err(invalid.into()),
    };

    let err = match outcome {
        Ok(_) => {
            auth.session
                .flash(FlashLevel::Success, "Booking updated successfully!")
                .await?;
            return Ok(Redirect::to("/bookings").into_response());
        }
        Err(err) => err,
    };

    let (status, message) = form_error(err)?;
    warn!(booking_id = id, reason = %message, "Booking form rejected");
    render_form(&state, &auth, status, &form, Some(id), Some(message)).await
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    match booking::delete_booking(&*state.db, id).await {
        Ok(_) => {
            auth.session
                .flash(FlashLevel::Success, "Booking deleted successfully!")
                .await?;
        }
        Err(err) if err.kind() == ErrorKind::Persistence => {
            tracing::error!(booking_id = id, error = %err, "Failed to delete booking");
            auth.session
                .flash(FlashLevel::Error, "Error deleting booking. Please try again.")
                .await?;
        }
        Err(err) => return Err(err),
    }
    Ok(Redirect::to("/bookings"))
}
