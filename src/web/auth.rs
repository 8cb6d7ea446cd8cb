//! Login, registration and logout pages.

use super::{
    AppState,
    error::form_error,
    forms::{LoginForm, LoginQuery, RegisterForm},
    render,
    session::{FlashLevel, LOGIN_REQUIRED, Session, SessionUser},
};
use crate::{core::user, errors::Result};
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use minijinja::context;
use tracing::warn;

pub async fn login_page(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LoginQuery>,
) -> Result<Response> {
    if session.user().await?.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }
    let notice = query.required.map(|_| LOGIN_REQUIRED);
    render(
        &state,
        &session,
        StatusCode::OK,
        "auth/login.html",
        context! { form => LoginForm::default(), error => notice },
    )
    .await
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let err = match user::authenticate(&*state.db, &form.username, &form.password).await {
        Ok(user) => {
            let user = SessionUser::from(&user);
            let greeting = format!("Welcome back, {}!", user.display_name);
            session.login(user).await?;
            session.flash(FlashLevel::Success, greeting).await?;
            return Ok(Redirect::to("/dashboard").into_response());
        }
        Err(err) => err,
    };

    let (status, message) = form_error(err)?;
    render(
        &state,
        &session,
        status,
        "auth/login.html",
        context! { form => form, error => message },
    )
    .await
}

pub async fn register_page(State(state): State<AppState>, session: Session) -> Result<Response> {
    if session.user().await?.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }
    render(
        &state,
        &session,
        StatusCode::OK,
        "auth/register.html",
        context! { form => RegisterForm::default() },
    )
    .await
}

pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let err = match user::register_user(&*state.db, form.to_registration()).await {
        Ok(_) => {
            session
                .flash(
                    FlashLevel::Success,
                    "Account created successfully! Please login.",
                )
                .await?;
            return Ok(Redirect::to("/login").into_response());
        }
        Err(err) => err,
    };

    let (status, message) = form_error(err)?;
    warn!(username = %form.username, reason = %message, "Registration rejected");
    render(
        &state,
        &session,
        status,
        "auth/register.html",
        context! { form => form, error => message },
    )
    .await
}

pub async fn logout(session: Session) -> Result<Redirect> {
    session.logout().await?;
    session
        .flash(FlashLevel::Success, "You have been logged out successfully")
        .await?;
    Ok(Redirect::to("/login"))
}
