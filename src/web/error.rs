//! HTTP mapping of [`Error`].
//!
//! Validation failures on forms are recovered by the handlers, which re-render
//! the form via [`form_error`]. Anything else that reaches the response boundary
//! becomes a standalone error page.

use crate::errors::{Error, ErrorKind};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::{Environment, context};
use std::sync::LazyLock;
use tracing::error;

/// Message shown in place of store and internal failures
pub const GENERIC_FAILURE: &str = "Something went wrong while saving. Please try again.";

static ERROR_PAGE: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    if let Err(e) = env.add_template("error.html", include_str!("../../templates/error.html")) {
        error!("Error page template is invalid: {}", e);
    }
    env
});

impl Error {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Persistence | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show to the user.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::NotFound => self.to_string(),
            ErrorKind::Persistence | ErrorKind::Internal => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Splits a failed form submission into the status and message the form is
/// re-rendered with. Not-found and internal errors are handed back for the
/// error page.
///
/// # Errors
/// Returns the original error when the form should not be re-rendered.
pub fn form_error(err: Error) -> Result<(StatusCode, String), Error> {
    match err.kind() {
        ErrorKind::Validation => Ok((err.status(), err.public_message())),
        ErrorKind::Persistence => {
            error!(error = %err, "Store failure while saving form");
            Ok((err.status(), err.public_message()))
        }
        ErrorKind::NotFound | ErrorKind::Internal => Err(err),
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if matches!(self.kind(), ErrorKind::Persistence | ErrorKind::Internal) {
            error!(error = %self, "Request failed");
        }

        let title = status.canonical_reason().unwrap_or("Error");
        let body = ERROR_PAGE
            .get_template("error.html")
            .and_then(|template| {
                template.render(context! {
                    status => status.as_u16(),
                    title => title,
                    message => self.public_message(),
                })
            })
            .unwrap_or_else(|e| {
                error!("Failed to render error page: {}", e);
                title.to_string()
            });

        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::ValidationError;

    #[test]
    fn test_form_error_keeps_validation_message() {
        let (status, message) = form_error(ValidationError::InvalidPhone.into()).unwrap();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(message, "Phone number must be exactly 10 digits");
    }

    #[test]
    fn test_form_error_hides_store_details() {
        let err = Error::Database(sea_orm::DbErr::Custom("UNIQUE constraint failed".to_string()));
        let (status, message) = form_error(err).unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, GENERIC_FAILURE);
    }

    #[test]
    fn test_form_error_passes_through_not_found() {
        let err = form_error(Error::not_found("Event", 9)).unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_not_found_renders_page() {
        let response = Error::not_found("Guest", 4).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
