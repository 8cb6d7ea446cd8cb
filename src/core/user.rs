//! Staff account registration and login.
//!
//! Registration applies the same Gmail rule as guest emails (case-sensitive), so
//! there is a single email policy across the application.

use crate::{
    core::{password, validation},
    entities::{User, user},
    errors::{Error, Result, ValidationError},
};
use sea_orm::{Condition, Set, prelude::*};
use tracing::{info, warn};

/// Fields submitted on the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Login name, unique across accounts
    pub username: String,
    /// Gmail address, unique across accounts
    pub email: String,
    /// Optional 10-digit phone number
    pub phone: Option<String>,
    /// Plain-text password, hashed before storage
    pub password: String,
    /// Must equal `password`
    pub confirm_password: String,
    /// Name used in greetings
    pub full_name: Option<String>,
}

/// Creates a new account.
///
/// # Errors
/// Validation errors for mismatched passwords, a non-Gmail email, a bad phone,
/// or a username/email that is already registered.
pub async fn register_user(db: &DatabaseConnection, registration: Registration) -> Result<user::Model> {
    let username = validation::require_text("Username", &registration.username)?;
    let email = validation::require_text("Email", &registration.email)?;
    if registration.password.is_empty() {
        return Err(ValidationError::MissingField { field: "Password" }.into());
    }
    if registration.password != registration.confirm_password {
        return Err(ValidationError::PasswordMismatch.into());
    }
    validation::check_email(Some(email.as_str()))?;
    validation::check_phone(registration.phone.as_deref())?;

    if User::find()
        .filter(user::Column::Username.eq(username.as_str()))
        .one(db)
        .await?
        .is_some()
    {
        return Err(ValidationError::UsernameTaken.into());
    }
    if User::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(db)
        .await?
        .is_some()
    {
        return Err(ValidationError::EmailTaken.into());
    }

    let password_hash = password::hash_password(&registration.password)?;
    let user = user::ActiveModel {
        username: Set(username),
        email: Set(email),
        phone: Set(registration.phone),
        password_hash: Set(password_hash),
        full_name: Set(registration.full_name),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };

    let user = user.insert(db).await?;
    info!(user_id = user.id, username = %user.username, "User registered");
    Ok(user)
}

/// Verifies a login, accepting either the username or the email address.
///
/// # Errors
/// `Error::InvalidCredentials` for an unknown login or a wrong password.
pub async fn authenticate(db: &DatabaseConnection, login: &str, password: &str) -> Result<user::Model> {
    let login = login.trim();
    let user = User::find()
        .filter(
            Condition::any()
                .add(user::Column::Username.eq(login))
                .add(user::Column::Email.eq(login)),
        )
        .one(db)
        .await?;

    match user {
        Some(user) if password::verify_password(password, &user.password_hash) => {
            info!(user_id = user.id, "User logged in");
            Ok(user)
        }
        _ => {
            warn!(login, "Failed login attempt");
            Err(Error::InvalidCredentials)
        }
    }
}

/// Finds a user by ID.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}
