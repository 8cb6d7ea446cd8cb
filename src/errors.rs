//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. Errors are grouped
//! by [`ErrorKind`] so the web layer can decide uniformly whether to re-render a
//! form, show a not-found page, or report a store failure. Nothing is retried.

use thiserror::Error;

/// A rejected input. The `Display` text is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Email present but not a `@gmail.com` address
    #[error("Only Gmail addresses are accepted (e.g., user@gmail.com)")]
    InvalidEmail,

    /// Phone present but not exactly ten digits
    #[error("Phone number must be exactly 10 digits")]
    InvalidPhone,

    /// Admitting the guest row would push the event past its venue capacity
    #[error(
        "Adding {attempted} guests would exceed venue capacity of {capacity}. Current guests: {current}"
    )]
    CapacityExceeded {
        /// Party size of the rejected row
        attempted: i64,
        /// Configured venue capacity
        capacity: i64,
        /// Guests already registered for the event
        current: i64,
    },

    /// An event edit tried to lower capacity under the registered total
    #[error("Venue capacity of {capacity} is below the {current} guests already registered")]
    CapacityBelowGuestTotal {
        /// Requested venue capacity
        capacity: i64,
        /// Guests already registered for the event
        current: i64,
    },

    /// Guest count must be a positive integer
    #[error("Guest count must be at least 1 (got {count})")]
    InvalidGuestCount {
        /// The rejected count
        count: i64,
    },

    /// Negative or non-finite money amount
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Registration password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Registration username already in use
    #[error("Username already exists")]
    UsernameTaken,

    /// Registration email already in use
    #[error("Email already registered")]
    EmailTaken,

    /// A required form field was left empty
    #[error("{field} is required")]
    MissingField {
        /// Human-readable field label
        field: &'static str,
    },

    /// A form field could not be parsed
    #[error("Invalid {field}: {value}")]
    InvalidField {
        /// Human-readable field label
        field: &'static str,
        /// The raw submitted value
        value: String,
    },
}

/// Application error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before anything was written
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Login with an unknown account or a wrong password
    #[error("Invalid username/email or password")]
    InvalidCredentials,

    /// Lookup of a row that does not exist
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity name, e.g. `"Event"`
        entity: &'static str,
        /// The requested primary key
        id: i64,
    },

    /// Store failure; the surrounding transaction has been rolled back
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Unreadable or invalid `config.toml` or environment override
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong and where
        message: String,
    },

    /// Template failed to compile or render
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Session store could not load or save the request's session
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Password hasher rejected its input or parameters
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),

    /// Filesystem or socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable present but not valid unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Coarse classification used at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Recoverable by correcting the submitted form
    Validation,
    /// The addressed row does not exist
    NotFound,
    /// The store rejected or failed the operation
    Persistence,
    /// Startup, configuration, or rendering failure
    Internal,
}

impl Error {
    /// Shorthand for a missing row.
    #[must_use]
    pub const fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Classifies this error for the boundary layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidCredentials => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Persistence,
            Self::Config { .. }
            | Self::Template(_)
            | Self::Session(_)
            | Self::PasswordHash(_)
            | Self::Io(_)
            | Self::EnvVar(_) => ErrorKind::Internal,
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
