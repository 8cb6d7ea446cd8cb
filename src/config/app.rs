//! Application configuration loading from config.toml
//!
//! `config.toml` holds the server bind address, the database URL, and an optional
//! list of sample events used to seed an empty database. Every section has
//! defaults, so a missing file yields a working configuration. The environment
//! variables `CONFIG_PATH`, `DATABASE_URL` and `BIND_ADDR` take precedence.

use crate::config::database::{DEFAULT_DATABASE_URL, resolve_database_url};
use crate::entities::{BookingStatus, BookingType, EventStatus, RsvpStatus};
use crate::errors::{Error, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Database settings
    pub database: DatabaseConfig,
    /// Sample data inserted into an empty database
    pub seed: SeedConfig,
}

/// HTTP server settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_addr: String,
    /// Minutes without a request before a session expires
    pub session_idle_minutes: i64,
}

/// Idle lifetime of a session when `config.toml` does not set one
pub const DEFAULT_SESSION_IDLE_MINUTES: i64 = 8 * 60;

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5001".to_string(),
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
        }
    }
}

/// Database settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SeaORM` connection URL
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

/// Sample data section
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Events to create, each with its own guests and bookings
    pub events: Vec<SeedEvent>,
}

/// A sample event
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEvent {
    /// Event name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Date of the event
    pub event_date: NaiveDate,
    /// Start time
    #[serde(default)]
    pub event_time: Option<NaiveTime>,
    /// Venue or address
    #[serde(default)]
    pub location: Option<String>,
    /// Maximum guests, unlimited when absent
    #[serde(default)]
    pub venue_capacity: Option<i32>,
    /// Planned spend
    #[serde(default)]
    pub budget: f64,
    /// Lifecycle status
    #[serde(default)]
    pub status: EventStatus,
    /// Guests registered for the event
    #[serde(default)]
    pub guests: Vec<SeedGuest>,
    /// Vendor bookings for the event
    #[serde(default)]
    pub bookings: Vec<SeedBooking>,
}

/// A sample guest of a [`SeedEvent`]
#[derive(Debug, Clone, Deserialize)]
pub struct SeedGuest {
    /// Guest or party name
    pub name: String,
    /// Gmail address
    #[serde(default)]
    pub email: Option<String>,
    /// 10-digit phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// RSVP answer
    #[serde(default)]
    pub rsvp_status: RsvpStatus,
    /// Party size, 1 when absent
    #[serde(default = "default_guest_count")]
    pub guest_count: i32,
    /// Free-form notes
    #[serde(default)]
    pub dietary_requirements: Option<String>,
}

/// A sample booking of a [`SeedEvent`]
#[derive(Debug, Clone, Deserialize)]
pub struct SeedBooking {
    /// Kind of vendor service
    pub booking_type: BookingType,
    /// Vendor name
    pub vendor_name: String,
    /// What was booked
    #[serde(default)]
    pub description: Option<String>,
    /// Agreed cost
    #[serde(default)]
    pub cost: Option<f64>,
    /// Date the booking was made
    #[serde(default)]
    pub booking_date: Option<NaiveDate>,
    /// Booking status, kept as configured
    #[serde(default)]
    pub status: BookingStatus,
    /// Vendor contact details
    #[serde(default)]
    pub contact_info: Option<String>,
}

const fn default_guest_count() -> i32 {
    1
}

/// Parses a configuration from TOML text.
///
/// # Errors
/// Returns `Error::Config` when the TOML syntax is invalid or a field has the
/// wrong type.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads the application configuration the way the binary does.
///
/// Reads `CONFIG_PATH` (default `config.toml`); a missing file falls back to
/// defaults. `DATABASE_URL` and `BIND_ADDR` override the file.
pub fn load_app_config() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

    let mut config = if Path::new(&path).exists() {
        let config = load_config(&path)?;
        info!("Loaded configuration from {path}");
        config
    } else {
        info!("No configuration file at {path}, using defaults");
        AppConfig::default()
    };

    config.database.url = resolve_database_url(&config.database.url);
    if let Ok(bind_addr) = std::env::var("BIND_ADDR") {
        config.server.bind_addr = bind_addr;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [server]
            bind_addr = "0.0.0.0:8080"
            session_idle_minutes = 30

            [database]
            url = "sqlite::memory:"

            [[seed.events]]
            name = "Corporate Gala Dinner"
            event_date = "2025-12-20"
            event_time = "19:00:00"
            venue_capacity = 150
            budget = 300000.0
            status = "Confirmed"

            [[seed.events.guests]]
            name = "Amit Kumar"
            email = "amit.kumar@gmail.com"
            phone = "9876543212"
            rsvp_status = "Accepted"
            guest_count = 2

            [[seed.events.bookings]]
            booking_type = "Catering"
            vendor_name = "Royal Caterers"
            cost = 150000.0
            status = "Confirmed"
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.server.session_idle_minutes, 30);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.seed.events.len(), 1);

        let event = &config.seed.events[0];
        assert_eq!(event.event_date, NaiveDate::from_ymd_opt(2025, 12, 20).unwrap());
        assert_eq!(event.event_time, NaiveTime::from_hms_opt(19, 0, 0));
        assert_eq!(event.venue_capacity, Some(150));
        assert_eq!(event.status, EventStatus::Confirmed);
        assert_eq!(event.guests[0].rsvp_status, RsvpStatus::Accepted);
        assert_eq!(event.guests[0].guest_count, 2);
        assert_eq!(event.bookings[0].booking_type, BookingType::Catering);
        assert_eq!(event.bookings[0].cost, Some(150_000.0));
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:5001");
        assert_eq!(
            config.server.session_idle_minutes,
            DEFAULT_SESSION_IDLE_MINUTES
        );
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert!(config.seed.events.is_empty());
    }

    #[test]
    fn test_seed_defaults() {
        let toml_str = r#"
            [[seed.events]]
            name = "Offsite"
            event_date = "2026-03-01"

            [[seed.events.guests]]
            name = "Priya Patel"
        "#;

        let config = parse_config(toml_str).unwrap();
        let event = &config.seed.events[0];
        assert_eq!(event.status, EventStatus::Planning);
        assert_eq!(event.budget, 0.0);
        assert!(event.venue_capacity.is_none());
        assert_eq!(event.guests[0].guest_count, 1);
        assert_eq!(event.guests[0].rsvp_status, RsvpStatus::Pending);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let result = parse_config("[server]\nbind_addr = 5");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
