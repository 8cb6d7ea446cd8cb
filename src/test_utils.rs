//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        booking::{self, BookingInput},
        event::{self, EventInput},
        guest::{self, GuestInput},
        user::Registration,
    },
    entities::{self, BookingType},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Event input with sensible defaults.
///
/// # Defaults
/// * `event_date`: 2030-06-01 (always upcoming)
/// * `budget`: 10000.0
/// * `status`: Planning
#[allow(clippy::unwrap_used)]
pub fn event_input(name: &str) -> EventInput {
    let mut input = EventInput::new(name, NaiveDate::from_ymd_opt(2030, 6, 1).unwrap());
    input.budget = 10_000.0;
    input
}

/// Creates a test event with the given venue capacity.
pub async fn create_test_event(
    db: &DatabaseConnection,
    name: &str,
    venue_capacity: Option<i32>,
) -> Result<entities::event::Model> {
    let mut input = event_input(name);
    input.venue_capacity = venue_capacity;
    event::create_event(db, input).await
}

/// Creates a pending test guest with the given party size.
pub async fn create_test_guest(
    db: &DatabaseConnection,
    event_id: i64,
    name: &str,
    guest_count: i32,
) -> Result<entities::guest::Model> {
    let mut input = GuestInput::new(event_id, name);
    input.guest_count = guest_count;
    guest::create_guest(db, input).await
}

/// Creates a test booking with the given cost.
///
/// # Defaults
/// * `booking_type`: Other
/// * `vendor_name`: `"Test Vendor"`
pub async fn create_test_booking(
    db: &DatabaseConnection,
    event_id: i64,
    cost: Option<f64>,
) -> Result<entities::booking::Model> {
    let mut input = BookingInput::new(event_id, BookingType::Other, "Test Vendor");
    input.cost = cost;
    booking::create_booking(db, input).await
}

/// Registration form values with a matching password confirmation.
pub fn registration(username: &str, email: &str, password: &str) -> Registration {
    Registration {
        username: username.to_string(),
        email: email.to_string(),
        phone: None,
        password: password.to_string(),
        confirm_password: password.to_string(),
        full_name: Some(format!("{username} Tester")),
    }
}
