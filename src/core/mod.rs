//! Core business logic - framework-agnostic event, guest, booking and account operations.
//!
//! `capacity`, `validation` and `stats` are pure; the remaining modules read and
//! write the database through `SeaORM` and call into them.

/// Booking CRUD
pub mod booking;
/// Venue capacity admission
pub mod capacity;
/// Event CRUD, cascade delete and detail view
pub mod event;
/// Guest CRUD with capacity enforcement
pub mod guest;
/// Password hashing and verification
pub mod password;
/// Sample data seeding from config.toml
pub mod seed;
/// Dashboard and cost aggregates
pub mod stats;
/// Account registration and login
pub mod user;
/// Email, phone and amount rules
pub mod validation;
