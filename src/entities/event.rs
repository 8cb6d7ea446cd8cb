//! Event entity - Represents a planned event and its venue constraints.
//!
//! Each event has a date, optional venue capacity, budget, and a planning status.
//! An event owns its guests and bookings; deleting it removes both.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Planning status of an event
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum EventStatus {
    /// Still being organised
    #[default]
    #[sea_orm(string_value = "Planning")]
    Planning,
    /// Date and venue are fixed
    #[sea_orm(string_value = "Confirmed")]
    Confirmed,
    /// The event took place
    #[sea_orm(string_value = "Completed")]
    Completed,
    /// Called off
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

/// Event database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    /// Unique identifier for the event
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Annual Tech Conference")
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Day the event takes place
    pub event_date: Date,
    /// Start time, if known
    pub event_time: Option<Time>,
    /// Venue address or name
    pub location: Option<String>,
    /// Venue latitude
    pub latitude: Option<f64>,
    /// Venue longitude
    pub longitude: Option<f64>,
    /// Upper bound on the summed `guest_count` of all guests; None means unlimited
    pub venue_capacity: Option<i32>,
    /// Planned budget
    pub budget: f64,
    /// Planning status
    pub status: EventStatus,
    /// When the event was created
    pub created_at: DateTime,
    /// When the event was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Event and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One event has many guests
    #[sea_orm(has_many = "super::guest::Entity")]
    Guests,
    /// One event has many bookings
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
}

impl Related<super::guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guests.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
