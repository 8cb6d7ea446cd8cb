//! Guest entity - One registration row for an event.
//!
//! A row stands for a party of `guest_count` people sharing one RSVP.
//! Contact fields are optional but validated on write.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A guest's response to the invitation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum RsvpStatus {
    /// No answer yet
    #[default]
    #[sea_orm(string_value = "Pending")]
    Pending,
    /// Attending
    #[sea_orm(string_value = "Accepted")]
    Accepted,
    /// Not attending
    #[sea_orm(string_value = "Declined")]
    Declined,
}

/// Guest database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guests")]
pub struct Model {
    /// Unique identifier for the guest row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the event this guest is registered for
    pub event_id: i64,
    /// Name of the guest or party
    pub name: String,
    /// Gmail address, if given
    pub email: Option<String>,
    /// Ten-digit phone number, if given
    pub phone: Option<String>,
    /// RSVP state
    pub rsvp_status: RsvpStatus,
    /// Party size for this registration (at least 1)
    pub guest_count: i32,
    /// Dietary notes for catering
    pub dietary_requirements: Option<String>,
    /// When the guest was registered
    pub created_at: DateTime,
    /// When the guest was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Guest and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each guest belongs to one event
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_delete = "Cascade"
    )]
    Event,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
