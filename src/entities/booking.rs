//! Booking entity - A vendor engagement for an event.
//!
//! Bookings carry a vendor, a category, an optional cost and a payment status.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// What kind of vendor was booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum BookingType {
    #[sea_orm(string_value = "Venue")]
    Venue,
    #[sea_orm(string_value = "Catering")]
    Catering,
    #[sea_orm(string_value = "Photography")]
    Photography,
    #[sea_orm(string_value = "Music")]
    Music,
    #[sea_orm(string_value = "Decoration")]
    Decoration,
    #[sea_orm(string_value = "Other")]
    Other,
}

/// Booking lifecycle
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum BookingStatus {
    #[default]
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Confirmed")]
    Confirmed,
    #[sea_orm(string_value = "Paid")]
    Paid,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

/// Booking database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    /// Unique identifier for the booking
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the event this booking belongs to
    pub event_id: i64,
    /// Vendor category
    pub booking_type: BookingType,
    /// Name of the vendor
    pub vendor_name: String,
    /// What was booked
    pub description: Option<String>,
    /// Agreed cost; None counts as zero in totals
    pub cost: Option<f64>,
    /// Date of the service
    pub booking_date: Option<Date>,
    /// Booking lifecycle status
    pub status: BookingStatus,
    /// Vendor phone/email
    pub contact_info: Option<String>,
    /// Internal notes
    pub notes: Option<String>,
    /// When the booking was created
    pub created_at: DateTime,
    /// When the booking was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Booking and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each booking belongs to one event
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
