//! Event business logic - Handles all event-related operations.
//!
//! Provides functions for listing, creating, updating and deleting events, and for
//! assembling the event detail view. Deleting an event removes its guests and
//! bookings in the same database transaction.

use crate::{
    core::{capacity, guest::current_guest_total, stats, validation},
    entities::{Booking, Event, EventStatus, Guest, booking, event, guest},
    errors::{Error, Result, ValidationError},
};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::info;

/// Fields accepted when creating or editing an event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventInput {
    /// Display name, required
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Day of the event
    pub event_date: NaiveDate,
    /// Start time
    pub event_time: Option<NaiveTime>,
    /// Venue address or name
    pub location: Option<String>,
    /// Venue latitude
    pub latitude: Option<f64>,
    /// Venue longitude
    pub longitude: Option<f64>,
    /// Maximum summed guest count; None is unlimited
    pub venue_capacity: Option<i32>,
    /// Planned budget, non-negative
    pub budget: f64,
    /// Planning status
    pub status: EventStatus,
}

impl EventInput {
    /// Minimal input with defaults for everything but name and date.
    #[must_use]
    pub fn new(name: impl Into<String>, event_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            description: None,
            event_date,
            event_time: None,
            location: None,
            latitude: None,
            longitude: None,
            venue_capacity: None,
            budget: 0.0,
            status: EventStatus::Planning,
        }
    }

    fn validated(mut self) -> std::result::Result<Self, ValidationError> {
        self.name = validation::require_text("Event name", &self.name)?;
        validation::check_amount(self.budget)?;
        if let Some(capacity) = self.venue_capacity.filter(|c| *c < 0) {
            return Err(ValidationError::InvalidField {
                field: "Venue capacity",
                value: capacity.to_string(),
            });
        }
        Ok(self)
    }
}

/// Everything the event detail page shows.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    /// The event itself
    pub event: event::Model,
    /// Registered guest rows
    pub guests: Vec<guest::Model>,
    /// Vendor bookings
    pub bookings: Vec<booking::Model>,
    /// Sum of booking costs
    pub total_booking_cost: f64,
    /// Sum of guest party sizes
    pub guest_total: i64,
    /// Seats left, when the venue has a capacity
    pub remaining_capacity: Option<i64>,
}

/// Rows removed by [`delete_event`].
#[derive(Debug, Clone, PartialEq)]
pub struct EventDeletion {
    /// The deleted event
    pub event: event::Model,
    /// Number of guest rows removed with it
    pub guests_removed: u64,
    /// Number of booking rows removed with it
    pub bookings_removed: u64,
}

/// Retrieves all events, latest event date first.
pub async fn list_events(db: &DatabaseConnection) -> Result<Vec<event::Model>> {
    Event::find()
        .order_by_desc(event::Column::EventDate)
        .order_by_desc(event::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all events ordered by name, for pickers on guest and booking forms.
pub async fn list_event_choices(db: &DatabaseConnection) -> Result<Vec<event::Model>> {
    Event::find()
        .order_by_asc(event::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an event by its unique ID, returning None if it does not exist.
pub async fn get_event_by_id<C>(db: &C, event_id: i64) -> Result<Option<event::Model>>
where
    C: ConnectionTrait,
{
    Event::find_by_id(event_id).one(db).await.map_err(Into::into)
}

/// Finds an event by ID or fails with `Error::NotFound`.
pub async fn require_event<C>(db: &C, event_id: i64) -> Result<event::Model>
where
    C: ConnectionTrait,
{
    get_event_by_id(db, event_id)
        .await?
        .ok_or_else(|| Error::not_found("Event", event_id))
}

/// Creates a new event after validating name, budget and capacity.
pub async fn create_event<C>(db: &C, input: EventInput) -> Result<event::Model>
where
    C: ConnectionTrait,
{
    let input = input.validated()?;
    let now = chrono::Utc::now().naive_utc();

    let event = event::ActiveModel {
        name: Set(input.name),
        description: Set(input.description),
        event_date: Set(input.event_date),
        event_time: Set(input.event_time),
        location: Set(input.location),
        latitude: Set(input.latitude),
        longitude: Set(input.longitude),
        venue_capacity: Set(input.venue_capacity),
        budget: Set(input.budget),
        status: Set(input.status),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let event = event.insert(db).await?;
    info!(event_id = event.id, name = %event.name, "Event created");
    Ok(event)
}

/// Replaces every mutable field of an event.
///
/// The new venue capacity may not be lower than the guests already registered;
/// the guest total is read in the same transaction as the update.
pub async fn update_event(
    db: &DatabaseConnection,
    event_id: i64,
    input: EventInput,
) -> Result<event::Model> {
    let input = input.validated()?;

    let txn = db.begin().await?;

    let mut event: event::ActiveModel = require_event(&txn, event_id).await?.into();

    let current = current_guest_total(&txn, event_id, None).await?;
    capacity::check_capacity_covers_total(input.venue_capacity, current)?;

    event.name = Set(input.name);
    event.description = Set(input.description);
    event.event_date = Set(input.event_date);
    event.event_time = Set(input.event_time);
    event.location = Set(input.location);
    event.latitude = Set(input.latitude);
    event.longitude = Set(input.longitude);
    event.venue_capacity = Set(input.venue_capacity);
    event.budget = Set(input.budget);
    event.status = Set(input.status);
    event.updated_at = Set(chrono::Utc::now().naive_utc());

    let event = event.update(&txn).await?;
    txn.commit().await?;

    info!(event_id, "Event updated");
    Ok(event)
}

/// Deletes an event together with all of its guests and bookings.
pub async fn delete_event(db: &DatabaseConnection, event_id: i64) -> Result<EventDeletion> {
    let txn = db.begin().await?;

    let event = require_event(&txn, event_id).await?;

    let guests_removed = Guest::delete_many()
        .filter(guest::Column::EventId.eq(event_id))
        .exec(&txn)
        .await?
        .rows_affected;
    let bookings_removed = Booking::delete_many()
        .filter(booking::Column::EventId.eq(event_id))
        .exec(&txn)
        .await?
        .rows_affected;
    Event::delete_by_id(event_id).exec(&txn).await?;

    txn.commit().await?;

    info!(
        event_id,
        guests_removed, bookings_removed, "Event deleted with dependents"
    );
    Ok(EventDeletion {
        event,
        guests_removed,
        bookings_removed,
    })
}

/// Loads an event with its guests and bookings and computes the totals.
pub async fn get_event_detail(db: &DatabaseConnection, event_id: i64) -> Result<EventDetail> {
    let event = require_event(db, event_id).await?;

    let guests = Guest::find()
        .filter(guest::Column::EventId.eq(event_id))
        .order_by_asc(guest::Column::Name)
        .all(db)
        .await?;
    let bookings = Booking::find()
        .filter(booking::Column::EventId.eq(event_id))
        .order_by_asc(booking::Column::Id)
        .all(db)
        .await?;

    let total_booking_cost = stats::compute_booking_cost_total(&bookings);
    let guest_total = stats::guest_total(&guests);
    let remaining_capacity = event
        .venue_capacity
        .map(|capacity| i64::from(capacity) - guest_total);

    Ok(EventDetail {
        event,
        guests,
        bookings,
        total_booking_cost,
        guest_total,
        remaining_capacity,
    })
}
