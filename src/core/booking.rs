//! Booking business logic - Handles vendor bookings attached to events.
//!
//! New bookings are confirmed automatically; later edits may set any status.

use crate::{
    core::{event::require_event, validation},
    entities::{Booking, BookingStatus, BookingType, Event, booking},
    errors::{Error, Result, ValidationError},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;
use tracing::info;

/// Fields accepted when creating or editing a booking.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingInput {
    /// Event the booking belongs to
    pub event_id: i64,
    /// Vendor category
    pub booking_type: BookingType,
    /// Vendor name, required
    pub vendor_name: String,
    /// What was booked
    pub description: Option<String>,
    /// Agreed cost, non-negative when present
    pub cost: Option<f64>,
    /// Date of the service
    pub booking_date: Option<NaiveDate>,
    /// Lifecycle status; ignored by [`create_booking`]
    pub status: BookingStatus,
    /// Vendor phone/email
    pub contact_info: Option<String>,
    /// Internal notes
    pub notes: Option<String>,
}

impl BookingInput {
    /// A pending booking with only the required fields set.
    #[must_use]
    pub fn new(event_id: i64, booking_type: BookingType, vendor_name: impl Into<String>) -> Self {
        Self {
            event_id,
            booking_type,
            vendor_name: vendor_name.into(),
            description: None,
            cost: None,
            booking_date: None,
            status: BookingStatus::Pending,
            contact_info: None,
            notes: None,
        }
    }

    fn validated(mut self) -> std::result::Result<Self, ValidationError> {
        self.vendor_name = validation::require_text("Vendor name", &self.vendor_name)?;
        if let Some(cost) = self.cost {
            validation::check_amount(cost)?;
        }
        Ok(self)
    }
}

/// A booking with the name of its event, for list views.
#[derive(Debug, Clone, Serialize)]
pub struct BookingListing {
    /// The booking row
    pub booking: booking::Model,
    /// Name of the owning event
    pub event_name: Option<String>,
}

/// Retrieves all bookings, most recently created first.
pub async fn list_bookings(db: &DatabaseConnection) -> Result<Vec<BookingListing>> {
    let rows = Booking::find()
        .find_also_related(Event)
        .order_by_desc(booking::Column::CreatedAt)
        .order_by_desc(booking::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(booking, event)| BookingListing {
            booking,
            event_name: event.map(|e| e.name),
        })
        .collect())
}

/// Finds a booking by its unique ID, returning None if it does not exist.
pub async fn get_booking_by_id(
    db: &DatabaseConnection,
    booking_id: i64,
) -> Result<Option<booking::Model>> {
    Booking::find_by_id(booking_id).one(db).await.map_err(Into::into)
}

/// Finds a booking by ID or fails with `Error::NotFound`.
pub async fn require_booking(db: &DatabaseConnection, booking_id: i64) -> Result<booking::Model> {
    get_booking_by_id(db, booking_id)
        .await?
        .ok_or_else(|| Error::not_found("Booking", booking_id))
}

/// Creates a booking for an existing event. The status is always `Confirmed`.
pub async fn create_booking(db: &DatabaseConnection, input: BookingInput) -> Result<booking::Model> {
    let input = BookingInput {
        status: BookingStatus::Confirmed,
        ..input
    };
    insert_booking(db, input).await
}

/// Inserts a booking keeping the given status. Used by seeding.
pub(crate) async fn insert_booking<C>(db: &C, input: BookingInput) -> Result<booking::Model>
where
    C: ConnectionTrait,
{
    let input = input.validated()?;
    require_event(db, input.event_id).await?;

    let now = chrono::Utc::now().naive_utc();
    let booking = booking::ActiveModel {
        event_id: Set(input.event_id),
        booking_type: Set(input.booking_type),
        vendor_name: Set(input.vendor_name),
        description: Set(input.description),
        cost: Set(input.cost),
        booking_date: Set(input.booking_date),
        status: Set(input.status),
        contact_info: Set(input.contact_info),
        notes: Set(input.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let booking = booking.insert(db).await?;
    info!(
        booking_id = booking.id,
        event_id = booking.event_id,
        vendor = %booking.vendor_name,
        "Booking created"
    );
    Ok(booking)
}

/// Replaces every mutable field of a booking, including its status.
pub async fn update_booking(
    db: &DatabaseConnection,
    booking_id: i64,
    input: BookingInput,
) -> Result<booking::Model> {
    let input = input.validated()?;

    let mut booking: booking::ActiveModel = require_booking(db, booking_id).await?.into();
    require_event(db, input.event_id).await?;

    booking.event_id = Set(input.event_id);
    booking.booking_type = Set(input.booking_type);
    booking.vendor_name = Set(input.vendor_name);
    booking.description = Set(input.description);
    booking.cost = Set(input.cost);
    booking.booking_date = Set(input.booking_date);
    booking.status = Set(input.status);
    booking.contact_info = Set(input.contact_info);
    booking.notes = Set(input.notes);
    booking.updated_at = Set(chrono::Utc::now().naive_utc());

    let booking = booking.update(db).await?;
    info!(booking_id, "Booking updated");
    Ok(booking)
}

/// Deletes a booking.
pub async fn delete_booking(db: &DatabaseConnection, booking_id: i64) -> Result<booking::Model> {
    let booking = require_booking(db, booking_id).await?;
    Booking::delete_by_id(booking_id).exec(db).await?;
    info!(booking_id, event_id = booking.event_id, "Booking deleted");
    Ok(booking)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_booking_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_booking(&db, BookingInput::new(1, BookingType::Music, "  ")).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation(ValidationError::MissingField { field: "Vendor name" })
        ));

        let mut input = BookingInput::new(1, BookingType::Music, "DJ Nights");
        input.cost = Some(-10.0);
        let result = create_booking(&db, input).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation(ValidationError::InvalidAmount { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_booking_is_auto_confirmed() -> Result<()> {
        let db = setup_test_db().await?;
        let event = create_test_event(&db, "Gala", None).await?;

        let mut input = BookingInput::new(event.id, BookingType::Catering, "Royal Caterers");
        input.cost = Some(150_000.0);
        input.status = BookingStatus::Cancelled;
        input.booking_date = NaiveDate::from_ymd_opt(2026, 12, 20);
        let booking = create_booking(&db, input).await?;

        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.cost, Some(150_000.0));
        assert_eq!(booking.booking_type, BookingType::Catering);
        assert_eq!(booking.booking_date, NaiveDate::from_ymd_opt(2026, 12, 20));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_booking_unknown_event() -> Result<()> {
        let db = setup_test_db().await?;
        let result =
            create_booking(&db, BookingInput::new(5, BookingType::Venue, "Grand Hotel")).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "Event",
                id: 5
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_booking_sets_status() -> Result<()> {
        let db = setup_test_db().await?;
        let event = create_test_event(&db, "Gala", None).await?;
        let booking = create_test_booking(&db, event.id, Some(500.0)).await?;

        let mut input = BookingInput::new(event.id, BookingType::Photography, "Snap Studio");
        input.status = BookingStatus::Paid;
        input.cost = None;
        let updated = update_booking(&db, booking.id, input).await?;

        assert_eq!(updated.status, BookingStatus::Paid);
        assert_eq!(updated.vendor_name, "Snap Studio");
        assert_eq!(updated.cost, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_and_delete_bookings() -> Result<()> {
        let db = setup_test_db().await?;
        let event = create_test_event(&db, "Expo", None).await?;
        let booking = create_test_booking(&db, event.id, Some(75.0)).await?;

        let listing = list_bookings(&db).await?;
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].event_name.as_deref(), Some("Expo"));

        delete_booking(&db, booking.id).await?;
        assert!(get_booking_by_id(&db, booking.id).await?.is_none());

        let result = delete_booking(&db, booking.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "Booking",
                ..
            }
        ));
        Ok(())
    }
}
