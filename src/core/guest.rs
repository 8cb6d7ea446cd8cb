//! Guest business logic - Handles guest registration and RSVP tracking.
//!
//! Every write validates the contact fields and checks venue capacity. The capacity
//! check reads the live guest total and writes the row inside one database
//! transaction, so two concurrent registrations cannot both commit past the limit
//! on `SQLite`: the second writer fails with a store error instead.

use crate::{
    core::{capacity::can_admit_guest, event::require_event, stats, validation},
    entities::{Event, Guest, RsvpStatus, guest},
    errors::{Error, Result, ValidationError},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::{info, warn};

/// Fields accepted when registering or editing a guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestInput {
    /// Event the guest attends
    pub event_id: i64,
    /// Guest or party name, required
    pub name: String,
    /// Optional Gmail address
    pub email: Option<String>,
    /// Optional ten-digit phone
    pub phone: Option<String>,
    /// RSVP state
    pub rsvp_status: RsvpStatus,
    /// Party size, at least 1
    pub guest_count: i32,
    /// Dietary notes
    pub dietary_requirements: Option<String>,
}

impl GuestInput {
    /// A pending single guest with no contact details.
    #[must_use]
    pub fn new(event_id: i64, name: impl Into<String>) -> Self {
        Self {
            event_id,
            name: name.into(),
            email: None,
            phone: None,
            rsvp_status: RsvpStatus::Pending,
            guest_count: 1,
            dietary_requirements: None,
        }
    }

    fn validated(mut self) -> std::result::Result<Self, ValidationError> {
        self.name = validation::require_text("Guest name", &self.name)?;
        validation::check_email(self.email.as_deref())?;
        validation::check_phone(self.phone.as_deref())?;
        if self.guest_count < 1 {
            return Err(ValidationError::InvalidGuestCount {
                count: i64::from(self.guest_count),
            });
        }
        Ok(self)
    }
}

/// A guest row with the name of its event, for list views.
#[derive(Debug, Clone, Serialize)]
pub struct GuestListing {
    /// The guest row
    pub guest: guest::Model,
    /// Name of the owning event
    pub event_name: Option<String>,
}

/// Retrieves all guests, most recently registered first.
pub async fn list_guests(db: &DatabaseConnection) -> Result<Vec<GuestListing>> {
    let rows = Guest::find()
        .find_also_related(Event)
        .order_by_desc(guest::Column::CreatedAt)
        .order_by_desc(guest::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(guest, event)| GuestListing {
            guest,
            event_name: event.map(|e| e.name),
        })
        .collect())
}

/// Finds a guest by its unique ID, returning None if it does not exist.
pub async fn get_guest_by_id(db: &DatabaseConnection, guest_id: i64) -> Result<Option<guest::Model>> {
    Guest::find_by_id(guest_id).one(db).await.map_err(Into::into)
}

/// Finds a guest by ID or fails with `Error::NotFound`.
pub async fn require_guest<C>(db: &C, guest_id: i64) -> Result<guest::Model>
where
    C: ConnectionTrait,
{
    Guest::find_by_id(guest_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Guest", guest_id))
}

/// Sums `guest_count` over the event's guest rows, optionally leaving one row out.
///
/// The excluded row is the one being edited, whose old party size is replaced.
pub async fn current_guest_total<C>(db: &C, event_id: i64, excluding: Option<i64>) -> Result<i64>
where
    C: ConnectionTrait,
{
    let mut query = Guest::find().filter(guest::Column::EventId.eq(event_id));
    if let Some(guest_id) = excluding {
        query = query.filter(guest::Column::Id.ne(guest_id));
    }
    let guests = query.all(db).await?;
    Ok(stats::guest_total(&guests))
}

/// Registers a guest if the event has room for the whole party.
///
/// Inside an enclosing transaction the capacity check runs in a savepoint.
pub async fn create_guest<C>(db: &C, input: GuestInput) -> Result<guest::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let input = input.validated()?;

    let txn = db.begin().await?;

    let event = require_event(&txn, input.event_id).await?;
    let current = current_guest_total(&txn, event.id, None).await?;
    if let Err(rejection) =
        can_admit_guest(event.venue_capacity, input.guest_count, current).into_result()
    {
        warn!(event_id = event.id, %rejection, "Guest registration rejected");
        return Err(rejection.into());
    }

    let now = chrono::Utc::now().naive_utc();
    let guest = guest::ActiveModel {
        event_id: Set(event.id),
        name: Set(input.name),
        email: Set(input.email),
        phone: Set(input.phone),
        rsvp_status: Set(input.rsvp_status),
        guest_count: Set(input.guest_count),
        dietary_requirements: Set(input.dietary_requirements),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let guest = guest.insert(&txn).await?;

    txn.commit().await?;

    info!(guest_id = guest.id, event_id = guest.event_id, "Guest added");
    Ok(guest)
}

/// Replaces every mutable field of a guest.
///
/// Capacity is checked against the target event with the guest's own previous
/// row left out of the total, so moving a guest between events or changing the
/// party size is held to the same limit as a new registration.
pub async fn update_guest(
    db: &DatabaseConnection,
    guest_id: i64,
    input: GuestInput,
) -> Result<guest::Model> {
    let input = input.validated()?;

    let txn = db.begin().await?;

    let mut guest: guest::ActiveModel = require_guest(&txn, guest_id).await?.into();
    let event = require_event(&txn, input.event_id).await?;
    let current = current_guest_total(&txn, event.id, Some(guest_id)).await?;
    if let Err(rejection) =
        can_admit_guest(event.venue_capacity, input.guest_count, current).into_result()
    {
        warn!(guest_id, event_id = event.id, %rejection, "Guest update rejected");
        return Err(rejection.into());
    }

    guest.event_id = Set(event.id);
    guest.name = Set(input.name);
    guest.email = Set(input.email);
    guest.phone = Set(input.phone);
    guest.rsvp_status = Set(input.rsvp_status);
    guest.guest_count = Set(input.guest_count);
    guest.dietary_requirements = Set(input.dietary_requirements);
    guest.updated_at = Set(chrono::Utc::now().naive_utc());

    let guest = guest.update(&txn).await?;
    txn.commit().await?;

    info!(guest_id, "Guest updated");
    Ok(guest)
}

/// Deletes a guest row.
pub async fn delete_guest(db: &DatabaseConnection, guest_id: i64) -> Result<guest::Model> {
    let guest = require_guest(db, guest_id).await?;
    Guest::delete_by_id(guest_id).exec(db).await?;
    info!(guest_id, event_id = guest.event_id, "Guest deleted");
    Ok(guest)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_guest_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut input = GuestInput::new(1, "Rahul");
        input.email = Some("rahul@yahoo.com".to_string());
        let result = create_guest(&db, input).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation(ValidationError::InvalidEmail)
        ));

        let mut input = GuestInput::new(1, "Rahul");
        input.phone = Some("+91-9876543210".to_string());
        let result = create_guest(&db, input).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation(ValidationError::InvalidPhone)
        ));

        let mut input = GuestInput::new(1, "Rahul");
        input.guest_count = 0;
        let result = create_guest(&db, input).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation(ValidationError::InvalidGuestCount { count: 0 })
        ));

        let result = create_guest(&db, GuestInput::new(1, "")).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation(ValidationError::MissingField { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_guest_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let event = create_test_event(&db, "Conference", None).await?;

        let mut input = GuestInput::new(event.id, "Priya Patel");
        input.email = Some("priya.patel@gmail.com".to_string());
        input.phone = Some("9876543211".to_string());
        input.rsvp_status = RsvpStatus::Accepted;
        input.guest_count = 2;
        input.dietary_requirements = Some("Vegetarian".to_string());
        let guest = create_guest(&db, input).await?;

        assert_eq!(guest.event_id, event.id);
        assert_eq!(guest.email.as_deref(), Some("priya.patel@gmail.com"));
        assert_eq!(guest.rsvp_status, RsvpStatus::Accepted);
        assert_eq!(guest.guest_count, 2);

        let found = get_guest_by_id(&db, guest.id).await?.unwrap();
        assert_eq!(found, guest);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_guest_unknown_event() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_guest(&db, GuestInput::new(77, "Nobody")).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "Event",
                id: 77
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_capacity_enforced_on_create() -> Result<()> {
        let db = setup_test_db().await?;
        let event = create_test_event(&db, "Small Venue", Some(10)).await?;
        create_test_guest(&db, event.id, "First party", 8).await?;

        // Exactly filling the venue is allowed
        create_test_guest(&db, event.id, "Second party", 2).await?;
        assert_eq!(current_guest_total(&db, event.id, None).await?, 10);

        // One more does not fit
        let err = create_test_guest(&db, event.id, "Late arrival", 1)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Adding 1 guests would exceed venue capacity of 10. Current guests: 10"
        );

        // Nothing was written by the rejected call
        assert_eq!(Guest::find().count(&db).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_unlimited_capacity_admits_any_party() -> Result<()> {
        let db = setup_test_db().await?;
        let event = create_test_event(&db, "Open Air", None).await?;
        create_test_guest(&db, event.id, "Crowd", 10_000).await?;
        assert_eq!(current_guest_total(&db, event.id, None).await?, 10_000);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_guest_excludes_own_row_from_total() -> Result<()> {
        let db = setup_test_db().await?;
        let event = create_test_event(&db, "Dinner", Some(5)).await?;
        let guest = create_test_guest(&db, event.id, "Family", 4).await?;

        // Growing 4 -> 5 fits because the old 4 is not double counted
        let mut input = GuestInput::new(event.id, "Family");
        input.guest_count = 5;
        input.rsvp_status = RsvpStatus::Accepted;
        let updated = update_guest(&db, guest.id, input).await?;
        assert_eq!(updated.guest_count, 5);
        assert_eq!(updated.rsvp_status, RsvpStatus::Accepted);

        // 5 -> 6 does not
        let mut input = GuestInput::new(event.id, "Family");
        input.guest_count = 6;
        let err = update_guest(&db, guest.id, input).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::CapacityExceeded {
                attempted: 6,
                capacity: 5,
                current: 0
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_guest_moving_to_full_event_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let roomy = create_test_event(&db, "Roomy", None).await?;
        let full = create_test_event(&db, "Full", Some(2)).await?;
        create_test_guest(&db, full.id, "Couple", 2).await?;
        let mover = create_test_guest(&db, roomy.id, "Mover", 1).await?;

        let result = update_guest(&db, mover.id, GuestInput::new(full.id, "Mover")).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation(ValidationError::CapacityExceeded { .. })
        ));

        let unchanged = require_guest(&db, mover.id).await?;
        assert_eq!(unchanged.event_id, roomy.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_guest_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let event = create_test_event(&db, "Any", None).await?;
        let result = update_guest(&db, 404, GuestInput::new(event.id, "Ghost")).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "Guest",
                id: 404
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_and_delete_guests() -> Result<()> {
        let db = setup_test_db().await?;
        let event = create_test_event(&db, "Reunion", None).await?;
        let first = create_test_guest(&db, event.id, "First", 1).await?;
        let second = create_test_guest(&db, event.id, "Second", 1).await?;

        let listing = list_guests(&db).await?;
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].guest.id, second.id);
        assert_eq!(listing[0].event_name.as_deref(), Some("Reunion"));

        let deleted = delete_guest(&db, first.id).await?;
        assert_eq!(deleted.id, first.id);
        assert!(get_guest_by_id(&db, first.id).await?.is_none());

        let result = delete_guest(&db, first.id).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));
        Ok(())
    }
}
