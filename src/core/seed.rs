//! Sample data seeding.
//!
//! Inserts the events listed under `[[seed.events]]` in config.toml, with their
//! guests and bookings, but only when the events table is empty. Seed rows go
//! through the same validation and capacity checks as form submissions, and the
//! whole seed is one transaction: a rejected row leaves the database empty.

use crate::{
    config::app::SeedConfig,
    core::{
        booking::{BookingInput, insert_booking},
        event::{EventInput, create_event},
        guest::{GuestInput, create_guest},
    },
    entities::Event,
    errors::Result,
};
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use tracing::info;

/// Rows inserted by [`seed_sample_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Events inserted
    pub events: usize,
    /// Guest rows inserted
    pub guests: usize,
    /// Bookings inserted
    pub bookings: usize,
}

/// Seeds the configured sample events into an empty database.
///
/// Returns an all-zero report when events already exist.
///
/// # Errors
/// The first rejected row's error; nothing is inserted in that case.
pub async fn seed_sample_data(db: &DatabaseConnection, seed: &SeedConfig) -> Result<SeedReport> {
    if seed.events.is_empty() {
        return Ok(SeedReport::default());
    }

    let txn = db.begin().await?;
    if Event::find().one(&txn).await?.is_some() {
        info!("Database already contains events, skipping sample data");
        return Ok(SeedReport::default());
    }

    let mut report = SeedReport::default();
    for sample in &seed.events {
        let event = create_event(
            &txn,
            EventInput {
                name: sample.name.clone(),
                description: sample.description.clone(),
                event_date: sample.event_date,
                event_time: sample.event_time,
                location: sample.location.clone(),
                latitude: None,
                longitude: None,
                venue_capacity: sample.venue_capacity,
                budget: sample.budget,
                status: sample.status,
            },
        )
        .await?;
        report.events += 1;

        for guest in &sample.guests {
            create_guest(
                &txn,
                GuestInput {
                    event_id: event.id,
                    name: guest.name.clone(),
                    email: guest.email.clone(),
                    phone: guest.phone.clone(),
                    rsvp_status: guest.rsvp_status,
                    guest_count: guest.guest_count,
                    dietary_requirements: guest.dietary_requirements.clone(),
                },
            )
            .await?;
            report.guests += 1;
        }

        for booking in &sample.bookings {
            insert_booking(
                &txn,
                BookingInput {
                    event_id: event.id,
                    booking_type: booking.booking_type,
                    vendor_name: booking.vendor_name.clone(),
                    description: booking.description.clone(),
                    cost: booking.cost,
                    booking_date: booking.booking_date,
                    status: booking.status,
                    contact_info: booking.contact_info.clone(),
                    notes: None,
                },
            )
            .await?;
            report.bookings += 1;
        }
    }
    txn.commit().await?;

    info!(
        events = report.events,
        guests = report.guests,
        bookings = report.bookings,
        "Sample data inserted"
    );
    Ok(report)
}
