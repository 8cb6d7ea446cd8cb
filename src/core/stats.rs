//! Aggregate statistics for the dashboard and event detail views.
//!
//! All computations are pure functions over rows already loaded from the store
//! and are recomputed on every request. [`load_dashboard_summary`] is the only
//! function here that touches the database.

use crate::{
    entities::{Booking, Event, Guest, RsvpStatus, booking, event, guest},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Serialize;
use std::cmp::Reverse;

/// How many events the dashboard lists as recently created.
pub const RECENT_EVENT_LIMIT: usize = 5;

/// Guest rows grouped by RSVP status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RsvpBreakdown {
    /// Rows with `Accepted`
    pub accepted: usize,
    /// Rows with `Pending`
    pub pending: usize,
    /// Rows with `Declined`
    pub declined: usize,
}

/// Roll-up figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Number of events
    pub total_events: usize,
    /// Events dated today or later
    pub upcoming_events: usize,
    /// Number of guest rows
    pub total_guests: usize,
    /// Number of booking rows
    pub total_bookings: usize,
    /// Newest events first, at most [`RECENT_EVENT_LIMIT`]
    pub recent_events: Vec<event::Model>,
    /// Sum of all event budgets
    pub total_budget: f64,
    /// Guest rows per RSVP status
    pub rsvp: RsvpBreakdown,
}

/// Computes the dashboard figures from the full record set.
#[must_use]
pub fn compute_dashboard_summary(
    events: &[event::Model],
    guests: &[guest::Model],
    bookings: &[booking::Model],
    today: NaiveDate,
) -> DashboardSummary {
    let upcoming_events = events.iter().filter(|e| e.event_date >= today).count();

    let mut recent_events = events.to_vec();
    recent_events.sort_by_key(|e| Reverse((e.created_at, e.id)));
    recent_events.truncate(RECENT_EVENT_LIMIT);

    DashboardSummary {
        total_events: events.len(),
        upcoming_events,
        total_guests: guests.len(),
        total_bookings: bookings.len(),
        recent_events,
        total_budget: events.iter().map(|e| e.budget).sum(),
        rsvp: rsvp_breakdown(guests),
    }
}

/// Counts guest rows per RSVP status.
#[must_use]
pub fn rsvp_breakdown(guests: &[guest::Model]) -> RsvpBreakdown {
    guests
        .iter()
        .fold(RsvpBreakdown::default(), |mut counts, guest| {
            match guest.rsvp_status {
                RsvpStatus::Accepted => counts.accepted += 1,
                RsvpStatus::Pending => counts.pending += 1,
                RsvpStatus::Declined => counts.declined += 1,
            }
            counts
        })
}

/// Sums booking costs, counting a missing cost as zero.
#[must_use]
pub fn compute_booking_cost_total(bookings: &[booking::Model]) -> f64 {
    bookings.iter().filter_map(|b| b.cost).sum()
}

/// Sums the party sizes of guest rows.
#[must_use]
pub fn guest_total(guests: &[guest::Model]) -> i64 {
    guests.iter().map(|g| i64::from(g.guest_count)).sum()
}

/// Reads every event, guest and booking and computes the dashboard summary.
pub async fn load_dashboard_summary(
    db: &DatabaseConnection,
    today: NaiveDate,
) -> Result<DashboardSummary> {
    let events = Event::find().all(db).await?;
    let guests = Guest::find().all(db).await?;
    let bookings = Booking::find().all(db).await?;

    Ok(compute_dashboard_summary(&events, &guests, &bookings, today))
}
