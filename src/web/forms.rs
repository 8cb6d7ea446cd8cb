//! URL-encoded form bodies.
//!
//! Every field is received as text so a malformed number or date turns into a
//! [`ValidationError`] shown on the re-rendered form rather than a rejected
//! request. The same structs are serialised back into the template context to
//! refill the form.

use crate::{
    core::{booking::BookingInput, event::EventInput, guest::GuestInput, user::Registration},
    entities::{BookingModel, BookingType, EventModel, GuestModel},
    errors::ValidationError,
};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Trimmed text, or None when blank.
fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_optional<T: FromStr>(
    field: &'static str,
    value: &str,
) -> Result<Option<T>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ValidationError::InvalidField {
            field,
            value: trimmed.to_string(),
        })
}

fn parse_required<T: FromStr>(field: &'static str, value: &str) -> Result<T, ValidationError> {
    parse_optional(field, value)?.ok_or(ValidationError::MissingField { field })
}

fn parse_date(field: &'static str, value: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| ValidationError::InvalidField {
            field,
            value: trimmed.to_string(),
        })
}

/// Accepts `HH:MM` from `<input type="time">` and `HH:MM:SS`.
fn parse_time(field: &'static str, value: &str) -> Result<Option<NaiveTime>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map(Some)
        .map_err(|_| ValidationError::InvalidField {
            field,
            value: trimmed.to_string(),
        })
}

/// Parses an enum choice by its stored value; blank selects the default.
fn parse_choice<E>(field: &'static str, value: &str) -> Result<E, ValidationError>
where
    E: ActiveEnum<Value = String> + Default,
{
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(E::default());
    }
    E::try_from_value(&trimmed.to_string()).map_err(|_| ValidationError::InvalidField {
        field,
        value: trimmed.to_string(),
    })
}

fn display<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Query string of the login page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginQuery {
    /// Present when an anonymous request was turned away from a protected page
    pub required: Option<String>,
}

/// Login form; `username` also accepts an email address.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginForm {
    /// Username or email
    pub username: String,
    /// Plain-text password
    #[serde(skip_serializing)]
    pub password: String,
}

/// Account registration form.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RegisterForm {
    /// Requested login name
    pub username: String,
    /// Gmail address
    pub email: String,
    /// Optional 10-digit phone
    pub phone: String,
    /// Chosen password
    #[serde(skip_serializing)]
    pub password: String,
    /// Repeated password
    #[serde(skip_serializing)]
    pub confirm_password: String,
    /// Optional display name
    pub full_name: String,
}

impl RegisterForm {
    /// Converts the submitted fields into a [`Registration`].
    #[must_use]
    pub fn to_registration(&self) -> Registration {
        Registration {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional_text(&self.phone),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            full_name: optional_text(&self.full_name),
        }
    }
}

/// Event create and edit form.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EventForm {
    /// Event name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// `YYYY-MM-DD`
    pub event_date: String,
    /// `HH:MM`, optional
    pub event_time: String,
    /// Venue or address
    pub location: String,
    /// Decimal degrees, optional
    pub latitude: String,
    /// Decimal degrees, optional
    pub longitude: String,
    /// Maximum guests, blank for unlimited
    pub venue_capacity: String,
    /// Planned spend
    pub budget: String,
    /// Stored `EventStatus` value
    pub status: String,
}

impl EventForm {
    /// Prefills the form from a stored event.
    #[must_use]
    pub fn from_model(event: &EventModel) -> Self {
        Self {
            name: event.name.clone(),
            description: event.description.clone().unwrap_or_default(),
            event_date: event.event_date.format(DATE_FORMAT).to_string(),
            event_time: display(event.event_time.map(|t| t.format(TIME_FORMAT))),
            location: event.location.clone().unwrap_or_default(),
            latitude: display(event.latitude),
            longitude: display(event.longitude),
            venue_capacity: display(event.venue_capacity),
            budget: event.budget.to_string(),
            status: event.status.to_value(),
        }
    }

    /// Parses the submitted text into an [`EventInput`].
    ///
    /// # Errors
    /// Returns a [`ValidationError`] naming the first malformed field.
    pub fn to_input(&self) -> Result<EventInput, ValidationError> {
        let event_date =
            parse_date("Event date", &self.event_date)?.ok_or(ValidationError::MissingField {
                field: "Event date",
            })?;

        let mut input = EventInput::new(self.name.trim(), event_date);
        input.description = optional_text(&self.description);
        input.event_time = parse_time("Event time", &self.event_time)?;
        input.location = optional_text(&self.location);
        input.latitude = parse_optional("Latitude", &self.latitude)?;
        input.longitude = parse_optional("Longitude", &self.longitude)?;
        input.venue_capacity = parse_optional("Venue capacity", &self.venue_capacity)?;
        input.budget = parse_optional("Budget", &self.budget)?.unwrap_or(0.0);
        input.status = parse_choice("Status", &self.status)?;
        Ok(input)
    }
}

/// Guest create and edit form.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GuestForm {
    /// Selected event
    pub event_id: String,
    /// Guest or party name
    pub name: String,
    /// Optional Gmail address
    pub email: String,
    /// Optional 10-digit phone
    pub phone: String,
    /// Stored `RsvpStatus` value
    pub rsvp_status: String,
    /// Party size, blank means 1
    pub guest_count: String,
    /// Free-form notes
    pub dietary_requirements: String,
}

impl GuestForm {
    /// Prefills the form from a stored guest.
    #[must_use]
    pub fn from_model(guest: &GuestModel) -> Self {
        Self {
            event_id: guest.event_id.to_string(),
            name: guest.name.clone(),
            email: guest.email.clone().unwrap_or_default(),
            phone: guest.phone.clone().unwrap_or_default(),
            rsvp_status: guest.rsvp_status.to_value(),
            guest_count: guest.guest_count.to_string(),
            dietary_requirements: guest.dietary_requirements.clone().unwrap_or_default(),
        }
    }

    /// Parses the submitted text into a [`GuestInput`].
    ///
    /// # Errors
    /// Returns a [`ValidationError`] naming the first malformed field.
    pub fn to_input(&self) -> Result<GuestInput, ValidationError> {
        let event_id = parse_required("Event", &self.event_id)?;

        let mut input = GuestInput::new(event_id, self.name.trim());
        input.email = optional_text(&self.email);
        input.phone = optional_text(&self.phone);
        input.rsvp_status = parse_choice("RSVP status", &self.rsvp_status)?;
        input.guest_count = parse_optional("Guest count", &self.guest_count)?.unwrap_or(1);
        input.dietary_requirements = optional_text(&self.dietary_requirements);
        Ok(input)
    }
}

/// Booking create and edit form.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BookingForm {
    /// Selected event
    pub event_id: String,
    /// Stored `BookingType` value
    pub booking_type: String,
    /// Vendor name
    pub vendor_name: String,
    /// What was booked
    pub description: String,
    /// Agreed cost
    pub cost: String,
    /// `YYYY-MM-DD`, optional
    pub booking_date: String,
    /// Stored `BookingStatus` value, applied on edit
    pub status: String,
    /// Vendor contact details
    pub contact_info: String,
    /// Internal notes
    pub notes: String,
}

impl BookingForm {
    /// Prefills the form from a stored booking.
    #[must_use]
    pub fn from_model(booking: &BookingModel) -> Self {
        Self {
            event_id: booking.event_id.to_string(),
            booking_type: booking.booking_type.to_value(),
            vendor_name: booking.vendor_name.clone(),
            description: booking.description.clone().unwrap_or_default(),
            cost: display(booking.cost),
            booking_date: display(booking.booking_date.map(|d| d.format(DATE_FORMAT))),
            status: booking.status.to_value(),
            contact_info: booking.contact_info.clone().unwrap_or_default(),
            notes: booking.notes.clone().unwrap_or_default(),
        }
    }

    /// Parses the submitted text into a [`BookingInput`].
    ///
    /// # Errors
    /// Returns a [`ValidationError`] naming the first malformed field.
    pub fn to_input(&self) -> Result<BookingInput, ValidationError> {
        let event_id = parse_required("Event", &self.event_id)?;
        let booking_type = match self.booking_type.trim() {
            "" => {
                return Err(ValidationError::MissingField {
                    field: "Booking type",
                });
            }
            value => BookingType::try_from_value(&value.to_string()).map_err(|_| {
                ValidationError::InvalidField {
                    field: "Booking type",
                    value: value.to_string(),
                }
            })?,
        };

        let mut input = BookingInput::new(event_id, booking_type, self.vendor_name.trim());
        input.description = optional_text(&self.description);
        input.cost = parse_optional("Cost", &self.cost)?;
        input.booking_date = parse_date("Booking date", &self.booking_date)?;
        input.status = parse_choice("Status", &self.status)?;
        input.contact_info = optional_text(&self.contact_info);
        input.notes = optional_text(&self.notes);
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::{BookingStatus, EventStatus, RsvpStatus};

    #[test]
    fn test_event_form_parses_typed_fields() {
        let form = EventForm {
            name: "  Wedding Reception ".to_string(),
            event_date: "2026-01-10".to_string(),
            event_time: "18:30".to_string(),
            venue_capacity: "200".to_string(),
            budget: "800000".to_string(),
            status: "Confirmed".to_string(),
            ..Default::default()
        };
        let input = form.to_input().unwrap();
        assert_eq!(input.name, "Wedding Reception");
        assert_eq!(input.event_date, NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());
        assert_eq!(input.event_time, NaiveTime::from_hms_opt(18, 30, 0));
        assert_eq!(input.venue_capacity, Some(200));
        assert_eq!(input.budget, 800_000.0);
        assert_eq!(input.status, EventStatus::Confirmed);
        assert_eq!(input.description, None);
    }

    #[test]
    fn test_event_form_reports_bad_fields() {
        let missing_date = EventForm {
            name: "Party".to_string(),
            ..Default::default()
        };
        assert_eq!(
            missing_date.to_input().unwrap_err(),
            ValidationError::MissingField {
                field: "Event date"
            }
        );

        let bad_capacity = EventForm {
            name: "Party".to_string(),
            event_date: "2026-01-10".to_string(),
            venue_capacity: "lots".to_string(),
            ..Default::default()
        };
        assert_eq!(
            bad_capacity.to_input().unwrap_err().to_string(),
            "Invalid Venue capacity: lots"
        );
    }

    #[test]
    fn test_guest_form_defaults() {
        let form = GuestForm {
            event_id: "3".to_string(),
            name: "Neha".to_string(),
            ..Default::default()
        };
        let input = form.to_input().unwrap();
        assert_eq!(input.event_id, 3);
        assert_eq!(input.guest_count, 1);
        assert_eq!(input.rsvp_status, RsvpStatus::Pending);
        assert_eq!(input.email, None);
        assert_eq!(input.phone, None);
    }

    #[test]
    fn test_guest_form_requires_event() {
        let form = GuestForm {
            name: "Neha".to_string(),
            ..Default::default()
        };
        assert_eq!(
            form.to_input().unwrap_err(),
            ValidationError::MissingField { field: "Event" }
        );
    }

    #[test]
    fn test_booking_form_parses_choices() {
        let form = BookingForm {
            event_id: "1".to_string(),
            booking_type: "Photography".to_string(),
            vendor_name: "Pixel Studio".to_string(),
            cost: "45000.50".to_string(),
            booking_date: "2026-02-01".to_string(),
            ..Default::default()
        };
        let input = form.to_input().unwrap();
        assert_eq!(input.booking_type, BookingType::Photography);
        assert_eq!(input.cost, Some(45_000.5));
        assert_eq!(input.status, BookingStatus::Pending);

        let unknown = BookingForm {
            booking_type: "Fireworks".to_string(),
            ..form
        };
        assert_eq!(
            unknown.to_input().unwrap_err().to_string(),
            "Invalid Booking type: Fireworks"
        );
    }

    #[test]
    fn test_forms_round_trip_models() {
        let event = EventModel {
            id: 1,
            name: "Gala".to_string(),
            description: None,
            event_date: NaiveDate::from_ymd_opt(2026, 12, 20).unwrap(),
            event_time: NaiveTime::from_hms_opt(19, 0, 0),
            location: Some("Grand Hotel".to_string()),
            latitude: None,
            longitude: None,
            venue_capacity: Some(150),
            budget: 300_000.0,
            status: EventStatus::Completed,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        };
        let form = EventForm::from_model(&event);
        assert_eq!(form.event_time, "19:00");
        assert_eq!(form.status, "Completed");

        let input = form.to_input().unwrap();
        assert_eq!(input.event_time, event.event_time);
        assert_eq!(input.venue_capacity, event.venue_capacity);
        assert_eq!(input.status, event.status);
    }
}
