//! Venue capacity admission.
//!
//! The check is a pure function of the event's capacity, the party size being
//! added, and the guests already registered. Callers read the current total and
//! insert inside the same database transaction (see `core::guest`).

use crate::errors::ValidationError;

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The guest row fits
    Admit,
    /// The guest row would overflow the venue
    Reject {
        /// Party size of the rejected row
        attempted: i64,
        /// Configured venue capacity
        capacity: i64,
        /// Guests already registered
        current: i64,
    },
}

impl Decision {
    /// Whether the guest may be admitted.
    #[must_use]
    pub const fn is_admitted(self) -> bool {
        matches!(self, Self::Admit)
    }

    /// Converts a rejection into the user-facing validation error.
    ///
    /// # Errors
    /// Returns `ValidationError::CapacityExceeded` carrying the exact figures.
    pub const fn into_result(self) -> Result<(), ValidationError> {
        match self {
            Self::Admit => Ok(()),
            Self::Reject {
                attempted,
                capacity,
                current,
            } => Err(ValidationError::CapacityExceeded {
                attempted,
                capacity,
                current,
            }),
        }
    }
}

/// Decides whether `proposed_guest_count` more guests fit the venue.
///
/// A `None` capacity is unlimited. Otherwise the guest is admitted iff
/// `existing_guest_total + proposed_guest_count <= venue_capacity`.
#[must_use]
pub fn can_admit_guest(
    venue_capacity: Option<i32>,
    proposed_guest_count: i32,
    existing_guest_total: i64,
) -> Decision {
    let Some(capacity) = venue_capacity else {
        return Decision::Admit;
    };

    let attempted = i64::from(proposed_guest_count);
    let capacity = i64::from(capacity);
    if existing_guest_total + attempted <= capacity {
        Decision::Admit
    } else {
        Decision::Reject {
            attempted,
            capacity,
            current: existing_guest_total,
        }
    }
}

/// Checks that a new venue capacity still holds every registered guest.
///
/// # Errors
/// Returns `ValidationError::CapacityBelowGuestTotal` when it does not.
pub fn check_capacity_covers_total(
    venue_capacity: Option<i32>,
    existing_guest_total: i64,
) -> Result<(), ValidationError> {
    match venue_capacity {
        Some(capacity) if i64::from(capacity) < existing_guest_total => {
            Err(ValidationError::CapacityBelowGuestTotal {
                capacity: i64::from(capacity),
                current: existing_guest_total,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_capacity_always_admits() {
        assert_eq!(can_admit_guest(None, 1, 0), Decision::Admit);
        assert_eq!(can_admit_guest(None, 500, 1_000_000), Decision::Admit);
    }

    #[test]
    fn test_capacity_boundary() {
        // Exactly full is allowed
        assert_eq!(can_admit_guest(Some(10), 2, 8), Decision::Admit);
        // One over is rejected
        assert_eq!(
            can_admit_guest(Some(10), 3, 8),
            Decision::Reject {
                attempted: 3,
                capacity: 10,
                current: 8
            }
        );
    }

    #[test]
    fn test_admission_matches_arithmetic_for_all_small_inputs() {
        for capacity in 0..=12 {
            for total in 0..=12_i64 {
                for proposed in 1..=5 {
                    let decision = can_admit_guest(Some(capacity), proposed, total);
                    let fits = total + i64::from(proposed) <= i64::from(capacity);
                    assert_eq!(decision.is_admitted(), fits, "C={capacity} T={total} P={proposed}");
                }
            }
        }
    }

    #[test]
    fn test_zero_capacity_rejects_everyone() {
        assert!(!can_admit_guest(Some(0), 1, 0).is_admitted());
    }

    #[test]
    fn test_rejection_message_has_exact_figures() {
        let err = can_admit_guest(Some(100), 7, 95).into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Adding 7 guests would exceed venue capacity of 100. Current guests: 95"
        );
        assert_eq!(can_admit_guest(Some(100), 5, 95).into_result(), Ok(()));
    }

    #[test]
    fn test_capacity_covers_total() {
        assert!(check_capacity_covers_total(None, 50).is_ok());
        assert!(check_capacity_covers_total(Some(50), 50).is_ok());
        assert_eq!(
            check_capacity_covers_total(Some(40), 50),
            Err(ValidationError::CapacityBelowGuestTotal {
                capacity: 40,
                current: 50
            })
        );
    }
}
