//! Locally held, editable copy of a flight.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{clamp_occupancy, Flight, Id};

/// The in-progress edit of a flight's editable fields.
///
/// Seeded from the loaded flight and never written back to it; a successful
/// save discards the draft and reloads the flight instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightDraft {
    /// Origin label.
    pub destination_from: String,
    /// Destination label.
    pub destination_to: String,
    /// Departure, when set.
    pub departure_time: Option<NaiveDateTime>,
    /// Arrival, when set.
    pub arrival_time: Option<NaiveDateTime>,
    /// Chosen pilot.
    pub pilot_id: Option<Id>,
    /// Chosen aircraft.
    pub aircraft_id: Option<Id>,
    /// Passengers on board.
    pub occupancy: u32,
}

impl From<&Flight> for FlightDraft {
    fn from(flight: &Flight) -> Self {
        Self {
            destination_from: flight.destination_from.clone(),
            destination_to: flight.destination_to.clone(),
            departure_time: Some(flight.departure_time),
            arrival_time: Some(flight.arrival_time),
            pilot_id: Some(flight.pilot_id),
            aircraft_id: Some(flight.aircraft_id),
            occupancy: flight.occupancy,
        }
    }
}

impl FlightDraft {
    /// Apply typed occupancy input.
    ///
    /// Empty input resets to zero. Numbers outside `[0, capacity]` are clamped,
    /// not rejected. Anything non-numeric leaves the draft untouched.
    ///
    /// # Errors
    ///
    /// Returns a validation error for non-numeric input.
    pub fn apply_occupancy_input(&mut self, input: &str, capacity: u32) -> Result<u32> {
        let occupancy = match parse_integer(input)? {
            None => 0,
            Some(requested) => clamp_occupancy(requested, capacity),
        };
        self.occupancy = occupancy;
        Ok(occupancy)
    }

    /// Whether origin and destination carry the same label.
    #[must_use]
    pub fn has_same_endpoints(&self) -> bool {
        self.destination_from == self.destination_to
    }
}

/// Parse an integer, saturating on overflow. `Ok(None)` for blank input.
fn parse_integer(input: &str) -> Result<Option<i64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (negative, digits) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::validation(format!(
            "occupancy must be a whole number, got {trimmed:?}"
        )));
    }

    let value = trimmed
        .parse::<i64>()
        .unwrap_or(if negative { i64::MIN } else { i64::MAX });
    Ok(Some(value))
}
