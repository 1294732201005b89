//! Entities exchanged with the flight-operations backend.
//!
//! The backend is authoritative for all of these. Field names follow the
//! backend's camelCase JSON.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Backend-assigned identifier.
pub type Id = i64;

/// An airline. Aircraft and pilots reference it by [`Airline::id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airline {
    /// Identifier.
    pub id: Id,
    /// Name, unique across airlines.
    pub name: String,
    /// Year the airline was founded.
    pub year_founded: i32,
    /// Headquarters location.
    pub headquarters: String,
}

/// Payload for creating an airline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAirline {
    /// Name, unique across airlines.
    pub name: String,
    /// Year the airline was founded.
    pub year_founded: i32,
    /// Headquarters location.
    pub headquarters: String,
}

/// An aircraft owned by an airline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aircraft {
    /// Identifier.
    pub id: Id,
    /// Model designation.
    pub model: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Year of manufacture.
    pub manufacture_year: i32,
    /// Passenger capacity; upper bound for flight occupancy.
    pub capacity: u32,
    /// Weight in kilograms.
    pub weight: f64,
    /// Owning airline.
    pub airline_id: Id,
}

/// Payload for creating an aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAircraft {
    /// Model designation.
    pub model: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Year of manufacture.
    pub manufacture_year: i32,
    /// Passenger capacity.
    pub capacity: u32,
    /// Weight in kilograms.
    pub weight: f64,
    /// Owning airline.
    pub airline_id: Id,
}

/// A pilot, optionally employed by an airline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pilot {
    /// Identifier. The backend calls this `pilotId`.
    pub pilot_id: Id,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Optional nickname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Employing airline; `None` for unaffiliated pilots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline_id: Option<Id>,
}

impl Pilot {
    /// "First Last", as shown in selection lists.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for creating or updating a pilot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPilot {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Optional nickname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Employing airline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline_id: Option<Id>,
}

impl From<&Pilot> for NewPilot {
    fn from(pilot: &Pilot) -> Self {
        Self {
            first_name: pilot.first_name.clone(),
            last_name: pilot.last_name.clone(),
            nickname: pilot.nickname.clone(),
            date_of_birth: pilot.date_of_birth,
            airline_id: pilot.airline_id,
        }
    }
}

/// A scheduled flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    /// Identifier.
    pub id: Id,
    /// Origin label.
    pub destination_from: String,
    /// Destination label.
    pub destination_to: String,
    /// Departure, local time.
    pub departure_time: NaiveDateTime,
    /// Arrival, local time. Strictly after departure.
    pub arrival_time: NaiveDateTime,
    /// Passengers on board.
    pub occupancy: u32,
    /// Assigned aircraft.
    pub aircraft_id: Id,
    /// Assigned pilot.
    pub pilot_id: Id,
}

/// Payload for creating a flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFlight {
    /// Origin label.
    pub destination_from: String,
    /// Destination label.
    pub destination_to: String,
    /// Passengers on board.
    pub occupancy: u32,
    /// Departure, local time.
    pub departure_time: NaiveDateTime,
    /// Arrival, local time.
    pub arrival_time: NaiveDateTime,
    /// Airline the aircraft and pilot were chosen from.
    pub airline_id: Id,
    /// Assigned aircraft.
    pub aircraft_id: Id,
    /// Assigned pilot.
    pub pilot_id: Id,
}

/// Body of `PATCH /flights/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationsUpdate {
    /// Origin label.
    pub destination_from: String,
    /// Destination label.
    pub destination_to: String,
}

/// Body of `PATCH /flights/{id}/time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    /// Departure, local time.
    pub departure_time: NaiveDateTime,
    /// Arrival, local time.
    pub arrival_time: NaiveDateTime,
}

impl TimeWindow {
    /// Check that arrival is strictly after departure.
    ///
    /// # Errors
    ///
    /// Returns a validation error otherwise.
    pub fn validate(&self) -> Result<()> {
        if self.arrival_time <= self.departure_time {
            return Err(Error::validation(ARRIVAL_BEFORE_DEPARTURE));
        }
        Ok(())
    }
}

/// Message for a time window whose arrival does not follow its departure.
pub const ARRIVAL_BEFORE_DEPARTURE: &str = "Arrival time must be after departure time.";

/// Clamp a requested occupancy into `[0, capacity]`.
#[must_use]
pub fn clamp_occupancy(requested: i64, capacity: u32) -> u32 {
    u32::try_from(requested.clamp(0, i64::from(capacity))).unwrap_or(0)
}

/// Parse a local timestamp as typed into a form.
///
/// Accepts `YYYY-MM-DDTHH:MM`, with optional seconds and fraction, and a space
/// in place of the `T`.
///
/// # Errors
///
/// Returns a validation error if the input matches none of those shapes.
pub fn parse_local_time(input: &str) -> Result<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    let input = input.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| Error::validation(format!("invalid date-time: {input}")))
}
