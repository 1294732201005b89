//! Ordered partial updates issued by a flight save.
//!
//! A save is a fixed sequence of independent PATCH calls. Each one is awaited
//! before the next, and the first failure stops the sequence. Updates that
//! already went through stay applied on the backend.

use tracing::{debug, warn};

use super::draft::FlightDraft;
use crate::error::Error;
use crate::model::{DestinationsUpdate, Flight, Id, TimeWindow};
use crate::services::FlightService;

/// Which field group an update touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    /// `PATCH /flights/{id}/pilot/{pilotId}`
    Pilot,
    /// `PATCH /flights/{id}/aircraft/{aircraftId}`
    Aircraft,
    /// `PATCH /flights/{id}/time`
    Time,
    /// `PATCH /flights/{id}`
    Destinations,
    /// `PATCH /flights/{id}/occupancy/{value}`
    Occupancy,
}

impl std::fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pilot => write!(f, "pilot"),
            Self::Aircraft => write!(f, "aircraft"),
            Self::Time => write!(f, "time"),
            Self::Destinations => write!(f, "destinations"),
            Self::Occupancy => write!(f, "occupancy"),
        }
    }
}

/// One partial update with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStep {
    /// Reassign the pilot.
    Pilot(Id),
    /// Reassign the aircraft.
    Aircraft(Id),
    /// Move the time window.
    Time(TimeWindow),
    /// Relabel origin and destination.
    Destinations(DestinationsUpdate),
    /// Set the passenger count.
    Occupancy(u32),
}

impl UpdateStep {
    /// The field group this step touches.
    #[must_use]
    pub fn kind(&self) -> UpdateKind {
        match self {
            Self::Pilot(_) => UpdateKind::Pilot,
            Self::Aircraft(_) => UpdateKind::Aircraft,
            Self::Time(_) => UpdateKind::Time,
            Self::Destinations(_) => UpdateKind::Destinations,
            Self::Occupancy(_) => UpdateKind::Occupancy,
        }
    }

    async fn apply(&self, flights: FlightService<'_>, flight_id: Id) -> Result<(), Error> {
        let response = match self {
            Self::Pilot(pilot_id) => flights.change_pilot(flight_id, *pilot_id).await,
            Self::Aircraft(aircraft_id) => flights.change_aircraft(flight_id, *aircraft_id).await,
            Self::Time(window) => flights.change_time(flight_id, window).await,
            Self::Destinations(update) => flights.update_destinations(flight_id, update).await,
            Self::Occupancy(occupancy) => flights.change_occupancy(flight_id, *occupancy).await,
        };
        response.map(drop)
    }
}

/// A step that the backend rejected.
#[derive(Debug)]
pub struct StepFailure {
    /// The rejected step.
    pub kind: UpdateKind,
    /// Steps that succeeded before it.
    pub applied: Vec<UpdateKind>,
    /// What the backend said.
    pub error: Error,
}

/// Derive the update sequence for `draft`.
///
/// Order is fixed: pilot, aircraft, time, destinations, occupancy. Pilot and
/// aircraft are sent whenever set, even if unchanged. Time needs both ends.
/// Destinations go out if either label is non-empty. Occupancy goes out only
/// when it differs from the loaded flight's.
#[must_use]
pub fn plan(draft: &FlightDraft, loaded: &Flight) -> Vec<UpdateStep> {
    let mut steps = Vec::with_capacity(5);

    if let Some(pilot_id) = draft.pilot_id {
        steps.push(UpdateStep::Pilot(pilot_id));
    }
    if let Some(aircraft_id) = draft.aircraft_id {
        steps.push(UpdateStep::Aircraft(aircraft_id));
    }
    if let (Some(departure_time), Some(arrival_time)) = (draft.departure_time, draft.arrival_time)
    {
        steps.push(UpdateStep::Time(TimeWindow {
            departure_time,
            arrival_time,
        }));
    }
    if !draft.destination_from.is_empty() || !draft.destination_to.is_empty() {
        steps.push(UpdateStep::Destinations(DestinationsUpdate {
            destination_from: draft.destination_from.clone(),
            destination_to: draft.destination_to.clone(),
        }));
    }
    if draft.occupancy != loaded.occupancy {
        steps.push(UpdateStep::Occupancy(draft.occupancy));
    }

    steps
}

/// Run `steps` in order, stopping at the first failure.
///
/// # Errors
///
/// Returns the first failing step together with the steps applied before it.
pub async fn run(
    flights: FlightService<'_>,
    flight_id: Id,
    steps: &[UpdateStep],
) -> Result<Vec<UpdateKind>, StepFailure> {
    let mut applied = Vec::with_capacity(steps.len());
    for step in steps {
        debug!("Flight {flight_id}: applying {} update", step.kind());
        if let Err(error) = step.apply(flights, flight_id).await {
            warn!(
                "Flight {flight_id}: {} update failed after {:?}: {error}",
                step.kind(),
                applied
            );
            return Err(StepFailure {
                kind: step.kind(),
                applied,
                error,
            });
        }
        applied.push(step.kind());
    }
    Ok(applied)
}
