//! User-facing messages for flight loading and saving failures.
//!
//! Loading and saving map the same status codes to different text.

use crate::error::{Conflict, Error};

/// Shown when origin and destination are the same label.
pub const SAME_ENDPOINTS: &str = "The destination from and destination to must not be the same.";

/// Pilot field message for a pilot-availability conflict.
pub const PILOT_UNAVAILABLE: &str =
    "The selected pilot is not available. Please choose a different one or change the time";

/// Aircraft field message for an aircraft-availability conflict.
pub const AIRCRAFT_UNAVAILABLE: &str =
    "The selected aircraft is not available. Please choose a different one or change the time";

/// Page message for a 409 whose body names neither pilot nor aircraft.
pub const UNKNOWN_CONFLICT: &str = "The flight conflicts with an existing schedule.";

/// Shown when a flight is missing.
pub const FLIGHT_NOT_FOUND: &str = "Flight not found!";

/// Shown when the confirmed delete fails.
pub const DELETE_FAILED: &str = "Failed to delete flight. Please try again.";

/// Question asked before deleting a flight.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this flight?";

/// Where a save failure is displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveFeedback {
    /// Next to the pilot field.
    Pilot(String),
    /// Next to the aircraft field.
    Aircraft(String),
    /// At the top of the page.
    Page(String),
}

/// Message for a failure anywhere in the load chain.
#[must_use]
pub fn load_failure(err: &Error) -> String {
    match err.http_status() {
        Some(404) => FLIGHT_NOT_FOUND.to_string(),
        Some(400) => "Malformed request. Please check the flight identifier.".to_string(),
        _ => "Failed to load flight details. Please try again later.".to_string(),
    }
}

/// Feedback for a failed partial update.
#[must_use]
pub fn save_failure(err: &Error) -> SaveFeedback {
    if err.is_transport() {
        return SaveFeedback::Page("Network error. Please check your connection.".to_string());
    }
    if let Some(conflict) = err.conflict() {
        return match conflict {
            Conflict::PilotUnavailable => SaveFeedback::Pilot(PILOT_UNAVAILABLE.to_string()),
            Conflict::AircraftUnavailable => {
                SaveFeedback::Aircraft(AIRCRAFT_UNAVAILABLE.to_string())
            }
            Conflict::Other(_) => SaveFeedback::Page(UNKNOWN_CONFLICT.to_string()),
        };
    }
    match err.http_status() {
        Some(400) => SaveFeedback::Page("Bad request. Please check your inputs.".to_string()),
        Some(404) => SaveFeedback::Page(FLIGHT_NOT_FOUND.to_string()),
        _ => SaveFeedback::Page("Failed to update flight. Please try again.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AIRCRAFT_UNAVAILABLE_BODY, PILOT_UNAVAILABLE_BODY};

    #[test]
    fn test_load_failure_messages() {
        assert_eq!(load_failure(&Error::status(404, "")), FLIGHT_NOT_FOUND);
        assert!(load_failure(&Error::status(400, "")).starts_with("Malformed request"));
        assert!(load_failure(&Error::status(503, "")).contains("try again"));
        assert!(load_failure(&Error::transport("/flights/1", "down")).contains("try again"));
    }

    #[test]
    fn test_save_failure_pilot_conflict() {
        let feedback = save_failure(&Error::status(409, PILOT_UNAVAILABLE_BODY));
        assert_eq!(feedback, SaveFeedback::Pilot(PILOT_UNAVAILABLE.to_string()));
    }

    #[test]
    fn test_save_failure_aircraft_conflict() {
        let feedback = save_failure(&Error::status(409, AIRCRAFT_UNAVAILABLE_BODY));
        assert_eq!(
            feedback,
            SaveFeedback::Aircraft(AIRCRAFT_UNAVAILABLE.to_string())
        );
    }

    #[test]
    fn test_save_failure_unknown_conflict() {
        let feedback = save_failure(&Error::status(409, "Error: runway closed"));
        assert_eq!(feedback, SaveFeedback::Page(UNKNOWN_CONFLICT.to_string()));
    }

    #[test]
    fn test_save_failure_status_messages() {
        assert_eq!(
            save_failure(&Error::status(400, "")),
            SaveFeedback::Page("Bad request. Please check your inputs.".to_string())
        );
        assert_eq!(
            save_failure(&Error::status(404, "")),
            SaveFeedback::Page(FLIGHT_NOT_FOUND.to_string())
        );
        assert_eq!(
            save_failure(&Error::status(500, "")),
            SaveFeedback::Page("Failed to update flight. Please try again.".to_string())
        );
    }

    #[test]
    fn test_save_failure_network() {
        let feedback = save_failure(&Error::transport("/flights/1/time", "reset"));
        assert_eq!(
            feedback,
            SaveFeedback::Page("Network error. Please check your connection.".to_string())
        );
    }
}
