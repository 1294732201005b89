//! Flight detail and edit workflow.
//!
//! [`FlightEditor`] owns everything the flight detail page shows: the loaded
//! flight with its aircraft and airline, the airline-scoped choices, the edit
//! draft, and the field and page messages.
//!
//! ```text
//!  Loading ──ok──▶ Viewing ◀──cancel / saved──▶ Editing
//!     │                ▲                          │
//!     └──err──▶ Errored└──────── reload ◀─────────┘
//! ```
//!
//! A failed save keeps the editor in `Editing`. A successful one reloads the
//! flight from the backend rather than trusting the draft.

mod draft;
mod messages;
mod save;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info, warn};

pub use draft::FlightDraft;
pub use messages::{
    load_failure, save_failure, SaveFeedback, AIRCRAFT_UNAVAILABLE, DELETE_CONFIRMATION,
    DELETE_FAILED, FLIGHT_NOT_FOUND, PILOT_UNAVAILABLE, SAME_ENDPOINTS, UNKNOWN_CONFLICT,
};
pub use save::{plan, UpdateKind, UpdateStep};

use crate::error::{Error, Result};
use crate::model::{Aircraft, Airline, Flight, Id, ARRIVAL_BEFORE_DEPARTURE};
use crate::route::Route;
use crate::selection::DependentSelection;
use crate::services::Client;

/// Where the editor is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Fetching the flight and its context.
    Loading,
    /// Showing the loaded flight.
    Viewing,
    /// Showing the edit form over a draft.
    Editing(FlightDraft),
    /// The load failed; only the message is shown.
    Errored(String),
}

/// Messages attached to individual form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    /// Message under the pilot field.
    pub pilot: Option<String>,
    /// Message under the aircraft field.
    pub aircraft: Option<String>,
}

impl FieldErrors {
    /// Drop both messages.
    pub fn clear(&mut self) {
        self.pilot = None;
        self.aircraft = None;
    }

    /// Whether neither field carries a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pilot.is_none() && self.aircraft.is_none()
    }
}

/// A loaded flight with the records around it.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightContext {
    /// The flight.
    pub flight: Flight,
    /// Its aircraft at load time.
    pub aircraft: Aircraft,
    /// The airline owning that aircraft.
    pub airline: Airline,
    /// Aircraft and pilots of that airline.
    pub choices: DependentSelection,
}

/// Result of [`FlightEditor::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Every update went through and the flight was reloaded.
    Saved,
    /// The draft failed client-side checks; nothing was sent.
    Rejected,
    /// The backend rejected `failed`; `applied` went through before it.
    Failed {
        /// The step the backend rejected.
        failed: UpdateKind,
        /// Steps applied before the failure. They are not rolled back.
        applied: Vec<UpdateKind>,
    },
}

/// State container for one flight's detail page.
#[derive(Debug)]
pub struct FlightEditor {
    client: Client,
    flight_id: Id,
    phase: Phase,
    context: Option<FlightContext>,
    field_errors: FieldErrors,
    page_error: Option<String>,
}

impl FlightEditor {
    /// An editor for `flight_id`, not yet loaded.
    #[must_use]
    pub fn new(client: Client, flight_id: Id) -> Self {
        Self {
            client,
            flight_id,
            phase: Phase::Loading,
            context: None,
            field_errors: FieldErrors::default(),
            page_error: None,
        }
    }

    /// Create and load in one go.
    pub async fn open(client: Client, flight_id: Id) -> Self {
        let mut editor = Self::new(client, flight_id);
        editor.load().await;
        editor
    }

    /// Fetch the flight, its aircraft, the aircraft's airline, and that
    /// airline's aircraft and pilots, in that order.
    ///
    /// Ends in `Viewing` on success, `Errored` otherwise. Any draft is dropped.
    pub async fn load(&mut self) {
        self.phase = Phase::Loading;
        match self.fetch_context().await {
            Ok(context) => {
                debug!(
                    "Flight {} loaded with {} aircraft and {} pilot choices",
                    self.flight_id,
                    context.choices.aircraft_options().len(),
                    context.choices.pilot_options().len()
                );
                self.context = Some(context);
                self.page_error = None;
                self.phase = Phase::Viewing;
            }
            Err(e) => {
                warn!("Failed to load flight {}: {e}", self.flight_id);
                self.context = None;
                self.phase = Phase::Errored(load_failure(&e));
            }
        }
    }

    async fn fetch_context(&self) -> Result<FlightContext> {
        let flight = self.client.flights().get_by_id(self.flight_id).await?;
        let aircraft = self.client.aircraft().get_by_id(flight.aircraft_id).await?;
        let airline = self.client.airlines().get_by_id(aircraft.airline_id).await?;

        let fleet = self.client.aircraft().list_by_airline(airline.id).await?;
        let pilots = self.client.pilots().list_by_airline(airline.id).await?;
        let mut choices = DependentSelection::new();
        choices.populate(airline.id, fleet, pilots);

        Ok(FlightContext {
            flight,
            aircraft,
            airline,
            choices,
        })
    }

    /// Switch to `Editing` with a draft seeded from the loaded flight.
    ///
    /// # Errors
    ///
    /// Fails unless the editor is `Viewing`.
    pub fn begin_edit(&mut self) -> Result<()> {
        if self.phase != Phase::Viewing {
            return Err(Error::validation("the flight must be loaded before editing"));
        }
        let context = self.loaded()?;
        self.phase = Phase::Editing(FlightDraft::from(&context.flight));
        Ok(())
    }

    /// Discard the draft and go back to `Viewing`.
    pub fn cancel_edit(&mut self) {
        if matches!(self.phase, Phase::Editing(_)) {
            self.phase = Phase::Viewing;
            self.field_errors.clear();
        }
    }

    /// Change the origin label.
    ///
    /// # Errors
    ///
    /// Fails unless the editor is `Editing`.
    pub fn set_destination_from(&mut self, value: impl Into<String>) -> Result<()> {
        self.edit(|d| d.destination_from = value.into())
    }

    /// Change the destination label.
    ///
    /// # Errors
    ///
    /// Fails unless the editor is `Editing`.
    pub fn set_destination_to(&mut self, value: impl Into<String>) -> Result<()> {
        self.edit(|d| d.destination_to = value.into())
    }

    /// Change or clear the departure time.
    ///
    /// # Errors
    ///
    /// Fails unless the editor is `Editing`.
    pub fn set_departure_time(&mut self, value: Option<NaiveDateTime>) -> Result<()> {
        self.edit(|d| d.departure_time = value)
    }

    /// Change or clear the arrival time.
    ///
    /// # Errors
    ///
    /// Fails unless the editor is `Editing`.
    pub fn set_arrival_time(&mut self, value: Option<NaiveDateTime>) -> Result<()> {
        self.edit(|d| d.arrival_time = value)
    }

    /// Pick a pilot from the loaded airline's pilots.
    ///
    /// # Errors
    ///
    /// Fails unless the editor is `Editing` and the pilot is on offer.
    pub fn select_pilot(&mut self, pilot_id: Id) -> Result<()> {
        if !self.loaded()?.choices.offers_pilot(pilot_id) {
            return Err(Error::selection(format!(
                "pilot {pilot_id} does not belong to the flight's airline"
            )));
        }
        self.edit(|d| d.pilot_id = Some(pilot_id))
    }

    /// Pick an aircraft from the loaded airline's fleet.
    ///
    /// # Errors
    ///
    /// Fails unless the editor is `Editing` and the aircraft is on offer.
    pub fn select_aircraft(&mut self, aircraft_id: Id) -> Result<()> {
        if self.loaded()?.choices.offered_aircraft(aircraft_id).is_none() {
            return Err(Error::selection(format!(
                "aircraft {aircraft_id} does not belong to the flight's airline"
            )));
        }
        self.edit(|d| d.aircraft_id = Some(aircraft_id))
    }

    /// Apply typed occupancy input, clamped to the loaded aircraft's capacity.
    ///
    /// Returns the value stored in the draft.
    ///
    /// # Errors
    ///
    /// Fails unless the editor is `Editing`, or when the input is not a number;
    /// the draft is left as it was in both cases.
    pub fn set_occupancy(&mut self, input: &str) -> Result<u32> {
        let capacity = self.loaded()?.aircraft.capacity;
        let Phase::Editing(draft) = &mut self.phase else {
            return Err(not_editing());
        };
        let stored = draft.apply_occupancy_input(input, capacity)?;
        self.field_errors.clear();
        Ok(stored)
    }

    fn edit(&mut self, change: impl FnOnce(&mut FlightDraft)) -> Result<()> {
        let Phase::Editing(draft) = &mut self.phase else {
            return Err(not_editing());
        };
        change(draft);
        self.field_errors.clear();
        Ok(())
    }

    /// Submit the draft.
    ///
    /// Client-side checks run first and send nothing when they fail. Then the
    /// partial updates go out in order; the first rejection stops the rest and
    /// is reported as a field or page message. After a full success the field
    /// messages are cleared and the flight is reloaded.
    ///
    /// # Errors
    ///
    /// Fails without side effects unless the editor is `Editing`.
    pub async fn save(&mut self) -> Result<SaveOutcome> {
        let Phase::Editing(draft) = &self.phase else {
            return Err(not_editing());
        };
        let draft = draft.clone();

        if draft.has_same_endpoints() {
            self.page_error = Some(SAME_ENDPOINTS.to_string());
            return Ok(SaveOutcome::Rejected);
        }
        if let (Some(departure), Some(arrival)) = (draft.departure_time, draft.arrival_time) {
            if arrival <= departure {
                self.page_error = Some(ARRIVAL_BEFORE_DEPARTURE.to_string());
                return Ok(SaveOutcome::Rejected);
            }
        }

        let steps = plan(&draft, &self.loaded()?.flight);
        let result = save::run(self.client.flights(), self.flight_id, &steps).await;
        match result {
            Ok(applied) => {
                info!("Flight {} saved ({applied:?})", self.flight_id);
                self.field_errors.clear();
                self.phase = Phase::Viewing;
                self.load().await;
                Ok(SaveOutcome::Saved)
            }
            Err(failure) => {
                match save_failure(&failure.error) {
                    SaveFeedback::Pilot(message) => self.field_errors.pilot = Some(message),
                    SaveFeedback::Aircraft(message) => self.field_errors.aircraft = Some(message),
                    SaveFeedback::Page(message) => self.page_error = Some(message),
                }
                Ok(SaveOutcome::Failed {
                    failed: failure.kind,
                    applied: failure.applied,
                })
            }
        }
    }

    /// Delete the flight once `confirm` agrees.
    ///
    /// `confirm` receives the question to ask. Returns where to navigate on
    /// success; `None` when declined or when the delete failed, in which case
    /// the page message says so.
    pub async fn delete(&mut self, confirm: impl FnOnce(&str) -> bool) -> Option<Route> {
        if !confirm(DELETE_CONFIRMATION) {
            debug!("Delete of flight {} declined", self.flight_id);
            return None;
        }
        match self.client.flights().delete_by_id(self.flight_id).await {
            Ok(()) => {
                info!("Flight {} deleted", self.flight_id);
                Some(Route::Flights)
            }
            Err(e) => {
                warn!("Failed to delete flight {}: {e}", self.flight_id);
                self.page_error = Some(DELETE_FAILED.to_string());
                None
            }
        }
    }

    fn loaded(&self) -> Result<&FlightContext> {
        self.context
            .as_ref()
            .ok_or_else(|| Error::validation("the flight is not loaded"))
    }

    /// Identifier of the flight being shown.
    #[must_use]
    pub fn flight_id(&self) -> Id {
        self.flight_id
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whether the edit form is showing.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.phase, Phase::Editing(_))
    }

    /// The loaded flight and its surroundings.
    #[must_use]
    pub fn context(&self) -> Option<&FlightContext> {
        self.context.as_ref()
    }

    /// The draft, while editing.
    #[must_use]
    pub fn draft(&self) -> Option<&FlightDraft> {
        match &self.phase {
            Phase::Editing(draft) => Some(draft),
            _ => None,
        }
    }

    /// Field-scoped messages.
    #[must_use]
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Page-level message, if any.
    #[must_use]
    pub fn page_error(&self) -> Option<&str> {
        self.page_error.as_deref()
    }
}

fn not_editing() -> Error {
    Error::validation("the flight is not being edited")
}
