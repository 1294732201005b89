//! Create forms.
//!
//! A form holds typed field values and the last submission error. Required
//! fields are checked before anything is sent. A successful submit returns
//! the route to navigate to.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{
    clamp_occupancy, Airline, Id, NewAircraft, NewAirline, NewFlight, NewPilot, TimeWindow,
};
use crate::route::Route;
use crate::selection::DependentSelection;
use crate::services::Client;

fn required(label: &str) -> String {
    format!("{label} is required.")
}

fn require_text(value: &str, label: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        Err(required(label))
    } else {
        Ok(())
    }
}

fn require<T: Copy>(value: Option<T>, label: &str) -> std::result::Result<T, String> {
    value.ok_or_else(|| required(label))
}

/// New airline form.
#[derive(Debug, Clone, Default)]
pub struct AirlineForm {
    /// Airline name. Must be unique.
    pub name: String,
    /// Founding year.
    pub year_founded: Option<i32>,
    /// Headquarters location.
    pub headquarters: String,
    error: Option<String>,
}

impl AirlineForm {
    /// A form filled with the given values.
    #[must_use]
    pub fn new(name: String, year_founded: Option<i32>, headquarters: String) -> Self {
        Self {
            name,
            year_founded,
            headquarters,
            error: None,
        }
    }

    fn payload(&self) -> std::result::Result<NewAirline, String> {
        require_text(&self.name, "Name")?;
        let year_founded = require(self.year_founded, "Year founded")?;
        require_text(&self.headquarters, "Headquarters")?;
        Ok(NewAirline {
            name: self.name.trim().to_string(),
            year_founded,
            headquarters: self.headquarters.trim().to_string(),
        })
    }

    /// Create the airline. Navigates to the airline list on success.
    pub async fn submit(&mut self, client: &Client) -> Option<Route> {
        let airline = match self.payload() {
            Ok(airline) => airline,
            Err(message) => {
                self.error = Some(message);
                return None;
            }
        };
        match client.airlines().create(&airline).await {
            Ok(_) => {
                info!("Created airline {}", airline.name);
                self.error = None;
                Some(Route::Airlines)
            }
            Err(e) if e.is_conflict() => {
                self.error = Some(
                    "Conflict: Airline with this name already exists, please find a different one"
                        .to_string(),
                );
                None
            }
            Err(_) => {
                self.error = Some("Failed to create airline. Please try again.".to_string());
                None
            }
        }
    }

    /// Message from the last submission.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// New pilot form.
#[derive(Debug, Clone, Default)]
pub struct PilotForm {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Nickname. Left out of the request when blank.
    pub nickname: String,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Employing airline, if any.
    pub airline_id: Option<Id>,
    error: Option<String>,
}

impl PilotForm {
    /// A form for an unaffiliated pilot; set `nickname` and `airline_id`
    /// afterwards as needed.
    #[must_use]
    pub fn new(first_name: String, last_name: String, date_of_birth: Option<NaiveDate>) -> Self {
        Self {
            first_name,
            last_name,
            nickname: String::new(),
            date_of_birth,
            airline_id: None,
            error: None,
        }
    }

    fn payload(&self) -> std::result::Result<NewPilot, String> {
        require_text(&self.first_name, "First name")?;
        require_text(&self.last_name, "Last name")?;
        let date_of_birth = require(self.date_of_birth, "Date of birth")?;
        let nickname = Some(self.nickname.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        Ok(NewPilot {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            nickname,
            date_of_birth,
            airline_id: self.airline_id,
        })
    }

    /// Create the pilot. Navigates to the pilot list on success.
    pub async fn submit(&mut self, client: &Client) -> Option<Route> {
        let pilot = match self.payload() {
            Ok(pilot) => pilot,
            Err(message) => {
                self.error = Some(message);
                return None;
            }
        };
        match client.pilots().create(&pilot).await {
            Ok(_) => {
                info!("Created pilot {} {}", pilot.first_name, pilot.last_name);
                self.error = None;
                Some(Route::Pilots)
            }
            Err(e) => {
                warn!("Failed to create pilot: {e}");
                self.error = Some("Failed to create pilot. Please try again.".to_string());
                None
            }
        }
    }

    /// Message from the last submission.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// New aircraft form.
#[derive(Debug, Clone, Default)]
pub struct AircraftForm {
    /// Model designation.
    pub model: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Year of manufacture.
    pub manufacture_year: Option<i32>,
    /// Passenger capacity.
    pub capacity: Option<u32>,
    /// Weight in kilograms.
    pub weight: Option<f64>,
    /// Owning airline.
    pub airline_id: Option<Id>,
    error: Option<String>,
}

impl AircraftForm {
    /// A form with model and manufacturer filled in; the numeric fields
    /// start empty.
    #[must_use]
    pub fn new(model: String, manufacturer: String) -> Self {
        Self {
            model,
            manufacturer,
            ..Self::default()
        }
    }

    fn payload(&self) -> std::result::Result<NewAircraft, String> {
        require_text(&self.model, "Model")?;
        require_text(&self.manufacturer, "Manufacturer")?;
        Ok(NewAircraft {
            model: self.model.trim().to_string(),
            manufacturer: self.manufacturer.trim().to_string(),
            manufacture_year: require(self.manufacture_year, "Manufacture year")?,
            capacity: require(self.capacity, "Capacity")?,
            weight: require(self.weight, "Weight")?,
            airline_id: require(self.airline_id, "Airline")?,
        })
    }

    /// Create the aircraft.
    ///
    /// Backend failures are logged by the service and never reach the form,
    /// so once the required fields are present this always navigates to the
    /// aircraft list.
    pub async fn submit(&mut self, client: &Client) -> Option<Route> {
        let aircraft = match self.payload() {
            Ok(aircraft) => aircraft,
            Err(message) => {
                self.error = Some(message);
                return None;
            }
        };
        if client.aircraft().create(&aircraft).await.is_some() {
            info!("Created aircraft {} {}", aircraft.manufacturer, aircraft.model);
        }
        self.error = None;
        Some(Route::Aircrafts)
    }

    /// Message from the last submission.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// New flight form.
///
/// The airline is chosen first; aircraft and pilot can then only be picked
/// from that airline. Occupancy is kept within the chosen aircraft's capacity.
#[derive(Debug, Clone, Default)]
pub struct FlightForm {
    /// Origin label.
    pub destination_from: String,
    /// Destination label.
    pub destination_to: String,
    /// Departure, local time.
    pub departure_time: Option<NaiveDateTime>,
    /// Arrival, local time.
    pub arrival_time: Option<NaiveDateTime>,
    airlines: Vec<Airline>,
    choices: DependentSelection,
    occupancy: u32,
    error: Option<String>,
}

impl FlightForm {
    /// An empty form with the airline options fetched.
    ///
    /// A failed airline fetch is logged and leaves the options empty.
    pub async fn open(client: &Client) -> Self {
        let airlines = match client.airlines().list_all().await {
            Ok(airlines) => airlines,
            Err(e) => {
                warn!("Failed to fetch airlines: {e}");
                Vec::new()
            }
        };
        Self {
            airlines,
            ..Self::default()
        }
    }

    /// Airlines on offer.
    #[must_use]
    pub fn airlines(&self) -> &[Airline] {
        &self.airlines
    }

    /// Aircraft and pilot choices for the chosen airline.
    #[must_use]
    pub fn choices(&self) -> &DependentSelection {
        &self.choices
    }

    /// Choose the airline. Drops the aircraft and pilot picks and fetches
    /// the new airline's options.
    ///
    /// # Errors
    ///
    /// Propagates a failed options fetch; both option lists stay empty.
    pub async fn select_airline(&mut self, client: &Client, airline_id: Id) -> Result<()> {
        let result = self.choices.select_airline(client, airline_id).await;
        if let Err(e) = &result {
            warn!("Error fetching aircraft or pilots for airline {airline_id}: {e}");
        }
        result
    }

    /// Pick an aircraft of the chosen airline. Occupancy is re-clamped to its
    /// capacity.
    ///
    /// # Errors
    ///
    /// Fails if no airline is chosen or the aircraft is not on offer.
    pub fn select_aircraft(&mut self, aircraft_id: Id) -> Result<()> {
        let capacity = self.choices.select_aircraft(aircraft_id)?.capacity;
        self.occupancy = self.occupancy.min(capacity);
        Ok(())
    }

    /// Pick a pilot of the chosen airline.
    ///
    /// # Errors
    ///
    /// Fails if no airline is chosen or the pilot is not on offer.
    pub fn select_pilot(&mut self, pilot_id: Id) -> Result<()> {
        self.choices.select_pilot(pilot_id).map(drop)
    }

    /// Set the passenger count, clamped to the chosen aircraft's capacity.
    ///
    /// Returns the stored value.
    ///
    /// # Errors
    ///
    /// Fails when no aircraft is chosen yet.
    pub fn set_occupancy(&mut self, requested: i64) -> Result<u32> {
        let capacity = self
            .choices
            .selected_aircraft()
            .map(|a| a.capacity)
            .ok_or_else(|| Error::selection("choose an aircraft first"))?;
        self.occupancy = clamp_occupancy(requested, capacity);
        Ok(self.occupancy)
    }

    /// Stored passenger count.
    #[must_use]
    pub fn occupancy(&self) -> u32 {
        self.occupancy
    }

    fn payload(&self) -> std::result::Result<NewFlight, String> {
        let airline_id = require(self.choices.airline_id(), "Airline")?;
        let aircraft_id = require(self.choices.selected_aircraft().map(|a| a.id), "Aircraft")?;
        let pilot_id = require(self.choices.selected_pilot().map(|p| p.pilot_id), "Pilot")?;
        require_text(&self.destination_from, "From")?;
        require_text(&self.destination_to, "To")?;
        let window = TimeWindow {
            departure_time: require(self.departure_time, "Departure time")?,
            arrival_time: require(self.arrival_time, "Arrival time")?,
        };
        window.validate().map_err(|e| e.to_string())?;
        if self.destination_from.trim() == self.destination_to.trim() {
            return Err(SAME_DESTINATION.to_string());
        }

        Ok(NewFlight {
            destination_from: self.destination_from.trim().to_string(),
            destination_to: self.destination_to.trim().to_string(),
            occupancy: self.occupancy,
            departure_time: window.departure_time,
            arrival_time: window.arrival_time,
            airline_id,
            aircraft_id,
            pilot_id,
        })
    }

    /// Create the flight. Navigates to the flight list on success.
    pub async fn submit(&mut self, client: &Client) -> Option<Route> {
        let flight = match self.payload() {
            Ok(flight) => flight,
            Err(message) => {
                debug!("Flight form rejected: {message}");
                self.error = Some(message);
                return None;
            }
        };
        match client.flights().create(&flight).await {
            Ok(_) => {
                info!(
                    "Created flight {} -> {}",
                    flight.destination_from, flight.destination_to
                );
                self.error = None;
                Some(Route::Flights)
            }
            Err(e) => {
                self.error = Some(create_failure(&e));
                None
            }
        }
    }

    /// Message from the last submission.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

const SAME_DESTINATION: &str = "Departure destination must be different than arrival destination";

fn create_failure(err: &Error) -> String {
    if err.is_transport() {
        return "Network error. Please check your connection.".to_string();
    }
    match err.http_status() {
        Some(409) => {
            "Conflict: The selected aircraft or pilot is already assigned to another flight."
                .to_string()
        }
        Some(400) => SAME_DESTINATION.to_string(),
        _ => "Something unexpected happened. Please try again.".to_string(),
    }
}
