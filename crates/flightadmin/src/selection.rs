//! Airline-scoped aircraft and pilot choices.
//!
//! Aircraft and pilots for a flight may only be picked from the airline chosen
//! first. [`DependentSelection`] enforces that by only ever offering the
//! scoped lists of the current airline, and by refusing picks before an
//! airline is chosen.

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Aircraft, Id, Pilot};
use crate::services::Client;

/// Options and picks that depend on the chosen airline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependentSelection {
    airline_id: Option<Id>,
    aircraft_options: Vec<Aircraft>,
    pilot_options: Vec<Pilot>,
    aircraft_id: Option<Id>,
    pilot_id: Option<Id>,
}

impl DependentSelection {
    /// Nothing chosen, nothing offered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose `airline_id` and fetch its aircraft and pilots.
    ///
    /// Previous picks and options are discarded before fetching, so a failed
    /// fetch leaves nothing stale behind. Nothing is cached; choosing the same
    /// airline again fetches again.
    ///
    /// # Errors
    ///
    /// Propagates the first failing scoped fetch; the options stay empty.
    pub async fn select_airline(&mut self, client: &Client, airline_id: Id) -> Result<()> {
        self.airline_id = Some(airline_id);
        self.aircraft_id = None;
        self.pilot_id = None;
        self.aircraft_options.clear();
        self.pilot_options.clear();

        let aircraft = client.aircraft().list_by_airline(airline_id).await?;
        let pilots = client.pilots().list_by_airline(airline_id).await?;
        debug!(
            "Airline {airline_id}: {} aircraft, {} pilots on offer",
            aircraft.len(),
            pilots.len()
        );

        self.aircraft_options = aircraft;
        self.pilot_options = pilots;
        Ok(())
    }

    /// Offer `aircraft` and `pilots` for `airline_id` without fetching.
    ///
    /// Used when the lists were already loaded as part of a larger sequence.
    pub fn populate(&mut self, airline_id: Id, aircraft: Vec<Aircraft>, pilots: Vec<Pilot>) {
        self.airline_id = Some(airline_id);
        self.aircraft_options = aircraft;
        self.pilot_options = pilots;
        self.aircraft_id = None;
        self.pilot_id = None;
    }

    /// Whether aircraft and pilot choices are enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.airline_id.is_some()
    }

    /// The chosen airline.
    #[must_use]
    pub fn airline_id(&self) -> Option<Id> {
        self.airline_id
    }

    /// Aircraft currently on offer.
    #[must_use]
    pub fn aircraft_options(&self) -> &[Aircraft] {
        &self.aircraft_options
    }

    /// Pilots currently on offer.
    #[must_use]
    pub fn pilot_options(&self) -> &[Pilot] {
        &self.pilot_options
    }

    /// Pick an aircraft from the offered list.
    ///
    /// # Errors
    ///
    /// Fails if no airline is chosen or the aircraft is not on offer.
    pub fn select_aircraft(&mut self, aircraft_id: Id) -> Result<&Aircraft> {
        self.ensure_enabled()?;
        let aircraft = self
            .aircraft_options
            .iter()
            .find(|a| a.id == aircraft_id)
            .ok_or_else(|| {
                Error::selection(format!(
                    "aircraft {aircraft_id} does not belong to the selected airline"
                ))
            })?;
        self.aircraft_id = Some(aircraft_id);
        Ok(aircraft)
    }

    /// Pick a pilot from the offered list.
    ///
    /// # Errors
    ///
    /// Fails if no airline is chosen or the pilot is not on offer.
    pub fn select_pilot(&mut self, pilot_id: Id) -> Result<&Pilot> {
        self.ensure_enabled()?;
        let pilot = self
            .pilot_options
            .iter()
            .find(|p| p.pilot_id == pilot_id)
            .ok_or_else(|| {
                Error::selection(format!(
                    "pilot {pilot_id} does not belong to the selected airline"
                ))
            })?;
        self.pilot_id = Some(pilot_id);
        Ok(pilot)
    }

    /// The picked aircraft, if any.
    #[must_use]
    pub fn selected_aircraft(&self) -> Option<&Aircraft> {
        let id = self.aircraft_id?;
        self.aircraft_options.iter().find(|a| a.id == id)
    }

    /// The picked pilot, if any.
    #[must_use]
    pub fn selected_pilot(&self) -> Option<&Pilot> {
        let id = self.pilot_id?;
        self.pilot_options.iter().find(|p| p.pilot_id == id)
    }

    /// Look up an offered aircraft without picking it.
    #[must_use]
    pub fn offered_aircraft(&self, aircraft_id: Id) -> Option<&Aircraft> {
        self.aircraft_options.iter().find(|a| a.id == aircraft_id)
    }

    /// Whether `pilot_id` is on offer.
    #[must_use]
    pub fn offers_pilot(&self, pilot_id: Id) -> bool {
        self.pilot_options.iter().any(|p| p.pilot_id == pilot_id)
    }

    fn ensure_enabled(&self) -> Result<()> {
        if self.is_enabled() {
            Ok(())
        } else {
            Err(Error::selection("choose an airline first"))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::api::Method;
    use crate::testing::{fixtures, StubGateway};

    fn stub_airlines() -> Arc<StubGateway> {
        let stub = Arc::new(StubGateway::new());
        stub.ok(
            Method::Get,
            "/aircrafts/airline/1",
            json!([fixtures::aircraft(10, 1, 150), fixtures::aircraft(11, 1, 180)]),
        )
        .ok(
            Method::Get,
            "/pilots/airline/1",
            json!([fixtures::pilot(100, Some(1))]),
        )
        .ok(
            Method::Get,
            "/aircrafts/airline/2",
            json!([fixtures::aircraft(20, 2, 90)]),
        )
        .ok(
            Method::Get,
            "/pilots/airline/2",
            json!([fixtures::pilot(200, Some(2)), fixtures::pilot(201, Some(2))]),
        );
        stub
    }

    #[test]
    fn test_disabled_before_airline() {
        let mut selection = DependentSelection::new();
        assert!(!selection.is_enabled());
        assert!(matches!(
            selection.select_aircraft(10),
            Err(Error::Selection(_))
        ));
        assert!(matches!(selection.select_pilot(100), Err(Error::Selection(_))));
    }

    #[tokio::test]
    async fn test_select_airline_populates_options() {
        let stub = stub_airlines();
        let client = Client::new(stub.clone());
        let mut selection = DependentSelection::new();

        selection.select_airline(&client, 1).await.unwrap();
        assert!(selection.is_enabled());
        assert_eq!(selection.aircraft_options().len(), 2);
        assert_eq!(selection.pilot_options().len(), 1);
        assert_eq!(selection.select_aircraft(11).unwrap().capacity, 180);
    }

    #[tokio::test]
    async fn test_switching_airline_drops_stale_options() {
        let stub = stub_airlines();
        let client = Client::new(stub.clone());
        let mut selection = DependentSelection::new();

        selection.select_airline(&client, 1).await.unwrap();
        selection.select_aircraft(10).unwrap();
        selection.select_pilot(100).unwrap();

        selection.select_airline(&client, 2).await.unwrap();

        assert_eq!(selection.airline_id(), Some(2));
        assert!(selection.aircraft_options().iter().all(|a| a.airline_id == 2));
        assert!(selection
            .pilot_options()
            .iter()
            .all(|p| p.airline_id == Some(2)));
        assert!(selection.selected_aircraft().is_none());
        assert!(selection.selected_pilot().is_none());
        assert!(selection.select_aircraft(10).is_err());
    }

    #[tokio::test]
    async fn test_every_airline_change_refetches() {
        let stub = stub_airlines();
        let client = Client::new(stub.clone());
        let mut selection = DependentSelection::new();

        selection.select_airline(&client, 1).await.unwrap();
        selection.select_airline(&client, 1).await.unwrap();

        assert_eq!(stub.count(Method::Get, "/aircrafts/airline/1"), 2);
        assert_eq!(stub.count(Method::Get, "/pilots/airline/1"), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_no_options() {
        let stub = stub_airlines();
        stub.fail(Method::Get, "/pilots/airline/2", 500, "down");
        let client = Client::new(stub.clone());
        let mut selection = DependentSelection::new();

        selection.select_airline(&client, 1).await.unwrap();
        assert!(selection.select_airline(&client, 2).await.is_err());
        assert!(selection.aircraft_options().is_empty());
        assert!(selection.pilot_options().is_empty());
    }
}
