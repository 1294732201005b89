use serde_json::Value;
use tracing::debug;

use super::{fetch, send};
use crate::api::{ApiRequest, Gateway};
use crate::error::Result;
use crate::model::{DestinationsUpdate, Flight, Id, NewFlight, TimeWindow};

/// `/flights` endpoints, including the five partial updates.
///
/// The partial updates return the backend's raw body; the edit workflow never
/// trusts it and reloads the flight instead.
#[derive(Debug, Clone, Copy)]
pub struct FlightService<'a> {
    gateway: &'a dyn Gateway,
}

impl<'a> FlightService<'a> {
    pub(super) fn new(gateway: &'a dyn Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /flights`
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    pub async fn list_all(&self) -> Result<Vec<Flight>> {
        fetch(self.gateway, ApiRequest::get("/flights")).await
    }

    /// `GET /flights/{id}`
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    pub async fn get_by_id(&self, id: Id) -> Result<Flight> {
        fetch(self.gateway, ApiRequest::get(format!("/flights/{id}"))).await
    }

    /// `GET /flights/pilot/{id}`
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    pub async fn list_by_pilot(&self, pilot_id: Id) -> Result<Vec<Flight>> {
        fetch(self.gateway, ApiRequest::get(format!("/flights/pilot/{pilot_id}"))).await
    }

    /// `GET /flights/aircraft/{id}`
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    pub async fn list_by_aircraft(&self, aircraft_id: Id) -> Result<Vec<Flight>> {
        fetch(
            self.gateway,
            ApiRequest::get(format!("/flights/aircraft/{aircraft_id}")),
        )
        .await
    }

    /// `POST /flights`. 409 on a pilot/aircraft clash, 400 when origin equals
    /// destination. Returns the body of the 2xx answer as is.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn create(&self, flight: &NewFlight) -> Result<Value> {
        debug!(
            "Creating flight {} -> {}",
            flight.destination_from, flight.destination_to
        );
        send(self.gateway, ApiRequest::post("/flights", flight)?).await
    }

    /// `DELETE /flights/{id}`
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn delete_by_id(&self, id: Id) -> Result<()> {
        send(self.gateway, ApiRequest::delete(format!("/flights/{id}"))).await?;
        Ok(())
    }

    /// `PATCH /flights/{id}`
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn update_destinations(&self, id: Id, update: &DestinationsUpdate) -> Result<Value> {
        debug!("Flight {id}: destinations -> {update:?}");
        let request = ApiRequest::patch(format!("/flights/{id}")).with_json(update)?;
        send(self.gateway, request).await
    }

    /// `PATCH /flights/{id}/time`
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn change_time(&self, id: Id, window: &TimeWindow) -> Result<Value> {
        debug!("Flight {id}: time window -> {window:?}");
        let request = ApiRequest::patch(format!("/flights/{id}/time")).with_json(window)?;
        send(self.gateway, request).await
    }

    /// `PATCH /flights/{id}/pilot/{pilotId}`. 409 if the pilot is unavailable.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn change_pilot(&self, id: Id, pilot_id: Id) -> Result<Value> {
        debug!("Flight {id}: pilot -> {pilot_id}");
        send(
            self.gateway,
            ApiRequest::patch(format!("/flights/{id}/pilot/{pilot_id}")),
        )
        .await
    }

    /// `PATCH /flights/{id}/aircraft/{aircraftId}`. 409 if the aircraft is unavailable.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn change_aircraft(&self, id: Id, aircraft_id: Id) -> Result<Value> {
        debug!("Flight {id}: aircraft -> {aircraft_id}");
        send(
            self.gateway,
            ApiRequest::patch(format!("/flights/{id}/aircraft/{aircraft_id}")),
        )
        .await
    }

    /// `PATCH /flights/{id}/occupancy/{value}`
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn change_occupancy(&self, id: Id, occupancy: u32) -> Result<Value> {
        debug!("Flight {id}: occupancy -> {occupancy}");
        send(
            self.gateway,
            ApiRequest::patch(format!("/flights/{id}/occupancy/{occupancy}")),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};

    use crate::api::Method;
    use crate::model::{parse_local_time, DestinationsUpdate, TimeWindow};
    use crate::services::Client;
    use crate::testing::{fixtures, StubGateway};

    #[tokio::test]
    async fn test_scoped_lists() {
        let stub = Arc::new(StubGateway::new());
        stub.ok(Method::Get, "/flights/pilot/9", json!([fixtures::flight(1, 4, 9)]))
            .ok(Method::Get, "/flights/aircraft/4", json!([]));
        let client = Client::new(stub.clone());

        assert_eq!(client.flights().list_by_pilot(9).await.unwrap().len(), 1);
        assert!(client.flights().list_by_aircraft(4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_update_paths() {
        let stub = Arc::new(StubGateway::new());
        stub.ok(Method::Patch, "/flights/1", Value::Null)
            .ok(Method::Patch, "/flights/1/time", Value::Null)
            .ok(Method::Patch, "/flights/1/pilot/9", Value::Null)
            .ok(Method::Patch, "/flights/1/aircraft/4", Value::Null)
            .ok(Method::Patch, "/flights/1/occupancy/42", Value::Null);
        let client = Client::new(stub.clone());
        let flights = client.flights();

        flights
            .update_destinations(
                1,
                &DestinationsUpdate {
                    destination_from: "Brno".to_string(),
                    destination_to: "Paris".to_string(),
                },
            )
            .await
            .unwrap();
        flights
            .change_time(
                1,
                &TimeWindow {
                    departure_time: parse_local_time("2025-04-01T10:00").unwrap(),
                    arrival_time: parse_local_time("2025-04-01T12:00").unwrap(),
                },
            )
            .await
            .unwrap();
        flights.change_pilot(1, 9).await.unwrap();
        flights.change_aircraft(1, 4).await.unwrap();
        flights.change_occupancy(1, 42).await.unwrap();

        let requests = stub.requests();
        assert_eq!(requests.len(), 5);
        assert_eq!(
            requests[0].body,
            Some(json!({"destinationFrom": "Brno", "destinationTo": "Paris"}))
        );
        assert_eq!(requests[1].body.as_ref().unwrap()["arrivalTime"], "2025-04-01T12:00:00");
        assert!(requests[2..].iter().all(|r| r.body.is_none()));
    }

    #[tokio::test]
    async fn test_conflict_passes_through_unchanged() {
        let stub = Arc::new(StubGateway::new());
        stub.fail(
            Method::Patch,
            "/flights/1/pilot/9",
            409,
            crate::error::PILOT_UNAVAILABLE_BODY,
        );
        let client = Client::new(stub.clone());

        let err = client.flights().change_pilot(1, 9).await.unwrap_err();
        assert_eq!(err.conflict(), Some(crate::error::Conflict::PilotUnavailable));
    }
}
