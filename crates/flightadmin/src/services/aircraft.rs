use serde_json::Value;
use tracing::{debug, error};

use super::{fetch, send};
use crate::api::{ApiRequest, Gateway};
use crate::error::Result;
use crate::model::{Aircraft, Id, NewAircraft};

/// `/aircrafts` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AircraftService<'a> {
    gateway: &'a dyn Gateway,
}

impl<'a> AircraftService<'a> {
    pub(super) fn new(gateway: &'a dyn Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /aircrafts`
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    pub async fn list_all(&self) -> Result<Vec<Aircraft>> {
        let result = fetch(self.gateway, ApiRequest::get("/aircrafts")).await;
        if let Err(e) = &result {
            error!("Error fetching aircrafts: {e}");
        }
        result
    }

    /// `GET /aircrafts/{id}`
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    pub async fn get_by_id(&self, id: Id) -> Result<Aircraft> {
        fetch(self.gateway, ApiRequest::get(format!("/aircrafts/{id}"))).await
    }

    /// `GET /aircrafts/airline/{id}`
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    pub async fn list_by_airline(&self, airline_id: Id) -> Result<Vec<Aircraft>> {
        let result = fetch(
            self.gateway,
            ApiRequest::get(format!("/aircrafts/airline/{airline_id}")),
        )
        .await;
        if let Err(e) = &result {
            error!("Error fetching aircrafts from airline with id {airline_id}: {e}");
        }
        result
    }

    /// `POST /aircrafts`.
    ///
    /// Any 2xx answer counts as created and its body is returned as is.
    /// Failures are logged and reported as `None`; callers cannot tell a
    /// rejected creation from any other failure.
    pub async fn create(&self, aircraft: &NewAircraft) -> Option<Value> {
        debug!("Creating aircraft {} {}", aircraft.manufacturer, aircraft.model);
        let result = match ApiRequest::post("/aircrafts", aircraft) {
            Ok(request) => send(self.gateway, request).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(body) => Some(body),
            Err(e) => {
                error!("Error creating aircraft: {e}");
                None
            }
        }
    }

    /// `DELETE /aircrafts/{id}`
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn delete_by_id(&self, id: Id) -> Result<()> {
        send(self.gateway, ApiRequest::delete(format!("/aircrafts/{id}"))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::api::Method;
    use crate::model::NewAircraft;
    use crate::services::Client;
    use crate::testing::{fixtures, StubGateway};

    fn new_aircraft() -> NewAircraft {
        NewAircraft {
            model: "A320".to_string(),
            manufacturer: "Airbus".to_string(),
            manufacture_year: 2018,
            capacity: 180,
            weight: 42_600.0,
            airline_id: 1,
        }
    }

    #[tokio::test]
    async fn test_list_by_airline_path() {
        let stub = Arc::new(StubGateway::new());
        stub.ok(
            Method::Get,
            "/aircrafts/airline/4",
            json!([fixtures::aircraft(10, 4, 180)]),
        );
        let client = Client::new(stub.clone());

        let fleet = client.aircraft().list_by_airline(4).await.unwrap();
        assert_eq!(fleet[0].airline_id, 4);
        assert_eq!(fleet[0].capacity, 180);
    }

    #[tokio::test]
    async fn test_list_by_airline_propagates_failure() {
        let stub = Arc::new(StubGateway::new());
        stub.fail(Method::Get, "/aircrafts/airline/4", 500, "boom");
        let client = Client::new(stub.clone());

        assert!(client.aircraft().list_by_airline(4).await.is_err());
    }

    #[tokio::test]
    async fn test_create_success() {
        let stub = Arc::new(StubGateway::new());
        stub.ok(Method::Post, "/aircrafts", fixtures::aircraft(11, 1, 180));
        let client = Client::new(stub.clone());

        let created = client.aircraft().create(&new_aircraft()).await.unwrap();
        assert_eq!(created["id"], 11);
    }

    #[tokio::test]
    async fn test_create_failure_is_swallowed() {
        let stub = Arc::new(StubGateway::new());
        stub.fail(Method::Post, "/aircrafts", 400, "capacity must be positive");
        let client = Client::new(stub.clone());

        assert!(client.aircraft().create(&new_aircraft()).await.is_none());
        assert_eq!(stub.count(Method::Post, "/aircrafts"), 1);
    }
}
