use serde_json::Value;
use tracing::{debug, error};

use super::{fetch, send};
use crate::api::{ApiRequest, Gateway};
use crate::error::Result;
use crate::model::{Id, NewPilot, Pilot};

/// `/pilots` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct PilotService<'a> {
    gateway: &'a dyn Gateway,
}

impl<'a> PilotService<'a> {
    pub(super) fn new(gateway: &'a dyn Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /pilots`
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    pub async fn list_all(&self) -> Result<Vec<Pilot>> {
        fetch(self.gateway, ApiRequest::get("/pilots")).await
    }

    /// `GET /pilots/{id}`
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    pub async fn get_by_id(&self, id: Id) -> Result<Pilot> {
        fetch(self.gateway, ApiRequest::get(format!("/pilots/{id}"))).await
    }

    /// `GET /pilots/airline/{id}`
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    pub async fn list_by_airline(&self, airline_id: Id) -> Result<Vec<Pilot>> {
        let result = fetch(
            self.gateway,
            ApiRequest::get(format!("/pilots/airline/{airline_id}")),
        )
        .await;
        if let Err(e) = &result {
            error!("Error fetching pilots for airline {airline_id}: {e}");
        }
        result
    }

    /// `POST /pilots`. Returns the body of the 2xx answer as is.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn create(&self, pilot: &NewPilot) -> Result<Value> {
        debug!("Creating pilot {} {}", pilot.first_name, pilot.last_name);
        send(self.gateway, ApiRequest::post("/pilots", pilot)?).await
    }

    /// `PATCH /pilots/{id}`
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    pub async fn update(&self, id: Id, pilot: &NewPilot) -> Result<Pilot> {
        let request = ApiRequest::patch(format!("/pilots/{id}")).with_json(pilot)?;
        fetch(self.gateway, request).await
    }

    /// `DELETE /pilots/{id}`
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn delete_by_id(&self, id: Id) -> Result<()> {
        send(self.gateway, ApiRequest::delete(format!("/pilots/{id}"))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::api::Method;
    use crate::model::NewPilot;
    use crate::services::Client;
    use crate::testing::{fixtures, StubGateway};

    #[tokio::test]
    async fn test_list_by_airline() {
        let stub = Arc::new(StubGateway::new());
        stub.ok(
            Method::Get,
            "/pilots/airline/2",
            json!([fixtures::pilot(1, Some(2)), fixtures::pilot(2, Some(2))]),
        );
        let client = Client::new(stub.clone());

        let pilots = client.pilots().list_by_airline(2).await.unwrap();
        assert_eq!(pilots.len(), 2);
        assert!(pilots.iter().all(|p| p.airline_id == Some(2)));
    }

    #[tokio::test]
    async fn test_list_by_airline_propagates_failure() {
        let stub = Arc::new(StubGateway::new());
        stub.fail(Method::Get, "/pilots/airline/2", 404, "Airline not found");
        let client = Client::new(stub.clone());

        let err = client.pilots().list_by_airline(2).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_patches_body() {
        let stub = Arc::new(StubGateway::new());
        stub.ok(Method::Patch, "/pilots/1", fixtures::pilot(1, None));
        let client = Client::new(stub.clone());

        let pilot: crate::model::Pilot = serde_json::from_value(fixtures::pilot(1, None)).unwrap();
        let mut change = NewPilot::from(&pilot);
        change.nickname = Some("Ace".to_string());

        client.pilots().update(1, &change).await.unwrap();
        let sent = &stub.requests()[0];
        assert_eq!(sent.method, Method::Patch);
        assert_eq!(sent.body.as_ref().unwrap()["nickname"], "Ace");
    }
}
