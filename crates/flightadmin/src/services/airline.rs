use serde_json::Value;
use tracing::{debug, error};

use super::{fetch, send};
use crate::api::{ApiRequest, Gateway};
use crate::error::Result;
use crate::model::{Airline, Id, NewAirline};

/// `/airlines` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AirlineService<'a> {
    gateway: &'a dyn Gateway,
}

impl<'a> AirlineService<'a> {
    pub(super) fn new(gateway: &'a dyn Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /airlines`
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    pub async fn list_all(&self) -> Result<Vec<Airline>> {
        fetch(self.gateway, ApiRequest::get("/airlines")).await
    }

    /// `GET /airlines/{id}`
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    pub async fn get_by_id(&self, id: Id) -> Result<Airline> {
        fetch(self.gateway, ApiRequest::get(format!("/airlines/{id}"))).await
    }

    /// `POST /airlines`. The backend answers 409 when the name is taken.
    ///
    /// Any 2xx answer counts as created; its body is returned as is.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn create(&self, airline: &NewAirline) -> Result<Value> {
        debug!("Creating airline {}", airline.name);
        let result = send(self.gateway, ApiRequest::post("/airlines", airline)?).await;
        if let Err(e) = &result {
            error!("Error creating airline: {e}");
        }
        result
    }

    /// `DELETE /airlines/{id}`
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn delete_by_id(&self, id: Id) -> Result<()> {
        send(self.gateway, ApiRequest::delete(format!("/airlines/{id}"))).await?;
        Ok(())
    }
}
