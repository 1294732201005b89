//! Entity access services.
//!
//! One service per entity. Each operation shapes a request path and body,
//! logs, and hands back whatever the gateway returned. The only exception is
//! [`AircraftService::create`], which logs failures instead of returning them.

mod aircraft;
mod airline;
mod flight;
mod pilot;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use aircraft::AircraftService;
pub use airline::AirlineService;
pub use flight::FlightService;
pub use pilot::PilotService;

use crate::api::{ApiRequest, Gateway};
use crate::error::{Error, Result};

/// Entry point to all entity services.
///
/// Cheap to clone; every clone shares the same gateway.
#[derive(Debug, Clone)]
pub struct Client {
    gateway: Arc<dyn Gateway>,
}

impl Client {
    /// Create a client over `gateway`.
    #[must_use]
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Airline operations.
    #[must_use]
    pub fn airlines(&self) -> AirlineService<'_> {
        AirlineService::new(self.gateway.as_ref())
    }

    /// Aircraft operations.
    #[must_use]
    pub fn aircraft(&self) -> AircraftService<'_> {
        AircraftService::new(self.gateway.as_ref())
    }

    /// Pilot operations.
    #[must_use]
    pub fn pilots(&self) -> PilotService<'_> {
        PilotService::new(self.gateway.as_ref())
    }

    /// Flight operations.
    #[must_use]
    pub fn flights(&self) -> FlightService<'_> {
        FlightService::new(self.gateway.as_ref())
    }
}

/// Execute `request` and decode the body as `T`.
async fn fetch<T: DeserializeOwned>(gateway: &dyn Gateway, request: ApiRequest) -> Result<T> {
    let path = request.path.clone();
    let body = gateway.execute(request).await?;
    serde_json::from_value(body).map_err(|source| Error::Decode { path, source })
}

/// Execute `request` and return the raw body.
async fn send(gateway: &dyn Gateway, request: ApiRequest) -> Result<Value> {
    gateway.execute(request).await
}
