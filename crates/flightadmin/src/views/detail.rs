//! Single-entity detail pages for airlines, pilots, and aircraft.
//!
//! Each page loads everything it shows up front. A failure anywhere in the
//! load is reduced to one display message.

use serde::Serialize;
use tracing::warn;

use crate::error::Error;
use crate::model::{Aircraft, Airline, Id, Pilot};
use crate::services::Client;

/// A loaded page or the message to show instead.
pub type Loaded<T> = std::result::Result<T, String>;

/// An airline with its pilots and fleet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirlineDetail {
    /// The airline.
    pub airline: Airline,
    /// Pilots employed by it.
    pub pilots: Vec<Pilot>,
    /// Aircraft it owns.
    pub aircraft: Vec<Aircraft>,
}

impl AirlineDetail {
    /// Load airline `id`, then its pilots, then its aircraft.
    pub async fn load(client: &Client, id: Id) -> Loaded<Self> {
        let result = async {
            let airline = client.airlines().get_by_id(id).await?;
            let pilots = client.pilots().list_by_airline(id).await?;
            let aircraft = client.aircraft().list_by_airline(id).await?;
            Ok::<_, Error>(Self {
                airline,
                pilots,
                aircraft,
            })
        }
        .await;

        result.map_err(|e| {
            warn!("Failed to load airline {id}: {e}");
            match e.http_status() {
                Some(400) => "Something went wrong...".to_string(),
                Some(404) => "No airline found.".to_string(),
                _ => "Failed to load airline details. Please try again later.".to_string(),
            }
        })
    }
}

/// A pilot with the airline employing them, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PilotDetail {
    /// The pilot.
    pub pilot: Pilot,
    /// Their airline, when affiliated.
    pub airline: Option<Airline>,
}

impl PilotDetail {
    /// Load pilot `id` and, when affiliated, their airline.
    pub async fn load(client: &Client, id: Id) -> Loaded<Self> {
        let result = async {
            let pilot = client.pilots().get_by_id(id).await?;
            let airline = match pilot.airline_id {
                Some(airline_id) => Some(client.airlines().get_by_id(airline_id).await?),
                None => None,
            };
            Ok::<_, Error>(Self { pilot, airline })
        }
        .await;

        result.map_err(|e| {
            warn!("Failed to load pilot {id}: {e}");
            match e.http_status() {
                Some(400) => "Something went wrong...".to_string(),
                Some(404) => "Pilot not found.".to_string(),
                _ => "Failed to load pilot details. Please try again later.".to_string(),
            }
        })
    }
}

/// An aircraft on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AircraftDetail {
    /// The aircraft.
    pub aircraft: Aircraft,
}

impl AircraftDetail {
    /// Load aircraft `id`. Every failure reads the same.
    pub async fn load(client: &Client, id: Id) -> Loaded<Self> {
        match client.aircraft().get_by_id(id).await {
            Ok(aircraft) => Ok(Self { aircraft }),
            Err(e) => {
                warn!("Failed to load aircraft {id}: {e}");
                Err("Unable to load aircraft details. Please try again later.".to_string())
            }
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

    #[tokio::test]
    async fn test_airline_detail_loads_scoped_lists() {
        let stub = Arc::new(StubGateway::new());
        stub.ok(Method::Get, "/airlines/2", fixtures::airline(2, "KLM"))
            .ok(
                Method::Get,
                "/pilots/airline/2",
                json!([fixtures::pilot(7, Some(2))]),
            )
            .ok(
                Method::Get,
                "/aircrafts/airline/2",
                json!([fixtures::aircraft(3, 2, 150), fixtures::aircraft(4, 2, 90)]),
            );
        let client = Client::new(stub.clone());

        let detail = AirlineDetail::load(&client, 2).await.unwrap();
        assert_eq!(detail.airline.name, "KLM");
        assert_eq!(detail.pilots.len(), 1);
        assert_eq!(detail.aircraft.len(), 2);
    }

    #[tokio::test]
    async fn test_airline_detail_messages() {
        let stub = Arc::new(StubGateway::new());
        let client = Client::new(stub.clone());

        stub.fail(Method::Get, "/airlines/1", 404, "");
        assert_eq!(
            AirlineDetail::load(&client, 1).await.unwrap_err(),
            "No airline found."
        );

        stub.fail(Method::Get, "/airlines/1", 400, "");
        assert_eq!(
            AirlineDetail::load(&client, 1).await.unwrap_err(),
            "Something went wrong..."
        );

        stub.unreachable(Method::Get, "/airlines/1");
        assert_eq!(
            AirlineDetail::load(&client, 1).await.unwrap_err(),
            "Failed to load airline details. Please try again later."
        );
    }

    #[tokio::test]
    async fn test_pilot_detail_with_airline() {
        let stub = Arc::new(StubGateway::new());
        stub.ok(Method::Get, "/pilots/7", fixtures::pilot(7, Some(2)))
            .ok(Method::Get, "/airlines/2", fixtures::airline(2, "KLM"));
        let client = Client::new(stub.clone());

        let detail = PilotDetail::load(&client, 7).await.unwrap();
        assert_eq!(detail.airline.map(|a| a.name), Some("KLM".to_string()));
    }

    #[tokio::test]
    async fn test_unaffiliated_pilot_skips_airline() {
        let stub = Arc::new(StubGateway::new());
        stub.ok(Method::Get, "/pilots/8", fixtures::pilot(8, None));
        let client = Client::new(stub.clone());

        let detail = PilotDetail::load(&client, 8).await.unwrap();
        assert!(detail.airline.is_none());
        assert_eq!(stub.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_pilot_not_found() {
        let stub = Arc::new(StubGateway::new());
        let client = Client::new(stub.clone());
        assert_eq!(
            PilotDetail::load(&client, 99).await.unwrap_err(),
            "Pilot not found."
        );
    }

    #[tokio::test]
    async fn test_aircraft_detail_single_message() {
        let stub = Arc::new(StubGateway::new());
        let client = Client::new(stub.clone());
        for status in [400, 404, 500] {
            stub.fail(Method::Get, "/aircrafts/5", status, "");
            assert_eq!(
                AircraftDetail::load(&client, 5).await.unwrap_err(),
                "Unable to load aircraft details. Please try again later."
            );
        }
    }
}
