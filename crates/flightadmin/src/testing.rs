//! Recording stub gateway for unit tests.

use std::sync::Mutex;

use serde_json::Value;

use crate::api::{ApiRequest, Gateway, Method};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Status(u16, String),
    Unreachable,
}

#[derive(Debug)]
struct Stub {
    method: Method,
    path: String,
    reply: Reply,
}

/// Answers from scripted routes and records every request in order.
///
/// Later stubs for the same route shadow earlier ones. Unscripted routes answer
/// 404 so a missing stub shows up as a failure rather than a hang.
#[derive(Debug, Default)]
pub(crate) struct StubGateway {
    stubs: Mutex<Vec<Stub>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl StubGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.stubs.lock().unwrap().push(Stub {
            method,
            path: path.to_string(),
            reply,
        });
        self
    }

    /// Answer `method path` with `body`.
    pub(crate) fn ok(&self, method: Method, path: &str, body: Value) -> &Self {
        self.push(method, path, Reply::Json(body))
    }

    /// Answer `method path` with a non-2xx status and raw body.
    pub(crate) fn fail(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.push(method, path, Reply::Status(status, body.to_string()))
    }

    /// Fail `method path` without any response.
    pub(crate) fn unreachable(&self, method: Method, path: &str) -> &Self {
        self.push(method, path, Reply::Unreachable)
    }

    /// Every request received so far.
    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `(method, path)` of every request received so far.
    pub(crate) fn calls(&self) -> Vec<(Method, String)> {
        self.requests()
            .into_iter()
            .map(|r| (r.method, r.path))
            .collect()
    }

    /// How many times `method path` was requested.
    pub(crate) fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub(crate) fn sent(&self, method: Method, path: &str) -> bool {
        self.count(method, path) > 0
    }

    pub(crate) fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

#[async_trait::async_trait]
impl Gateway for StubGateway {
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());

        let reply = self
            .stubs
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|s| s.method == request.method && s.path == request.path)
            .map(|s| s.reply.clone());

        match reply {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Status(status, body)) => Err(Error::status(status, body)),
            Some(Reply::Unreachable) => Err(Error::transport(request.path, "connection refused")),
            None => Err(Error::status(
                404,
                format!("no stub for {} {}", request.method, request.path),
            )),
        }
    }
}

/// JSON fixtures shared by the view and workflow tests.
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    pub(crate) fn airline(id: i64, name: &str) -> Value {
        json!({"id": id, "name": name, "yearFounded": 1950, "headquarters": "Prague"})
    }

    pub(crate) fn aircraft(id: i64, airline_id: i64, capacity: u32) -> Value {
        json!({
            "id": id,
            "model": format!("A32{id}"),
            "manufacturer": "Airbus",
            "manufactureYear": 2015,
            "capacity": capacity,
            "weight": 42_600.0,
            "airlineId": airline_id
        })
    }

    pub(crate) fn pilot(id: i64, airline_id: Option<i64>) -> Value {
        json!({
            "pilotId": id,
            "firstName": format!("Pilot{id}"),
            "lastName": "Novak",
            "nickname": null,
            "dateOfBirth": "1980-05-17",
            "airlineId": airline_id
        })
    }

    pub(crate) fn flight(id: i64, aircraft_id: i64, pilot_id: i64) -> Value {
        json!({
            "id": id,
            "destinationFrom": "Prague",
            "destinationTo": "Vienna",
            "departureTime": "2025-03-01T08:00:00",
            "arrivalTime": "2025-03-01T09:00:00",
            "occupancy": 100,
            "aircraftId": aircraft_id,
            "pilotId": pilot_id
        })
    }
}
