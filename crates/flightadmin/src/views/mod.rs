//! Page state for lists, entity details, and create forms.
//!
//! Views talk to the backend through [`Client`](crate::services::Client) and
//! turn failures into the messages a user sees. The flight detail page lives
//! in [`workflow`](crate::workflow) because it can also edit.

mod create;
mod detail;
mod list;

pub use create::{AircraftForm, AirlineForm, FlightForm, PilotForm};
pub use detail::{AircraftDetail, AirlineDetail, Loaded, PilotDetail};
pub use list::{FlightScope, ListState, ListView, Listed};
