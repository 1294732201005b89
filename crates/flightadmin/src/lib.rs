//! `flightadmin` - Administration client for a flight-operations backend
//!
//! This library provides typed access to the backend's airlines, aircraft,
//! pilots, and flights, together with the page logic built on top of it: list
//! and detail views, create forms, and the flight edit workflow with its
//! ordered partial updates.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod route;
pub mod selection;
pub mod services;
pub mod views;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use api::{Gateway, HttpGateway};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use route::Route;
pub use services::Client;
pub use workflow::FlightEditor;
