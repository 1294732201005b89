//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Subcommand, ValueEnum};

use crate::model::{parse_local_time, Id};

/// Airline commands.
#[derive(Debug, Subcommand)]
pub enum AirlineCommand {
    /// List all airlines
    List,

    /// Show an airline with its pilots and fleet
    Show {
        /// Airline identifier
        id: Id,
    },

    /// Create an airline
    Create {
        /// Airline name (must be unique)
        #[arg(long)]
        name: String,

        /// Year the airline was founded
        #[arg(long)]
        year_founded: i32,

        /// Headquarters location
        #[arg(long)]
        headquarters: String,
    },

    /// Delete an airline
    Delete {
        /// Airline identifier
        id: Id,
    },
}

/// Aircraft commands.
#[derive(Debug, Subcommand)]
pub enum AircraftCommand {
    /// List all aircraft
    List,

    /// Show one aircraft
    Show {
        /// Aircraft identifier
        id: Id,
    },

    /// Create an aircraft
    Create {
        /// Model designation
        #[arg(long)]
        model: String,

        /// Manufacturer name
        #[arg(long)]
        manufacturer: String,

        /// Year of manufacture
        #[arg(long)]
        year: i32,

        /// Passenger capacity
        #[arg(long)]
        capacity: u32,

        /// Weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Owning airline
        #[arg(long)]
        airline: Id,
    },

    /// Delete an aircraft
    Delete {
        /// Aircraft identifier
        id: Id,
    },
}

/// Pilot commands.
#[derive(Debug, Subcommand)]
pub enum PilotCommand {
    /// List all pilots
    List,

    /// Show a pilot and their airline
    Show {
        /// Pilot identifier
        id: Id,
    },

    /// Create a pilot
    Create {
        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// Nickname
        #[arg(long)]
        nickname: Option<String>,

        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        date_of_birth: NaiveDate,

        /// Employing airline
        #[arg(long)]
        airline: Option<Id>,
    },

    /// Update a pilot; omitted fields keep their current value
    Update(PilotUpdateCommand),

    /// Delete a pilot
    Delete {
        /// Pilot identifier
        id: Id,
    },
}

/// Pilot update arguments.
#[derive(Debug, Args)]
pub struct PilotUpdateCommand {
    /// Pilot identifier
    pub id: Id,

    /// New first name
    #[arg(long)]
    pub first_name: Option<String>,

    /// New last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// New nickname (empty to clear)
    #[arg(long)]
    pub nickname: Option<String>,

    /// New date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub date_of_birth: Option<NaiveDate>,

    /// New employing airline
    #[arg(long)]
    pub airline: Option<Id>,
}

/// Flight commands.
#[derive(Debug, Subcommand)]
pub enum FlightCommand {
    /// List flights, optionally for one pilot or aircraft
    List {
        /// Only flights flown by this pilot
        #[arg(long, conflicts_with = "aircraft")]
        pilot: Option<Id>,

        /// Only flights operated with this aircraft
        #[arg(long)]
        aircraft: Option<Id>,
    },

    /// Show a flight with its aircraft and airline
    Show {
        /// Flight identifier
        id: Id,
    },

    /// Create a flight
    Create(FlightCreateCommand),

    /// Edit a flight; omitted fields keep their current value
    Edit(FlightEditCommand),

    /// Delete a flight
    Delete {
        /// Flight identifier
        id: Id,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Flight create arguments.
#[derive(Debug, Args)]
pub struct FlightCreateCommand {
    /// Airline to pick aircraft and pilot from
    #[arg(long)]
    pub airline: Id,

    /// Aircraft of that airline
    #[arg(long)]
    pub aircraft: Id,

    /// Pilot of that airline
    #[arg(long)]
    pub pilot: Id,

    /// Origin
    #[arg(long)]
    pub from: String,

    /// Destination
    #[arg(long)]
    pub to: String,

    /// Departure, local time (YYYY-MM-DDTHH:MM)
    #[arg(long, value_parser = parse_time)]
    pub departure: NaiveDateTime,

    /// Arrival, local time (YYYY-MM-DDTHH:MM)
    #[arg(long, value_parser = parse_time)]
    pub arrival: NaiveDateTime,

    /// Passengers on board, clamped to the aircraft's capacity
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub occupancy: i64,
}

/// Flight edit arguments.
#[derive(Debug, Args)]
pub struct FlightEditCommand {
    /// Flight identifier
    pub id: Id,

    /// New origin
    #[arg(long)]
    pub from: Option<String>,

    /// New destination
    #[arg(long)]
    pub to: Option<String>,

    /// New departure, local time
    #[arg(long, value_parser = parse_time)]
    pub departure: Option<NaiveDateTime>,

    /// New arrival, local time
    #[arg(long, value_parser = parse_time)]
    pub arrival: Option<NaiveDateTime>,

    /// Pilot of the flight's airline
    #[arg(long)]
    pub pilot: Option<Id>,

    /// Aircraft of the flight's airline
    #[arg(long)]
    pub aircraft: Option<Id>,

    /// Passengers on board; clamped to capacity, empty resets to 0
    #[arg(long, allow_hyphen_values = true)]
    pub occupancy: Option<String>,
}

/// Open command arguments.
#[derive(Debug, Args)]
pub struct OpenCommand {
    /// Page path, e.g. /flights/3 or /create-airline
    pub path: String,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
}

impl From<FormatArg> for crate::config::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => Self::Plain,
            FormatArg::Json => Self::Json,
        }
    }
}

fn parse_time(input: &str) -> Result<NaiveDateTime, String> {
    parse_local_time(input).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_format_arg_conversion() {
        assert_eq!(OutputFormat::from(FormatArg::Plain), OutputFormat::Plain);
        assert_eq!(OutputFormat::from(FormatArg::Json), OutputFormat::Json);
    }

    #[test]
    fn test_parse_time_accepts_form_input() {
        let parsed = parse_time("2025-03-01T08:30").unwrap();
        assert_eq!(parsed.to_string(), "2025-03-01 08:30:00");
        assert!(parse_time("tomorrow").is_err());
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
