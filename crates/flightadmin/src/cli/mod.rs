//! Command-line interface for flightadmin.
//!
//! This module provides the CLI structure for the `flightadm` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AircraftCommand, AirlineCommand, ConfigCommand, FlightCommand, FlightCreateCommand,
    FlightEditCommand, FormatArg, OpenCommand, PilotCommand, PilotUpdateCommand,
};

/// flightadm - Administer airlines, aircraft, pilots, and flights
///
/// Talks to a flight-operations backend over its REST API. Rendered output
/// goes to stdout, logs to stderr.
#[derive(Debug, Parser)]
#[command(name = "flightadm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Backend base URL, overriding the configuration
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Output format (defaults to the configured one)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<FormatArg>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage airlines
    #[command(subcommand)]
    Airlines(AirlineCommand),

    /// Manage aircraft
    #[command(subcommand)]
    Aircraft(AircraftCommand),

    /// Manage pilots
    #[command(subcommand)]
    Pilots(PilotCommand),

    /// Manage flights
    #[command(subcommand)]
    Flights(FlightCommand),

    /// Render the page at a path
    Open(OpenCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "flightadm");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(
            parse(&["flightadm", "-q", "airlines", "list"]).verbosity(),
            Verbosity::Quiet
        );
        assert_eq!(
            parse(&["flightadm", "airlines", "list"]).verbosity(),
            Verbosity::Normal
        );
        assert_eq!(
            parse(&["flightadm", "-v", "airlines", "list"]).verbosity(),
            Verbosity::Verbose
        );
        assert_eq!(
            parse(&["flightadm", "-vv", "airlines", "list"]).verbosity(),
            Verbosity::Trace
        );
    }

    #[test]
    fn test_parse_global_overrides() {
        let cli = parse(&[
            "flightadm",
            "pilots",
            "list",
            "--base-url",
            "http://ops:9000",
            "-f",
            "json",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("http://ops:9000"));
        assert_eq!(cli.format, Some(FormatArg::Json));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["flightadm", "-c", "/custom/config.toml", "config", "path"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_flight_create() {
        let cli = parse(&[
            "flightadm",
            "flights",
            "create",
            "--airline",
            "1",
            "--aircraft",
            "2",
            "--pilot",
            "3",
            "--from",
            "Prague",
            "--to",
            "Vienna",
            "--departure",
            "2025-03-01T08:00",
            "--arrival",
            "2025-03-01 09:15",
            "--occupancy",
            "-5",
        ]);
        let Command::Flights(FlightCommand::Create(args)) = cli.command else {
            panic!("expected flights create");
        };
        assert_eq!(args.pilot, 3);
        assert_eq!(args.occupancy, -5);
        assert!(args.arrival > args.departure);
    }

    #[test]
    fn test_parse_flight_edit_partial() {
        let cli = parse(&["flightadm", "flights", "edit", "4", "--pilot", "9"]);
        let Command::Flights(FlightCommand::Edit(args)) = cli.command else {
            panic!("expected flights edit");
        };
        assert_eq!(args.id, 4);
        assert_eq!(args.pilot, Some(9));
        assert!(args.from.is_none());
        assert!(args.occupancy.is_none());
    }

    #[test]
    fn test_parse_flight_list_filters_conflict() {
        assert!(Cli::try_parse_from([
            "flightadm",
            "flights",
            "list",
            "--pilot",
            "1",
            "--aircraft",
            "2"
        ])
        .is_err());
    }

    #[test]
    fn test_parse_bad_departure() {
        assert!(Cli::try_parse_from([
            "flightadm",
            "flights",
            "edit",
            "1",
            "--departure",
            "soon"
        ])
        .is_err());
    }

    #[test]
    fn test_parse_delete_yes() {
        let cli = parse(&["flightadm", "flights", "delete", "8", "--yes"]);
        assert!(matches!(
            cli.command,
            Command::Flights(FlightCommand::Delete { id: 8, yes: true })
        ));
    }

    #[test]
    fn test_parse_open() {
        let cli = parse(&["flightadm", "open", "/airlines/2"]);
        let Command::Open(open) = cli.command else {
            panic!("expected open");
        };
        assert_eq!(open.path, "/airlines/2");
    }

    #[test]
    fn test_parse_pilot_date_of_birth() {
        let cli = parse(&[
            "flightadm",
            "pilots",
            "create",
            "--first-name",
            "Jan",
            "--last-name",
            "Novak",
            "--date-of-birth",
            "1980-05-17",
        ]);
        assert!(matches!(
            cli.command,
            Command::Pilots(PilotCommand::Create { airline: None, .. })
        ));
    }
}
