//! `flightadm` - CLI for flightadmin
//!
//! This binary renders the administration pages of a flight-operations backend
//! as terminal output, and drives its create, edit, and delete actions.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use serde_json::json;

use flightadmin::cli::{
    AircraftCommand, AirlineCommand, Cli, Command, ConfigCommand, FlightCommand,
    FlightCreateCommand, FlightEditCommand, PilotCommand, PilotUpdateCommand,
};
use flightadmin::config::OutputFormat;
use flightadmin::model::{Aircraft, Airline, Flight, Id, NewPilot, Pilot};
use flightadmin::views::{
    AircraftDetail, AircraftForm, AirlineDetail, AirlineForm, FlightForm, FlightScope, ListView,
    Listed, PilotDetail, PilotForm,
};
use flightadmin::workflow::{FlightContext, FlightEditor, Phase, SaveOutcome};
use flightadmin::{init_logging, Client, Config, HttpGateway, Route};

/// How a command ended, as far as the exit status is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Ok,
    Failed,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration, then apply command-line overrides
    let mut config = Config::load_from(cli.config.clone())?;
    if let Some(base_url) = cli.base_url.clone() {
        config = config.with_base_url(base_url)?;
    }
    let out = Printer {
        format: cli.format.map_or(config.output.format, OutputFormat::from),
    };

    if let Command::Config(config_cmd) = cli.command {
        handle_config(&config, config_cmd)?;
        return Ok(ExitCode::SUCCESS);
    }

    let gateway = HttpGateway::new(&config.api)?;
    let client = Client::new(Arc::new(gateway));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    // Execute the command
    let status = runtime.block_on(async {
        match cli.command {
            Command::Airlines(cmd) => handle_airlines(&client, &out, cmd).await,
            Command::Aircraft(cmd) => handle_aircraft(&client, &out, cmd).await,
            Command::Pilots(cmd) => handle_pilots(&client, &out, cmd).await,
            Command::Flights(cmd) => handle_flights(&client, &out, cmd).await,
            Command::Open(open) => handle_open(&client, &out, &open.path).await,
            Command::Config(_) => Ok(Status::Ok),
        }
    })?;

    Ok(match status {
        Status::Ok => ExitCode::SUCCESS,
        Status::Failed => ExitCode::FAILURE,
    })
}

/// Renders results as plain text or JSON on stdout.
#[derive(Debug, Clone, Copy)]
struct Printer {
    format: OutputFormat,
}

impl Printer {
    fn show<T: Serialize>(&self, value: &T, plain: impl FnOnce()) -> anyhow::Result<Status> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Plain => plain(),
        }
        Ok(Status::Ok)
    }

    fn error(&self, message: &str) -> anyhow::Result<Status> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&json!({ "error": message }))?);
            }
            OutputFormat::Plain => eprintln!("{message}"),
        }
        Ok(Status::Failed)
    }

    fn navigated(&self, message: &str, route: Route) -> anyhow::Result<Status> {
        self.show(
            &json!({ "message": message, "next": route.to_string() }),
            || println!("{message} ({route})"),
        )
    }

    fn list<E: Listed + Serialize>(&self, view: &ListView<E>) -> anyhow::Result<Status> {
        if let Some(message) = view.error() {
            return self.error(message);
        }
        self.show(&view.items(), || {
            if view.items().is_empty() {
                println!("No {} found.", E::PLURAL);
            }
            for item in view.items() {
                println!("{}", item.summary());
            }
        })
    }
}

async fn show_list<E: Listed + Serialize>(
    client: &Client,
    out: &Printer,
    scope: E::Scope,
) -> anyhow::Result<Status> {
    let mut view = ListView::<E>::scoped(client.clone(), scope);
    view.load().await;
    out.list(&view)
}

async fn delete_from_list<E: Listed + Serialize>(
    client: &Client,
    out: &Printer,
    id: Id,
) -> anyhow::Result<Status> {
    let mut view = ListView::<E>::new(client.clone());
    view.delete(id).await;
    out.list(&view)
}

async fn handle_airlines(
    client: &Client,
    out: &Printer,
    cmd: AirlineCommand,
) -> anyhow::Result<Status> {
    match cmd {
        AirlineCommand::List => show_list::<Airline>(client, out, ()).await,
        AirlineCommand::Show { id } => show_airline(client, out, id).await,
        AirlineCommand::Create {
            name,
            year_founded,
            headquarters,
        } => {
            let mut form = AirlineForm::new(name, Some(year_founded), headquarters);
            match form.submit(client).await {
                Some(route) => out.navigated("Airline created.", route),
                None => out.error(form.error().unwrap_or("Failed to create airline.")),
            }
        }
        AirlineCommand::Delete { id } => delete_from_list::<Airline>(client, out, id).await,
    }
}

async fn show_airline(client: &Client, out: &Printer, id: Id) -> anyhow::Result<Status> {
    match AirlineDetail::load(client, id).await {
        Ok(detail) => out.show(&detail, || {
            let a = &detail.airline;
            println!("{}", a.name);
            println!("  Founded:      {}", a.year_founded);
            println!("  Headquarters: {}", a.headquarters);
            println!();
            println!("Pilots ({})", detail.pilots.len());
            for pilot in &detail.pilots {
                println!("  {}", pilot.summary());
            }
            println!();
            println!("Aircraft ({})", detail.aircraft.len());
            for aircraft in &detail.aircraft {
                println!("  {}", aircraft.summary());
            }
        }),
        Err(message) => out.error(&message),
    }
}

async fn handle_aircraft(
    client: &Client,
    out: &Printer,
    cmd: AircraftCommand,
) -> anyhow::Result<Status> {
    match cmd {
        AircraftCommand::List => show_list::<Aircraft>(client, out, ()).await,
        AircraftCommand::Show { id } => show_aircraft(client, out, id).await,
        AircraftCommand::Create {
            model,
            manufacturer,
            year,
            capacity,
            weight,
            airline,
        } => {
            let mut form = AircraftForm::new(model, manufacturer);
            form.manufacture_year = Some(year);
            form.capacity = Some(capacity);
            form.weight = Some(weight);
            form.airline_id = Some(airline);
            match form.submit(client).await {
                Some(route) => out.navigated("Aircraft submitted.", route),
                None => out.error(form.error().unwrap_or("Failed to create aircraft.")),
            }
        }
        AircraftCommand::Delete { id } => delete_from_list::<Aircraft>(client, out, id).await,
    }
}

async fn show_aircraft(client: &Client, out: &Printer, id: Id) -> anyhow::Result<Status> {
    match AircraftDetail::load(client, id).await {
        Ok(detail) => out.show(&detail, || {
            let a = &detail.aircraft;
            println!("{} {}", a.manufacturer, a.model);
            println!("  Built:    {}", a.manufacture_year);
            println!("  Capacity: {}", a.capacity);
            println!("  Weight:   {} kg", a.weight);
            println!("  Airline:  {}", a.airline_id);
        }),
        Err(message) => out.error(&message),
    }
}

async fn handle_pilots(client: &Client, out: &Printer, cmd: PilotCommand) -> anyhow::Result<Status> {
    match cmd {
        PilotCommand::List => show_list::<Pilot>(client, out, ()).await,
        PilotCommand::Show { id } => show_pilot(client, out, id).await,
        PilotCommand::Create {
            first_name,
            last_name,
            nickname,
            date_of_birth,
            airline,
        } => {
            let mut form = PilotForm::new(first_name, last_name, Some(date_of_birth));
            form.nickname = nickname.unwrap_or_default();
            form.airline_id = airline;
            match form.submit(client).await {
                Some(route) => out.navigated("Pilot created.", route),
                None => out.error(form.error().unwrap_or("Failed to create pilot.")),
            }
        }
        PilotCommand::Update(args) => update_pilot(client, out, args).await,
        PilotCommand::Delete { id } => delete_from_list::<Pilot>(client, out, id).await,
    }
}

async fn show_pilot(client: &Client, out: &Printer, id: Id) -> anyhow::Result<Status> {
    match PilotDetail::load(client, id).await {
        Ok(detail) => out.show(&detail, || {
            let p = &detail.pilot;
            println!("{}", p.full_name());
            if let Some(nickname) = &p.nickname {
                println!("  Nickname:      {nickname}");
            }
            println!("  Date of birth: {}", p.date_of_birth);
            match &detail.airline {
                Some(airline) => println!("  Airline:       {} ({})", airline.name, airline.id),
                None => println!("  Airline:       none"),
            }
        }),
        Err(message) => out.error(&message),
    }
}

async fn update_pilot(
    client: &Client,
    out: &Printer,
    args: PilotUpdateCommand,
) -> anyhow::Result<Status> {
    let pilot = match PilotDetail::load(client, args.id).await {
        Ok(detail) => detail.pilot,
        Err(message) => return out.error(&message),
    };

    let mut update = NewPilot::from(&pilot);
    if let Some(first_name) = args.first_name {
        update.first_name = first_name;
    }
    if let Some(last_name) = args.last_name {
        update.last_name = last_name;
    }
    if let Some(nickname) = args.nickname {
        update.nickname = Some(nickname).filter(|n| !n.trim().is_empty());
    }
    if let Some(date_of_birth) = args.date_of_birth {
        update.date_of_birth = date_of_birth;
    }
    if let Some(airline) = args.airline {
        update.airline_id = Some(airline);
    }

    match client.pilots().update(args.id, &update).await {
        Ok(updated) => out.show(&updated, || println!("Updated {}", updated.summary())),
        Err(_) => out.error("Failed to update pilot. Please try again."),
    }
}

async fn handle_flights(
    client: &Client,
    out: &Printer,
    cmd: FlightCommand,
) -> anyhow::Result<Status> {
    match cmd {
        FlightCommand::List { pilot, aircraft } => {
            let scope = match (pilot, aircraft) {
                (Some(id), _) => FlightScope::Pilot(id),
                (None, Some(id)) => FlightScope::Aircraft(id),
                (None, None) => FlightScope::All,
            };
            show_list::<Flight>(client, out, scope).await
        }
        FlightCommand::Show { id } => {
            let editor = FlightEditor::open(client.clone(), id).await;
            show_flight(out, &editor)
        }
        FlightCommand::Create(args) => create_flight(client, out, args).await,
        FlightCommand::Edit(args) => edit_flight(client, out, args).await,
        FlightCommand::Delete { id, yes } => {
            let mut editor = FlightEditor::open(client.clone(), id).await;
            if let Phase::Errored(message) = editor.phase() {
                return out.error(message);
            }
            match editor.delete(|question| yes || confirm(question)).await {
                Some(route) => out.navigated(&format!("Flight {id} deleted."), route),
                None => match editor.page_error() {
                    Some(message) => out.error(message),
                    None => {
                        eprintln!("Cancelled.");
                        Ok(Status::Ok)
                    }
                },
            }
        }
    }
}

fn show_flight(out: &Printer, editor: &FlightEditor) -> anyhow::Result<Status> {
    if let Phase::Errored(message) = editor.phase() {
        return out.error(message);
    }
    let Some(FlightContext {
        flight,
        aircraft,
        airline,
        ..
    }) = editor.context()
    else {
        return out.error("Flight not loaded.");
    };
    out.show(
        &json!({ "flight": flight, "aircraft": aircraft, "airline": airline }),
        || {
            println!("Flight {}: {} -> {}", flight.id, flight.destination_from, flight.destination_to);
            println!("  Departure: {}", flight.departure_time.format("%Y-%m-%d %H:%M"));
            println!("  Arrival:   {}", flight.arrival_time.format("%Y-%m-%d %H:%M"));
            println!("  Occupancy: {}/{}", flight.occupancy, aircraft.capacity);
            println!("  Aircraft:  {} {} ({})", aircraft.manufacturer, aircraft.model, aircraft.id);
            println!("  Airline:   {} ({})", airline.name, airline.id);
            println!("  Pilot:     {}", flight.pilot_id);
        },
    )
}

async fn create_flight(
    client: &Client,
    out: &Printer,
    args: FlightCreateCommand,
) -> anyhow::Result<Status> {
    let mut form = FlightForm::open(client).await;
    if form.select_airline(client, args.airline).await.is_err() {
        return out.error(&format!(
            "Failed to fetch aircraft and pilots for airline {}.",
            args.airline
        ));
    }
    let picks = form
        .select_aircraft(args.aircraft)
        .and_then(|()| form.select_pilot(args.pilot));
    if let Err(e) = picks {
        return out.error(&e.to_string());
    }
    if let Err(e) = form.set_occupancy(args.occupancy) {
        return out.error(&e.to_string());
    }
    form.destination_from = args.from;
    form.destination_to = args.to;
    form.departure_time = Some(args.departure);
    form.arrival_time = Some(args.arrival);

    match form.submit(client).await {
        Some(route) => out.navigated("Flight created.", route),
        None => out.error(form.error().unwrap_or("Failed to create flight.")),
    }
}

async fn edit_flight(
    client: &Client,
    out: &Printer,
    args: FlightEditCommand,
) -> anyhow::Result<Status> {
    let mut editor = FlightEditor::open(client.clone(), args.id).await;
    if let Phase::Errored(message) = editor.phase() {
        return out.error(message);
    }
    editor.begin_edit()?;

    if let Err(e) = apply_edits(&mut editor, args) {
        return out.error(&e.to_string());
    }

    match editor.save().await? {
        SaveOutcome::Saved => show_flight(out, &editor),
        SaveOutcome::Rejected | SaveOutcome::Failed { .. } => {
            let errors = editor.field_errors();
            let messages: Vec<&str> = [
                editor.page_error(),
                errors.pilot.as_deref(),
                errors.aircraft.as_deref(),
            ]
            .into_iter()
            .flatten()
            .collect();
            out.error(&messages.join("\n"))
        }
    }
}

fn apply_edits(editor: &mut FlightEditor, args: FlightEditCommand) -> flightadmin::Result<()> {
    if let Some(from) = args.from {
        editor.set_destination_from(from)?;
    }
    if let Some(to) = args.to {
        editor.set_destination_to(to)?;
    }
    if let Some(departure) = args.departure {
        editor.set_departure_time(Some(departure))?;
    }
    if let Some(arrival) = args.arrival {
        editor.set_arrival_time(Some(arrival))?;
    }
    if let Some(pilot) = args.pilot {
        editor.select_pilot(pilot)?;
    }
    if let Some(aircraft) = args.aircraft {
        editor.select_aircraft(aircraft)?;
    }
    if let Some(occupancy) = args.occupancy {
        editor.set_occupancy(&occupancy)?;
    }
    Ok(())
}

async fn handle_open(client: &Client, out: &Printer, path: &str) -> anyhow::Result<Status> {
    let route: Route = path.parse()?;
    match route {
        Route::Home => out.show(&json!({ "pages": HOME_PAGES }), || {
            println!("Flight administration");
            for page in HOME_PAGES {
                println!("  {page}");
            }
        }),
        Route::Airlines => show_list::<Airline>(client, out, ()).await,
        Route::Aircrafts => show_list::<Aircraft>(client, out, ()).await,
        Route::Pilots => show_list::<Pilot>(client, out, ()).await,
        Route::Flights => show_list::<Flight>(client, out, FlightScope::All).await,
        Route::Airline(id) => show_airline(client, out, id).await,
        Route::Aircraft(id) => show_aircraft(client, out, id).await,
        Route::Pilot(id) => show_pilot(client, out, id).await,
        Route::Flight(id) => {
            let editor = FlightEditor::open(client.clone(), id).await;
            show_flight(out, &editor)
        }
        Route::CreateAirline => form_hint(out, route, "flightadm airlines create --help"),
        Route::CreateAircraft => form_hint(out, route, "flightadm aircraft create --help"),
        Route::CreatePilot => form_hint(out, route, "flightadm pilots create --help"),
        Route::CreateFlight => form_hint(out, route, "flightadm flights create --help"),
    }
}

const HOME_PAGES: [&str; 8] = [
    "/airlines",
    "/aircrafts",
    "/pilots",
    "/flights",
    "/create-airline",
    "/create-aircraft",
    "/create-pilot",
    "/create-flight",
];

fn form_hint(out: &Printer, route: Route, usage: &str) -> anyhow::Result<Status> {
    out.show(&json!({ "page": route.to_string(), "usage": usage }), || {
        println!("{route} is a form; see `{usage}`.");
    })
}

fn confirm(question: &str) -> bool {
    eprint!("{question} [y/N] ");
    let _ = io::stderr().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[API]");
                println!("  Base URL:   {}", config.api.base_url);
                println!("  User agent: {}", config.api.user_agent);
                println!();
                println!("[Output]");
                println!("  Format:     {:?}", config.output.format);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
