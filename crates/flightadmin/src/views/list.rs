//! Entity list pages.

use std::fmt::Debug;

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{Aircraft, Airline, Flight, Id, Pilot};
use crate::services::Client;

/// An entity that has a list page.
#[async_trait::async_trait]
pub trait Listed: Sized + Send + Sync + Debug {
    /// What narrows the list. `()` for entities that are always listed whole.
    type Scope: Copy + Default + Send + Sync + Debug;

    /// Plural noun used in messages ("airlines").
    const PLURAL: &'static str;

    /// Singular noun used in messages ("airline").
    const SINGULAR: &'static str;

    /// One-line description for plain output.
    fn summary(&self) -> String;

    /// Fetch the entities in `scope`.
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    async fn fetch(client: &Client, scope: Self::Scope) -> Result<Vec<Self>>;

    /// Delete the entity with `id`.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    async fn delete(client: &Client, id: Id) -> Result<()>;
}

/// Where a list page is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    /// Fetch in flight.
    Loading,
    /// Items are current.
    Ready,
    /// The last fetch or delete failed.
    Failed(String),
}

/// A list page over `E`.
#[derive(Debug)]
pub struct ListView<E: Listed> {
    client: Client,
    scope: E::Scope,
    state: ListState,
    items: Vec<E>,
}

impl<E: Listed> ListView<E> {
    /// An unloaded list over the default scope.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::scoped(client, E::Scope::default())
    }

    /// An unloaded list over `scope`.
    #[must_use]
    pub fn scoped(client: Client, scope: E::Scope) -> Self {
        Self {
            client,
            scope,
            state: ListState::Loading,
            items: Vec::new(),
        }
    }

    /// Create over the default scope and load.
    pub async fn open(client: Client) -> Self {
        let mut view = Self::new(client);
        view.load().await;
        view
    }

    /// Fetch the items. On failure the list is emptied.
    pub async fn load(&mut self) {
        self.state = ListState::Loading;
        match E::fetch(&self.client, self.scope).await {
            Ok(items) => {
                debug!("Loaded {} {}", items.len(), E::PLURAL);
                self.items = items;
                self.state = ListState::Ready;
            }
            Err(e) => {
                warn!("Failed to fetch {}: {e}", E::PLURAL);
                self.items.clear();
                self.state = ListState::Failed(format!(
                    "Failed to fetch {}, please try again later.",
                    E::PLURAL
                ));
            }
        }
    }

    /// Delete `id`, then fetch the list again.
    ///
    /// On failure nothing is refetched and the items stay as they were.
    /// Returns whether the delete went through.
    pub async fn delete(&mut self, id: Id) -> bool {
        match E::delete(&self.client, id).await {
            Ok(()) => {
                debug!("Deleted {} {id}", E::SINGULAR);
                self.load().await;
                true
            }
            Err(e) => {
                warn!("Failed to delete {} {id}: {e}", E::SINGULAR);
                self.state = ListState::Failed(format!(
                    "Failed to delete {}, please try again later.",
                    E::SINGULAR
                ));
                false
            }
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Items from the last successful fetch.
    #[must_use]
    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// The failure message, if the view is in an error state.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ListState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[async_trait::async_trait]
impl Listed for Airline {
    type Scope = ();
    const PLURAL: &'static str = "airlines";
    const SINGULAR: &'static str = "airline";

    fn summary(&self) -> String {
        format!(
            "{}  {} (founded {}, {})",
            self.id, self.name, self.year_founded, self.headquarters
        )
    }

    async fn fetch(client: &Client, _scope: ()) -> Result<Vec<Self>> {
        client.airlines().list_all().await
    }

    async fn delete(client: &Client, id: Id) -> Result<()> {
        client.airlines().delete_by_id(id).await
    }
}

#[async_trait::async_trait]
impl Listed for Aircraft {
    type Scope = ();
    const PLURAL: &'static str = "aircrafts";
    const SINGULAR: &'static str = "aircraft";

    fn summary(&self) -> String {
        format!(
            "{}  {} {} ({}), {} seats, airline {}",
            self.id,
            self.manufacturer,
            self.model,
            self.manufacture_year,
            self.capacity,
            self.airline_id
        )
    }

    async fn fetch(client: &Client, _scope: ()) -> Result<Vec<Self>> {
        client.aircraft().list_all().await
    }

    async fn delete(client: &Client, id: Id) -> Result<()> {
        client.aircraft().delete_by_id(id).await
    }
}

#[async_trait::async_trait]
impl Listed for Pilot {
    type Scope = ();
    const PLURAL: &'static str = "pilots";
    const SINGULAR: &'static str = "pilot";

    fn summary(&self) -> String {
        let nickname = self
            .nickname
            .as_deref()
            .map(|n| format!(" \"{n}\""))
            .unwrap_or_default();
        let airline = self
            .airline_id
            .map_or_else(|| "unaffiliated".to_string(), |id| format!("airline {id}"));
        format!("{}  {}{nickname}, {airline}", self.pilot_id, self.full_name())
    }

    async fn fetch(client: &Client, _scope: ()) -> Result<Vec<Self>> {
        client.pilots().list_all().await
    }

    async fn delete(client: &Client, id: Id) -> Result<()> {
        client.pilots().delete_by_id(id).await
    }
}

/// Which flights a flight list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlightScope {
    /// Every flight.
    #[default]
    All,
    /// Flights flown by a pilot.
    Pilot(Id),
    /// Flights operated with an aircraft.
    Aircraft(Id),
}

#[async_trait::async_trait]
impl Listed for Flight {
    type Scope = FlightScope;
    const PLURAL: &'static str = "flights";
    const SINGULAR: &'static str = "flight";

    fn summary(&self) -> String {
        format!(
            "{}  {} -> {}  {} - {}  {} pax, aircraft {}, pilot {}",
            self.id,
            self.destination_from,
            self.destination_to,
            self.departure_time.format("%Y-%m-%d %H:%M"),
            self.arrival_time.format("%Y-%m-%d %H:%M"),
            self.occupancy,
            self.aircraft_id,
            self.pilot_id
        )
    }

    async fn fetch(client: &Client, scope: FlightScope) -> Result<Vec<Self>> {
        match scope {
            FlightScope::All => client.flights().list_all().await,
            FlightScope::Pilot(id) => client.flights().list_by_pilot(id).await,
            FlightScope::Aircraft(id) => client.flights().list_by_aircraft(id).await,
        }
    }

    async fn delete(client: &Client, id: Id) -> Result<()> {
        client.flights().delete_by_id(id).await
    }
}
