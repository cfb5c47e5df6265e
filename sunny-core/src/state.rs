//! Per-screen request state with latest-wins publication.
//!
//! Each request issued through a [`LatestSlot`] gets a generation number and a
//! cancellation token. Issuing a newer request cancels the older token, which
//! drops the in-flight repository future (and aborts its tasks). A result is
//! published only while its generation is still the latest one.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    error::FetchResult,
    model::{Place, Weather},
    repository::Repository,
    store::PlaceStore,
};

/// Latest published outcome, shared with every observer.
pub type Published<T> = Option<Arc<FetchResult<T>>>;

/// Handle for one issued request.
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    token: CancellationToken,
}

impl Ticket {
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Debug)]
struct Latest {
    generation: u64,
    token: CancellationToken,
}

/// Observable slot holding the outcome of the most recent request.
#[derive(Debug)]
pub struct LatestSlot<T> {
    latest: Mutex<Latest>,
    tx: watch::Sender<Published<T>>,
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestSlot<T> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            latest: Mutex::new(Latest {
                generation: 0,
                token: CancellationToken::new(),
            }),
            tx,
        }
    }

    /// Starts a new request and cancels the previous one.
    pub fn issue(&self) -> Ticket {
        let mut latest = self.latest.lock();
        latest.token.cancel();
        latest.generation += 1;
        latest.token = CancellationToken::new();

        Ticket {
            generation: latest.generation,
            token: latest.token.clone(),
        }
    }

    /// Publishes `result` if `ticket` is still the latest request.
    pub fn publish(&self, ticket: &Ticket, result: FetchResult<T>) -> bool {
        let latest = self.latest.lock();
        if latest.generation != ticket.generation {
            debug!(
                generation = ticket.generation,
                latest = latest.generation,
                "dropping stale result"
            );
            return false;
        }
        self.tx.send_replace(Some(Arc::new(result)));
        true
    }

    /// Issues a request, runs `fut` until it completes or is superseded, and
    /// publishes its result. Returns whether the result was published.
    pub async fn run<F>(&self, fut: F) -> bool
    where
        F: Future<Output = FetchResult<T>>,
    {
        let ticket = self.issue();

        tokio::select! {
            _ = ticket.token.cancelled() => {
                debug!(generation = ticket.generation, "request superseded");
                false
            }
            result = fut => self.publish(&ticket, result),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Published<T>> {
        self.tx.subscribe()
    }

    pub fn latest(&self) -> Published<T> {
        self.tx.borrow().clone()
    }

    pub fn generation(&self) -> u64 {
        self.latest.lock().generation
    }
}

/// State behind the place search screen.
#[derive(Debug)]
pub struct PlaceState {
    repository: Repository,
    store: PlaceStore,
    query: Mutex<String>,
    places: Mutex<Vec<Place>>,
    slot: LatestSlot<Vec<Place>>,
}

impl PlaceState {
    pub fn new(repository: Repository, store: PlaceStore) -> Self {
        Self {
            repository,
            store,
            query: Mutex::new(String::new()),
            places: Mutex::new(Vec::new()),
            slot: LatestSlot::new(),
        }
    }

    /// Searches for `query`; a newer search supersedes this one.
    pub async fn search_places(&self, query: &str) -> bool {
        *self.query.lock() = query.to_owned();

        let published = self.slot.run(self.repository.search_places(query)).await;

        if published
            && let Some(result) = self.slot.latest()
            && let Ok(places) = result.as_ref()
        {
            *self.places.lock() = places.clone();
        }
        published
    }

    pub fn query(&self) -> String {
        self.query.lock().clone()
    }

    /// Places from the last successful search.
    pub fn places(&self) -> Vec<Place> {
        self.places.lock().clone()
    }

    pub fn results(&self) -> &LatestSlot<Vec<Place>> {
        &self.slot
    }

    pub fn save_place(&self, place: &Place) -> Result<()> {
        self.store.save(place)
    }

    pub fn saved_place(&self) -> Result<Place> {
        self.store.load()
    }

    pub fn is_place_saved(&self) -> bool {
        self.store.exists()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Selection {
    place_name: String,
    lng: String,
    lat: String,
}

/// State behind the weather screen.
#[derive(Debug)]
pub struct WeatherState {
    repository: Repository,
    selection: Mutex<Selection>,
    slot: LatestSlot<Weather>,
}

impl WeatherState {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            selection: Mutex::new(Selection::default()),
            slot: LatestSlot::new(),
        }
    }

    pub fn select_place(&self, place: &Place) {
        *self.selection.lock() = Selection {
            place_name: place.name.clone(),
            lng: place.location.lng.clone(),
            lat: place.location.lat.clone(),
        };
    }

    pub fn place_name(&self) -> String {
        self.selection.lock().place_name.clone()
    }

    pub fn coordinates(&self) -> (String, String) {
        let selection = self.selection.lock();
        (selection.lng.clone(), selection.lat.clone())
    }

    /// Refreshes weather for the selected place.
    pub async fn refresh_weather(&self) -> bool {
        let (lng, lat) = self.coordinates();
        self.refresh_weather_at(&lng, &lat).await
    }

    /// Always hits the network, even for the coordinates of the last refresh.
    pub async fn refresh_weather_at(&self, lng: &str, lat: &str) -> bool {
        self.slot
            .run(self.repository.refresh_weather(lng, lat))
            .await
    }

    pub fn weather(&self) -> &LatestSlot<Weather> {
        &self.slot
    }
}
