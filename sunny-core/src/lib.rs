//! Core library for the `sunny` weather app.
//!
//! This crate defines:
//! - Configuration (provider token, locale, base URL)
//! - The transport and the Caiyun gateway behind the `WeatherProvider` trait
//! - The repository that joins realtime and daily weather into one `Weather`
//! - Latest-wins request state for the place and weather screens
//! - The single-record store for the selected place
//!
//! It is used by `sunny-cli`, but any other front end can drive it the same way.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod repository;
pub mod response;
pub mod sky;
pub mod state;
pub mod store;
pub mod transport;

#[cfg(test)]
mod testing;

pub use config::{ApiConfig, Config};
pub use error::{FetchError, FetchResult};
pub use model::{DailyForecast, Location, Place, RealtimeWeather, Weather};
pub use provider::{CaiyunProvider, WeatherProvider};
pub use repository::Repository;
pub use state::{LatestSlot, PlaceState, WeatherState};
pub use store::PlaceStore;
