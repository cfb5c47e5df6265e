use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::FetchResult,
    response::{DailyResponse, PlaceResponse, RealtimeResponse},
};

pub mod caiyun;

pub use caiyun::CaiyunProvider;

/// The three remote operations the app consumes.
///
/// Each call performs exactly one request. Implementations return the raw
/// envelope; mapping the `status` field is left to the caller.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn search_places(&self, query: &str) -> FetchResult<PlaceResponse>;

    async fn realtime_weather(&self, lng: &str, lat: &str) -> FetchResult<RealtimeResponse>;

    async fn daily_weather(&self, lng: &str, lat: &str) -> FetchResult<DailyResponse>;
}
