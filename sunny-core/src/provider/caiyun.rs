use async_trait::async_trait;
use tracing::debug;

use crate::{
    config::ApiConfig,
    error::FetchResult,
    response::{DailyResponse, PlaceResponse, RealtimeResponse},
    transport::HttpTransport,
};

use super::WeatherProvider;

/// Gateway to the Caiyun weather API.
///
/// Place search: `{base}v2/place?query=..&token=..&lang=..`
/// Weather:      `{base}v2.5/{token}/{lng},{lat}/{realtime,daily}.json?lang=..`
#[derive(Debug, Clone)]
pub struct CaiyunProvider {
    api: ApiConfig,
    transport: HttpTransport,
}

impl CaiyunProvider {
    pub fn new(api: ApiConfig) -> Self {
        Self {
            api,
            transport: HttpTransport::new(),
        }
    }

    pub fn place_url(&self) -> String {
        format!("{}v2/place", self.api.base())
    }

    /// Coordinates go in the path as `{lng},{lat}`.
    pub fn weather_url(&self, lng: &str, lat: &str, kind: &str) -> String {
        format!(
            "{}v2.5/{}/{},{}/{}.json",
            self.api.base(),
            self.api.token,
            lng,
            lat,
            kind
        )
    }
}

#[async_trait]
impl WeatherProvider for CaiyunProvider {
    async fn search_places(&self, query: &str) -> FetchResult<PlaceResponse> {
        debug!(query, "searching places");

        self.transport
            .get_json(
                &self.place_url(),
                &[
                    ("query", query),
                    ("token", self.api.token.as_str()),
                    ("lang", self.api.lang.as_str()),
                ],
            )
            .await
    }

    async fn realtime_weather(&self, lng: &str, lat: &str) -> FetchResult<RealtimeResponse> {
        debug!(lng, lat, "fetching realtime weather");

        self.transport
            .get_json(
                &self.weather_url(lng, lat, "realtime"),
                &[("lang", self.api.lang.as_str())],
            )
            .await
    }

    async fn daily_weather(&self, lng: &str, lat: &str) -> FetchResult<DailyResponse> {
        debug!(lng, lat, "fetching daily weather");

        self.transport
            .get_json(
                &self.weather_url(lng, lat, "daily"),
                &[("lang", self.api.lang.as_str())],
            )
            .await
    }
}
