//! Aggregation layer between the gateway and the state holders.
//!
//! Every operation resolves exactly once with a [`FetchResult`]. The work runs
//! on a spawned task, so a panicking provider surfaces as
//! [`FetchError::Task`] instead of unwinding into the caller. Dropping the
//! returned future aborts the spawned work.

use std::{future::Future, sync::Arc};

use tokio::task::JoinError;
use tokio_util::task::AbortOnDropHandle;
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::{FetchError, FetchResult},
    model::{Place, Weather},
    provider::{CaiyunProvider, WeatherProvider},
    response::{DailyResponse, PlaceResponse, RealtimeResponse},
};

/// Stateless and cheap to clone; every call is independent.
#[derive(Debug, Clone)]
pub struct Repository {
    provider: Arc<dyn WeatherProvider>,
}

impl Repository {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Repository backed by the Caiyun gateway described by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(CaiyunProvider::new(config.api.clone())))
    }

    pub async fn search_places(&self, query: &str) -> FetchResult<Vec<Place>> {
        let provider = Arc::clone(&self.provider);
        let query = query.to_owned();

        let result = fire(async move {
            provider
                .search_places(&query)
                .await
                .and_then(PlaceResponse::into_places)
        })
        .await;

        match &result {
            Ok(places) => debug!(count = places.len(), "place search finished"),
            Err(err) => warn!(error = %err, "place search failed"),
        }
        result
    }

    /// Fetches realtime and daily weather concurrently and joins them.
    ///
    /// Succeeds only if both responses report status "ok". Otherwise the
    /// error describes the outcome of both branches.
    pub async fn refresh_weather(&self, lng: &str, lat: &str) -> FetchResult<Weather> {
        let provider = Arc::clone(&self.provider);

        let result = fire(fetch_weather(provider, lng.to_owned(), lat.to_owned())).await;

        if let Err(err) = &result {
            warn!(lng, lat, error = %err, "weather refresh failed");
        }
        result
    }
}

async fn fetch_weather(
    provider: Arc<dyn WeatherProvider>,
    lng: String,
    lat: String,
) -> FetchResult<Weather> {
    let realtime = AbortOnDropHandle::new(tokio::spawn({
        let provider = Arc::clone(&provider);
        let (lng, lat) = (lng.clone(), lat.clone());
        async move { provider.realtime_weather(&lng, &lat).await }
    }));
    let daily = AbortOnDropHandle::new(tokio::spawn(async move {
        provider.daily_weather(&lng, &lat).await
    }));

    let (realtime, daily) = tokio::join!(realtime, daily);

    combine(flatten(realtime), flatten(daily))
}

fn combine(
    realtime: FetchResult<RealtimeResponse>,
    daily: FetchResult<DailyResponse>,
) -> FetchResult<Weather> {
    let realtime = realtime.and_then(RealtimeResponse::into_realtime);
    let daily = daily.and_then(DailyResponse::into_daily);

    match (realtime, daily) {
        (Ok(realtime), Ok(daily)) => Ok(Weather { realtime, daily }),
        (realtime, daily) => Err(FetchError::Weather {
            realtime: outcome(&realtime),
            daily: outcome(&daily),
        }),
    }
}

fn outcome<T>(branch: &FetchResult<T>) -> String {
    match branch {
        Ok(_) => "status is ok".to_string(),
        Err(FetchError::ApiStatus { status, .. }) => format!("status is {status}"),
        Err(err) => format!("failed: {err}"),
    }
}

fn flatten<T>(joined: Result<FetchResult<T>, JoinError>) -> FetchResult<T> {
    joined.unwrap_or_else(|err| Err(err.into()))
}

/// Runs `body` on its own task and folds a panic or abort into the result.
async fn fire<T, F>(body: F) -> FetchResult<T>
where
    F: Future<Output = FetchResult<T>> + Send + 'static,
    T: Send + 'static,
{
    flatten(AbortOnDropHandle::new(tokio::spawn(body)).await)
}
