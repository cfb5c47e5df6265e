//! Response envelopes of the remote API.
//!
//! Every endpoint wraps its payload in `{"status": "...", ...}`. A non-ok
//! envelope usually omits the payload and may carry an `error` string, so the
//! payload fields are optional here and checked when the envelope is opened.

use serde::{Deserialize, Serialize};

use crate::{
    error::{FetchError, FetchResult},
    model::{DailyForecast, Place, RealtimeWeather},
};

pub const STATUS_OK: &str = "ok";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResponse {
    pub status: String,
    #[serde(default)]
    pub places: Vec<Place>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<RealtimeResult>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeResult {
    pub realtime: RealtimeWeather,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<DailyResult>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyResult {
    pub daily: DailyForecast,
}

impl PlaceResponse {
    fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    pub fn into_places(self) -> FetchResult<Vec<Place>> {
        if self.is_ok() {
            Ok(self.places)
        } else {
            Err(FetchError::api_status(self.status, self.error))
        }
    }
}

impl RealtimeResponse {
    pub(crate) fn ok(realtime: RealtimeWeather) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            result: Some(RealtimeResult { realtime }),
            error: None,
        }
    }

    pub(crate) fn failed(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            result: None,
            error: None,
        }
    }

    fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    pub fn into_realtime(self) -> FetchResult<RealtimeWeather> {
        if !self.is_ok() {
            return Err(FetchError::api_status(self.status, self.error));
        }
        self.result
            .map(|r| r.realtime)
            .ok_or(FetchError::MissingPayload("result.realtime"))
    }
}

impl DailyResponse {
    pub(crate) fn ok(daily: DailyForecast) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            result: Some(DailyResult { daily }),
            error: None,
        }
    }

    pub(crate) fn failed(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            result: None,
            error: None,
        }
    }

    fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    pub fn into_daily(self) -> FetchResult<DailyForecast> {
        if !self.is_ok() {
            return Err(FetchError::api_status(self.status, self.error));
        }
        self.result
            .map(|r| r.daily)
            .ok_or(FetchError::MissingPayload("result.daily"))
    }
}
