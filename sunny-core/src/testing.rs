//! Scripted provider for unit tests.

use async_trait::async_trait;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use tokio::sync::{Barrier, Notify};

use crate::{
    error::{FetchError, FetchResult},
    model::{
        AirQuality, Aqi, DailyForecast, LifeDescription, LifeIndex, Location, Place,
        RealtimeWeather, Skycon, Temperature,
    },
    provider::WeatherProvider,
    response::{DailyResponse, PlaceResponse, RealtimeResponse},
};

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Status(&'static str),
    Fail,
    Panic,
}

#[derive(Debug)]
pub struct FakeProvider {
    pub places: Reply,
    pub realtime: Reply,
    pub daily: Reply,
    /// Both weather branches wait here before answering.
    pub barrier: Option<Arc<Barrier>>,
    /// Requests whose query or lng equals `gated` wait for `gate`.
    pub gated: Option<&'static str>,
    pub gate: Arc<Notify>,
    /// Skycon of realtime replies; the requested lng when unset.
    pub skycon: Option<&'static str>,
    pub realtime_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new(places: Reply, realtime: Reply, daily: Reply) -> Self {
        Self {
            places,
            realtime,
            daily,
            barrier: None,
            gated: None,
            gate: Arc::new(Notify::new()),
            skycon: None,
            realtime_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
        }
    }

    pub fn all_ok() -> Self {
        Self::new(Reply::Status("ok"), Reply::Status("ok"), Reply::Status("ok"))
    }

    async fn hold(&self, key: &str) {
        if self.gated == Some(key) {
            self.gate.notified().await;
        }
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn search_places(&self, query: &str) -> FetchResult<PlaceResponse> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.hold(query).await;

        match self.places {
            Reply::Status(status) => Ok(PlaceResponse {
                status: status.to_string(),
                places: vec![sample_place(query)],
                error: None,
            }),
            Reply::Fail => Err(FetchError::EmptyBody),
            Reply::Panic => panic!("search blew up"),
        }
    }

    async fn realtime_weather(&self, lng: &str, _lat: &str) -> FetchResult<RealtimeResponse> {
        self.realtime_calls.fetch_add(1, Ordering::SeqCst);
        self.hold(lng).await;
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        match self.realtime {
            Reply::Status("ok") => {
                let skycon = self.skycon.unwrap_or(lng);
                Ok(RealtimeResponse::ok(sample_realtime(skycon)))
            }
            Reply::Status(status) => Ok(RealtimeResponse::failed(status)),
            Reply::Fail => Err(FetchError::EmptyBody),
            Reply::Panic => panic!("realtime blew up"),
        }
    }

    async fn daily_weather(&self, _lng: &str, _lat: &str) -> FetchResult<DailyResponse> {
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        match self.daily {
            Reply::Status("ok") => Ok(DailyResponse::ok(sample_daily())),
            Reply::Status(status) => Ok(DailyResponse::failed(status)),
            Reply::Fail => Err(FetchError::EmptyBody),
            Reply::Panic => panic!("daily blew up"),
        }
    }
}

pub fn sample_place(name: &str) -> Place {
    Place {
        name: name.to_string(),
        location: Location {
            lng: "116.4073963".into(),
            lat: "39.9041999".into(),
        },
        address: format!("{name} address"),
    }
}

pub fn sample_realtime(skycon: &str) -> RealtimeWeather {
    RealtimeWeather {
        skycon: skycon.to_string(),
        temperature: 23.16,
        air_quality: AirQuality {
            aqi: Aqi { chn: 17.0 },
        },
    }
}

pub fn sample_daily() -> DailyForecast {
    let date = chrono::DateTime::parse_from_rfc3339("2019-10-20T00:00:00+08:00")
        .expect("fixture date");

    DailyForecast {
        temperature: vec![Temperature {
            max: 25.7,
            min: 20.3,
        }],
        skycon: vec![Skycon {
            value: "CLOUDY".into(),
            date,
        }],
        life_index: LifeIndex {
            cold_risk: vec![LifeDescription { desc: "易发".into() }],
            car_washing: vec![LifeDescription { desc: "适宜".into() }],
            ultraviolet: vec![LifeDescription { desc: "无".into() }],
            dressing: vec![LifeDescription { desc: "舒适".into() }],
        },
    }
}
