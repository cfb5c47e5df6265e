use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// A place returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub location: Location,
    #[serde(rename = "formatted_address")]
    pub address: String,
}

/// Coordinates are kept as the provider spells them, so they can be put back
/// into a URL unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(deserialize_with = "string_or_number")]
    pub lng: String,
    #[serde(deserialize_with = "string_or_number")]
    pub lat: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeWeather {
    pub skycon: String,
    pub temperature: f64,
    pub air_quality: AirQuality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    pub aqi: Aqi,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aqi {
    pub chn: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub temperature: Vec<Temperature>,
    pub skycon: Vec<Skycon>,
    pub life_index: LifeIndex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub max: f64,
    pub min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skycon {
    pub value: String,
    #[serde(deserialize_with = "provider_datetime")]
    pub date: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeIndex {
    pub cold_risk: Vec<LifeDescription>,
    pub car_washing: Vec<LifeDescription>,
    pub ultraviolet: Vec<LifeDescription>,
    pub dressing: Vec<LifeDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeDescription {
    pub desc: String,
}

/// Realtime conditions and the daily forecast for one place.
///
/// Only ever built from two successful responses; there is no partially
/// filled `Weather`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub realtime: RealtimeWeather,
    pub daily: DailyForecast,
}

/// One forecast row: the skycon and temperature entries at the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastDay<'a> {
    pub date: DateTime<FixedOffset>,
    pub skycon: &'a str,
    pub min: f64,
    pub max: f64,
}

/// Today's advisory texts (index 0 of each life index list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodayIndex<'a> {
    pub cold_risk: Option<&'a str>,
    pub car_washing: Option<&'a str>,
    pub ultraviolet: Option<&'a str>,
    pub dressing: Option<&'a str>,
}

impl DailyForecast {
    /// Pairs `skycon[i]` with `temperature[i]`; stops at the shorter list.
    pub fn days(&self) -> impl Iterator<Item = ForecastDay<'_>> {
        self.skycon
            .iter()
            .zip(&self.temperature)
            .map(|(sky, temp)| ForecastDay {
                date: sky.date,
                skycon: sky.value.as_str(),
                min: temp.min,
                max: temp.max,
            })
    }
}

impl LifeIndex {
    pub fn today(&self) -> TodayIndex<'_> {
        fn first(list: &[LifeDescription]) -> Option<&str> {
            list.first().map(|d| d.desc.as_str())
        }

        TodayIndex {
            cold_risk: first(&self.cold_risk),
            car_washing: first(&self.car_washing),
            ultraviolet: first(&self.ultraviolet),
            dressing: first(&self.dressing),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}

/// The daily endpoint sends `2019-10-20T00:00+08:00` (no seconds), which is
/// not RFC 3339. Both spellings are accepted.
fn provider_datetime<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .or_else(|_| DateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M%:z"))
        .map_err(|e| serde::de::Error::custom(format!("invalid date '{raw}': {e}")))
}
