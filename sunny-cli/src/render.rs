//! Plain-text rendering of places and weather.

use chrono::{DateTime, FixedOffset};
use sunny_core::{Place, Weather, sky::sky};

pub fn place_line(place: &Place) -> String {
    if place.address.is_empty() {
        place.name.clone()
    } else {
        format!("{} ({})", place.name, place.address)
    }
}

fn date_label(date: &DateTime<FixedOffset>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Temperatures and AQI are cut to whole numbers for display.
pub fn weather(place_name: &str, weather: &Weather) -> String {
    let realtime = &weather.realtime;
    let mut lines = vec![
        place_name.to_string(),
        format!(
            "  {} ℃  {}  AQI {}",
            realtime.temperature as i64,
            sky(&realtime.skycon).info,
            realtime.air_quality.aqi.chn as i64
        ),
        "Forecast".to_string(),
    ];

    lines.extend(weather.daily.days().map(|day| {
        format!(
            "  {}  {:<14}{} ~ {} ℃",
            date_label(&day.date),
            sky(day.skycon).info,
            day.min as i64,
            day.max as i64
        )
    }));

    let today = weather.daily.life_index.today();
    lines.push("Life index".to_string());
    lines.extend(
        [
            ("Cold risk", today.cold_risk),
            ("Dressing", today.dressing),
            ("Ultraviolet", today.ultraviolet),
            ("Car washing", today.car_washing),
        ]
        .into_iter()
        .map(|(label, text)| format!("  {label}: {}", text.unwrap_or("-"))),
    );

    lines.join("\n") + "\n"
}
