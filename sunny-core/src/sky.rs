//! Display text and icon names for the provider's skycon codes.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sky {
    pub info: &'static str,
    pub icon: &'static str,
}

const fn sky_of(info: &'static str, icon: &'static str) -> Sky {
    Sky { info, icon }
}

/// Unknown codes fall back to clear day.
pub fn sky(code: &str) -> Sky {
    match code {
        "CLEAR_DAY" => sky_of("Clear", "clear_day"),
        "CLEAR_NIGHT" => sky_of("Clear", "clear_night"),
        "PARTLY_CLOUDY_DAY" => sky_of("Partly cloudy", "partly_cloud_day"),
        "PARTLY_CLOUDY_NIGHT" => sky_of("Partly cloudy", "partly_cloud_night"),
        "CLOUDY" => sky_of("Cloudy", "cloudy"),
        "WIND" => sky_of("Windy", "cloudy"),
        "LIGHT_RAIN" => sky_of("Light rain", "light_rain"),
        "MODERATE_RAIN" => sky_of("Moderate rain", "moderate_rain"),
        "HEAVY_RAIN" => sky_of("Heavy rain", "heavy_rain"),
        "STORM_RAIN" => sky_of("Rainstorm", "storm_rain"),
        "THUNDER_SHOWER" => sky_of("Thunder shower", "thunder_shower"),
        "SLEET" => sky_of("Sleet", "sleet"),
        "LIGHT_SNOW" => sky_of("Light snow", "light_snow"),
        "MODERATE_SNOW" => sky_of("Moderate snow", "moderate_snow"),
        "HEAVY_SNOW" => sky_of("Heavy snow", "heavy_snow"),
        "STORM_SNOW" => sky_of("Snowstorm", "heavy_snow"),
        "HAIL" => sky_of("Hail", "hail"),
        "LIGHT_HAZE" => sky_of("Light haze", "light_haze"),
        "MODERATE_HAZE" => sky_of("Moderate haze", "moderate_haze"),
        "HEAVY_HAZE" => sky_of("Heavy haze", "heavy_haze"),
        "FOG" => sky_of("Fog", "fog"),
        "DUST" => sky_of("Dust", "fog"),
        "SAND" => sky_of("Sand", "fog"),
        _ => sky_of("Clear", "clear_day"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(sky("CLOUDY").info, "Cloudy");
        assert_eq!(sky("WIND").info, "Windy");
        assert_eq!(sky("STORM_RAIN").icon, "storm_rain");
    }

    #[test]
    fn unknown_code_falls_back_to_clear_day() {
        assert_eq!(sky("VOLCANIC_ASH"), sky("CLEAR_DAY"));
    }
}
