use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for a city, metric units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: f64,
    /// Meters. Not every station reports it.
    pub visibility_m: Option<u32>,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

/// One 3-hour forecast sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub temperature_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

/// Forecast samples for one calendar day.
///
/// `condition`, `humidity_pct` and `wind_speed_mps` come from the first sample of the day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub temperatures_c: Vec<f64>,
}

impl DailyForecast {
    pub fn min_temperature(&self) -> f64 {
        self.temperatures_c.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max_temperature(&self) -> f64 {
        self.temperatures_c.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}
