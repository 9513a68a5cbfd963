//! Grouping of 3-hour forecast samples into calendar days.

use chrono::{Local, TimeZone};

use crate::model::{DailyForecast, ForecastEntry};

/// Number of days shown for a forecast.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Group `entries` by local calendar date. See [`group_by_day_in`].
pub fn group_by_day(entries: &[ForecastEntry]) -> Vec<DailyForecast> {
    group_by_day_in(entries, &Local)
}

/// Group `entries` by calendar date in `tz`, keeping the first
/// [`MAX_FORECAST_DAYS`] days in the order they first appear.
///
/// Entries are not sorted: the API returns them chronologically, and a day that
/// first shows up after five other days is dropped even if it has more samples.
pub fn group_by_day_in<Tz: TimeZone>(entries: &[ForecastEntry], tz: &Tz) -> Vec<DailyForecast> {
    let mut days: Vec<DailyForecast> = Vec::new();

    for entry in entries {
        let date = entry.time.with_timezone(tz).date_naive();

        match days.iter_mut().find(|day| day.date == date) {
            Some(day) => day.temperatures_c.push(entry.temperature_c),
            None => days.push(DailyForecast {
                date,
                condition: entry.condition.clone(),
                humidity_pct: entry.humidity_pct,
                wind_speed_mps: entry.wind_speed_mps,
                temperatures_c: vec![entry.temperature_c],
            }),
        }
    }

    days.truncate(MAX_FORECAST_DAYS);
    days
}
