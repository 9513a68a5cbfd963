//! Human-readable text for weather reports and favorites.

use std::fmt::Display;

use chrono::{Local, TimeZone};
use weather_core::{CurrentWeather, DailyForecast, MAX_FORECAST_DAYS};

const DATE_FORMAT: &str = "%d.%m.%Y";
const TIME_FORMAT: &str = "%H:%M";

pub fn render_current(report: &CurrentWeather) -> String {
    render_current_in(report, &Local)
}

/// Current conditions block with sunrise/sunset shown in `tz`.
pub fn render_current_in<Tz>(report: &CurrentWeather, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let place = if report.country.is_empty() {
        report.city.clone()
    } else {
        format!("{}, {}", report.city, report.country)
    };

    let mut lines = vec![
        format!("Weather in {place}"),
        format!(
            "  Temperature: {:.1}°C (feels like {:.1}°C)",
            report.temperature_c, report.feels_like_c
        ),
        format!("  Conditions:  {}", report.condition),
        format!("  Humidity:    {}%", report.humidity_pct),
        format!("  Wind:        {} m/s", report.wind_speed_mps),
        format!("  Pressure:    {} hPa", report.pressure_hpa),
    ];

    if let Some(meters) = report.visibility_m.filter(|m| *m > 0) {
        lines.push(format!("  Visibility:  {:.1} km", f64::from(meters) / 1000.0));
    }

    lines.push(format!("  Sunrise:     {}", report.sunrise.with_timezone(tz).format(TIME_FORMAT)));
    lines.push(format!("  Sunset:      {}", report.sunset.with_timezone(tz).format(TIME_FORMAT)));

    lines.join("\n")
}

/// One block per day, at most [`MAX_FORECAST_DAYS`].
pub fn render_forecast(city: &str, days: &[DailyForecast]) -> String {
    if days.is_empty() {
        return format!("No forecast data available for {city}.");
    }

    let mut lines = vec![format!("Forecast for {city}")];

    for day in days.iter().take(MAX_FORECAST_DAYS) {
        lines.push(String::new());
        lines.push(day.date.format(DATE_FORMAT).to_string());
        lines.push(format!(
            "  Temperature: {:.1}–{:.1}°C",
            day.min_temperature(),
            day.max_temperature()
        ));
        lines.push(format!("  Conditions:  {}", day.condition));
        lines.push(format!("  Humidity:    {}%", day.humidity_pct));
        lines.push(format!("  Wind:        {} m/s", day.wind_speed_mps));
    }

    lines.join("\n")
}

pub fn render_favorites(cities: &[String]) -> String {
    if cities.is_empty() {
        return "No favorite cities yet.".to_string();
    }

    let mut lines = vec!["Favorite cities:".to_string()];
    lines.extend(cities.iter().enumerate().map(|(i, city)| format!("  {}. {city}", i + 1)));
    lines.join("\n")
}
