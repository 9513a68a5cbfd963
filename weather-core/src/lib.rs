//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration and the on-disk credential and favorites stores
//! - Abstraction over the weather provider (OpenWeather)
//! - Domain models and the grouping of forecast samples into days
//! - The [`Session`] holding everything loaded at startup
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod credentials;
pub mod error;
pub mod favorites;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod session;
mod storage;

pub use config::Config;
pub use credentials::{Credential, CredentialStore};
pub use error::{StorageError, WeatherError};
pub use favorites::{AddOutcome, Favorites, RemoveOutcome};
pub use forecast::{MAX_FORECAST_DAYS, group_by_day, group_by_day_in};
pub use model::{CurrentWeather, DailyForecast, ForecastEntry};
pub use provider::{WeatherProvider, provider_from_config};
pub use session::Session;
