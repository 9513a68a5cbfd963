use crate::{
    Config,
    error::WeatherError,
    model::{CurrentWeather, ForecastEntry},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`.
    async fn current(&self, city: &str) -> Result<CurrentWeather, WeatherError>;

    /// Raw 3-hour samples for the next days, in API order.
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, WeatherError>;
}

/// Construct the OpenWeather provider for `api_key` using the configured endpoint.
pub fn provider_from_config(api_key: &str, config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(
        OpenWeatherProvider::new(api_key.to_owned())
            .with_base_url(config.base_url.clone())
            .with_units(config.units.clone())
            .with_lang(config.lang.clone()),
    )
}
