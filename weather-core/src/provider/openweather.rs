use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::DEFAULT_BASE_URL,
    error::WeatherError,
    model::{CurrentWeather, ForecastEntry},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    units: String,
    lang: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            units: "metric".to_string(),
            lang: "en".to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    async fn send(&self, endpoint: &str, city: &str) -> Result<Response, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!(%url, city, "requesting OpenWeather");

        self.http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::FetchFailed(format!("request to OpenWeather failed: {e}")))
    }

    async fn fetch_current(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let res = self.send("weather", city).await?;

        match res.status() {
            StatusCode::NOT_FOUND => return Err(WeatherError::CityNotFound(city.to_string())),
            StatusCode::UNAUTHORIZED => return Err(WeatherError::InvalidCredential),
            _ => {}
        }

        let parsed: OwCurrentResponse = read_body(res, "current weather").await?;

        let condition = parsed
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(CurrentWeather {
            city: parsed.name,
            country: parsed.sys.country.unwrap_or_default(),
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            condition,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            pressure_hpa: parsed.main.pressure,
            visibility_m: parsed.visibility,
            sunrise: unix_to_utc(parsed.sys.sunrise)?,
            sunset: unix_to_utc(parsed.sys.sunset)?,
        })
    }

    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, WeatherError> {
        let res = self.send("forecast", city).await?;
        let parsed: OwForecastResponse = read_body(res, "forecast").await?;

        parsed
            .list
            .into_iter()
            .map(|sample| {
                let condition = sample
                    .weather
                    .first()
                    .map(|w| w.description.clone())
                    .unwrap_or_else(|| "Unknown".to_string());

                Ok(ForecastEntry {
                    time: unix_to_utc(sample.dt)?,
                    temperature_c: sample.main.temp,
                    condition,
                    humidity_pct: sample.main.humidity,
                    wind_speed_mps: sample.wind.speed,
                })
            })
            .collect()
    }
}

/// Fail on any non-success status, otherwise decode the JSON body.
async fn read_body<T: DeserializeOwned>(res: Response, what: &str) -> Result<T, WeatherError> {
    let status = res.status();
    let body = res.text().await.map_err(|e| {
        WeatherError::FetchFailed(format!("failed to read OpenWeather {what} response: {e}"))
    })?;

    if !status.is_success() {
        tracing::debug!(%status, body = %truncate_body(&body), "OpenWeather request rejected");
        return Err(WeatherError::FetchFailed(format!(
            "OpenWeather {what} request failed with status {status}"
        )));
    }

    serde_json::from_str(&body).map_err(|e| {
        WeatherError::FetchFailed(format!("failed to parse OpenWeather {what} JSON: {e}"))
    })
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwSampleMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwSampleMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        self.fetch_current(city).await
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, WeatherError> {
        self.fetch_forecast(city).await
    }
}

fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>, WeatherError> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| WeatherError::FetchFailed(format!("timestamp {ts} is out of range")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn provider(server: &MockServer) -> OpenWeatherProvider {
        OpenWeatherProvider::new("TEST_KEY".to_string()).with_base_url(server.uri())
    }

    fn current_body() -> serde_json::Value {
        json!({
            "name": "Tokyo",
            "sys": { "country": "JP", "sunrise": 1_700_000_000, "sunset": 1_700_040_000 },
            "main": { "temp": 21.5, "feels_like": 20.0, "humidity": 40, "pressure": 1012 },
            "weather": [{ "description": "clear sky" }],
            "wind": { "speed": 3.2 },
            "visibility": 10000
        })
    }

    #[tokio::test]
    async fn current_sends_expected_query_and_parses_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Tokyo"))
            .and(query_param("appid", "TEST_KEY"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .expect(1)
            .mount(&server)
            .await;

        let report = provider(&server).current("Tokyo").await.unwrap();

        assert_eq!(report.city, "Tokyo");
        assert_eq!(report.country, "JP");
        assert_eq!(report.temperature_c, 21.5);
        assert_eq!(report.feels_like_c, 20.0);
        assert_eq!(report.condition, "clear sky");
        assert_eq!(report.humidity_pct, 40);
        assert_eq!(report.pressure_hpa, 1012.0);
        assert_eq!(report.visibility_m, Some(10000));
        assert_eq!(report.sunrise.timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn current_without_visibility_parses() {
        let server = MockServer::start().await;
        let mut body = current_body();
        body.as_object_mut().unwrap().remove("visibility");
        Mock::given(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let report = provider(&server).current("Tokyo").await.unwrap();
        assert!(report.visibility_m.is_none());
    }

    #[tokio::test]
    async fn current_404_is_city_not_found() {
        let server = MockServer::start().await;
        Mock::given(path("/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"cod":"404"}"#))
            .mount(&server)
            .await;

        let err = provider(&server).current("Atlantis").await.unwrap_err();
        assert!(matches!(err, WeatherError::CityNotFound(ref city) if city == "Atlantis"));
    }

    #[tokio::test]
    async fn current_401_is_invalid_credential() {
        let server = MockServer::start().await;
        Mock::given(path("/weather"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = provider(&server).current("Tokyo").await.unwrap_err();
        assert!(matches!(err, WeatherError::InvalidCredential));
    }

    #[tokio::test]
    async fn current_500_is_fetch_failed() {
        let server = MockServer::start().await;
        Mock::given(path("/weather"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = provider(&server).current("Tokyo").await.unwrap_err();
        assert!(matches!(err, WeatherError::FetchFailed(_)));
    }

    #[tokio::test]
    async fn current_with_garbage_body_is_fetch_failed() {
        let server = MockServer::start().await;
        Mock::given(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = provider(&server).current("Tokyo").await.unwrap_err();
        assert!(matches!(err, WeatherError::FetchFailed(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_fetch_failed() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let err = OpenWeatherProvider::new("K".into())
            .with_base_url(uri)
            .current("Tokyo")
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::FetchFailed(_)));
    }

    #[tokio::test]
    async fn forecast_returns_samples_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "Oslo"))
            .and(query_param("appid", "TEST_KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cnt": 2,
                "list": [
                    {
                        "dt": 1_700_000_000,
                        "main": { "temp": 1.5, "feels_like": -1.0, "humidity": 80 },
                        "weather": [{ "description": "light snow" }],
                        "wind": { "speed": 4.0 }
                    },
                    {
                        "dt": 1_700_010_800,
                        "main": { "temp": 2.5, "humidity": 75 },
                        "weather": [],
                        "wind": { "speed": 3.0 }
                    }
                ]
            })))
            .mount(&server)
            .await;

        let entries = provider(&server).forecast("Oslo").await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].time.timestamp(), 1_700_000_000);
        assert_eq!(entries[0].condition, "light snow");
        assert_eq!(entries[1].temperature_c, 2.5);
        assert_eq!(entries[1].condition, "Unknown");
    }

    #[tokio::test]
    async fn forecast_does_not_distinguish_status_codes() {
        for status in [401u16, 404, 500] {
            let server = MockServer::start().await;
            Mock::given(path("/forecast"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let err = provider(&server).forecast("Nowhere").await.unwrap_err();
            assert!(matches!(err, WeatherError::FetchFailed(_)), "status {status}: {err:?}");
        }
    }

    #[test]
    fn truncate_body_limits_length() {
        let long = "x".repeat(300);
        assert_eq!(truncate_body(&long).len(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
