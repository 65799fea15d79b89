use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    config::{DEFAULT_BASE_URL, DEFAULT_LANG},
    error::FetchError,
    model::{Condition, Temperature, WeatherQuery, WeatherRecord, Wind},
};

use super::WeatherProvider;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const UNITS: &str = "metric";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    lang: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: DEFAULT_LANG.to_string(),
            http: http_client(Duration::from_secs(REQUEST_TIMEOUT_SECS)),
        }
    }

    /// Bounds the whole request, connect through body.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = http_client(timeout);
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = lang.to_string();
        self
    }

    fn query_params(&self, query: &WeatherQuery) -> Vec<(&'static str, String)> {
        let mut params = match query {
            WeatherQuery::Coordinates(coords) => vec![
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ],
            WeatherQuery::City(city) => vec![("q", city.clone())],
        };

        params.extend([
            ("units", UNITS.to_string()),
            ("appid", self.api_key.clone()),
            ("lang", self.lang.clone()),
        ]);

        params
    }
}

fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    id: u64,
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl TryFrom<OwCurrentResponse> for WeatherRecord {
    type Error = FetchError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        if parsed.weather.is_empty() {
            return Err(FetchError::Parse(
                "OpenWeather response contained no weather conditions".to_string(),
            ));
        }

        let conditions = parsed
            .weather
            .into_iter()
            .map(|w| Condition {
                category: w.main,
                description: w.description,
                icon: w.icon,
            })
            .collect();

        Ok(WeatherRecord {
            id: parsed.id,
            location_name: parsed.name,
            conditions,
            temperature: Temperature {
                current: parsed.main.temp,
                min: parsed.main.temp_min,
                max: parsed.main.temp_max,
                humidity_pct: parsed.main.humidity,
            },
            wind: Wind {
                speed_kph: parsed.wind.speed,
            },
        })
    }
}

/// Decode a current-weather JSON body into a record.
pub fn parse_current(body: &str) -> Result<WeatherRecord, FetchError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Parse(format!("Failed to parse OpenWeather JSON: {e}")))?;

    WeatherRecord::try_from(parsed)
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &WeatherQuery) -> Result<WeatherRecord, FetchError> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);

        tracing::debug!(%query, lang = %self.lang, "Requesting current weather from OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::Network)?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        parse_current(&body)
    }
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

    const RIO: &str = r#"{
        "id": 3451190,
        "name": "Rio de Janeiro",
        "weather": [
            {"id": 800, "main": "Clear", "description": "céu limpo", "icon": "01d"}
        ],
        "main": {"temp": 30.0, "feels_like": 33.1, "temp_min": 28.4, "temp_max": 31.2, "humidity": 62},
        "wind": {"speed": 10.0, "deg": 120}
    }"#;

    #[test]
    fn parses_current_response() {
        let record = parse_current(RIO).expect("valid response");

        assert_eq!(record.id, 3451190);
        assert_eq!(record.location_name, "Rio de Janeiro");
        assert_eq!(record.conditions.len(), 1);
        assert_eq!(record.conditions[0].category, "Clear");
        assert_eq!(record.conditions[0].description, "céu limpo");
        assert_eq!(record.conditions[0].icon, "01d");
        assert_eq!(record.temperature.current, 30.0);
        assert_eq!(record.temperature.min, 28.4);
        assert_eq!(record.temperature.max, 31.2);
        assert_eq!(record.temperature.humidity_pct, 62);
        assert_eq!(record.wind.speed_kph, 10.0);
    }

    #[test]
    fn keeps_condition_order() {
        let body = r#"{
            "name": "Lisbon",
            "weather": [
                {"main": "Rain", "description": "chuva leve"},
                {"main": "Mist", "description": "névoa"}
            ],
            "main": {"temp": 14.0, "temp_min": 12.0, "temp_max": 15.0, "humidity": 90},
            "wind": {"speed": 3.1}
        }"#;

        let record = parse_current(body).expect("valid response");
        assert_eq!(record.id, 0);
        assert_eq!(
            record.primary_condition().map(|c| c.category.as_str()),
            Some("Rain")
        );
        assert_eq!(record.conditions[1].category, "Mist");
    }

    #[test]
    fn rejects_empty_conditions() {
        let body = r#"{
            "name": "Nowhere",
            "weather": [],
            "main": {"temp": 1.0, "temp_min": 0.0, "temp_max": 2.0, "humidity": 10},
            "wind": {"speed": 0.0}
        }"#;

        let err = parse_current(body).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_current(r#"{"cod": "404", "message": "city not found"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn coordinate_query_params() {
        let provider = OpenWeatherProvider::new("KEY".into());
        let query = WeatherQuery::Coordinates(crate::model::Coordinates::new(-22.9, -43.2));

        let params = provider.query_params(&query);
        assert_eq!(
            params,
            vec![
                ("lat", "-22.9".to_string()),
                ("lon", "-43.2".to_string()),
                ("units", "metric".to_string()),
                ("appid", "KEY".to_string()),
                ("lang", "pt_br".to_string()),
            ]
        );
    }

    #[test]
    fn city_query_params_use_literal_name() {
        let provider = OpenWeatherProvider::new("KEY".into()).with_lang("en");
        let query = WeatherQuery::City("São Paulo".into());

        let params = provider.query_params(&query);
        assert_eq!(params[0], ("q", "São Paulo".to_string()));
        assert!(params.contains(&("lang", "en".to_string())));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = OpenWeatherProvider::new("KEY".into()).with_base_url("http://localhost:1234/");
        assert_eq!(provider.base_url, "http://localhost:1234");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let truncated = truncate_body(&long);

        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
