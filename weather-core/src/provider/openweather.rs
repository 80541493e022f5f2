use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    config::DEFAULT_BASE_URL,
    error::WeatherError,
    model::{CurrentWeather, ForecastEntry, ForecastSet, LocationQuery},
};

use super::WeatherClient;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get(&self, endpoint: &str, query: &LocationQuery) -> Result<reqwest::Response, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        debug!(%url, status = %res.status(), "OpenWeather responded");
        Ok(res)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: i64,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastWeather {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwForecastWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip(self, query), fields(query = %query))]
    async fn fetch_current(&self, query: &LocationQuery) -> Result<CurrentWeather, WeatherError> {
        let res = self.get("weather", query).await?;

        let status = res.status();
        if !status.is_success() {
            // The panel only ever says "City not found"; keep the detail in the log.
            let body = res.text().await.unwrap_or_default();
            warn!(%status, body = %truncate_body(&body), "OpenWeather current request failed");
            return Err(WeatherError::Lookup);
        }

        let body = res.text().await?;
        parse_current(&body)
    }

    /// The status code is not checked here: a failed forecast request shows up
    /// as a parse error of its body.
    #[instrument(skip(self, query), fields(query = %query))]
    async fn fetch_forecast(&self, query: &LocationQuery) -> Result<ForecastSet, WeatherError> {
        let res = self.get("forecast", query).await?;
        let body = res.text().await?;
        parse_forecast(&body)
    }
}

fn parse_current(body: &str) -> Result<CurrentWeather, WeatherError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;

    let weather = parsed
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::Parse("response contained no weather conditions".to_string()))?;

    let observed_at = match parsed.dt {
        Some(ts) => unix_to_utc(ts)?,
        None => Utc::now(),
    };

    Ok(CurrentWeather {
        place_name: parsed.name,
        country_code: parsed.sys.country,
        observed_at,
        temperature_c: parsed.main.temp,
        condition: weather.description,
        condition_code: weather.id,
        feels_like_c: parsed.main.feels_like,
        humidity_pct: parsed.main.humidity,
        wind_speed_mps: parsed.wind.speed,
        pressure_hpa: parsed.main.pressure,
    })
}

fn parse_forecast(body: &str) -> Result<ForecastSet, WeatherError> {
    let parsed: OwForecastResponse = serde_json::from_str(body)?;

    // Only the kept samples are converted, so a bad entry between days is ignored.
    let mut days = Vec::new();
    for raw in ForecastSet::sample_indices(parsed.list.len()).map(|i| &parsed.list[i]) {
        let code = raw
            .weather
            .first()
            .map(|w| w.id)
            .ok_or_else(|| WeatherError::Parse(format!("forecast entry at {} has no weather", raw.dt)))?;

        days.push(ForecastEntry {
            time: unix_to_utc(raw.dt)?,
            temperature_c: raw.main.temp,
            condition_code: code,
        });
    }

    Ok(ForecastSet { days })
}

fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>, WeatherError> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| WeatherError::Parse(format!("timestamp {ts} is out of range")))
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

    const CURRENT: &str = r#"{
        "name": "London",
        "dt": 1705320000,
        "sys": { "country": "GB" },
        "main": { "temp": 7.4, "feels_like": 4.9, "humidity": 81, "pressure": 1012 },
        "wind": { "speed": 4.12 },
        "weather": [ { "id": 803, "description": "broken clouds" } ]
    }"#;

    fn forecast_body(n: usize) -> String {
        let list: Vec<serde_json::Value> = (0..n)
            .map(|i| {
                serde_json::json!({
                    "dt": 1_705_320_000 + i as i64 * 10_800,
                    "main": { "temp": i as f64 },
                    "weather": [ { "id": 500 + i as i64 } ]
                })
            })
            .collect();
        serde_json::json!({ "cod": "200", "list": list }).to_string()
    }

    #[test]
    fn parses_current_weather() {
        let cw = parse_current(CURRENT).unwrap();

        assert_eq!(cw.place_name, "London");
        assert_eq!(cw.country_code, "GB");
        assert_eq!(cw.condition, "broken clouds");
        assert_eq!(cw.condition_code, 803);
        assert_eq!(cw.humidity_pct, 81.0);
        assert_eq!(cw.pressure_hpa, 1012.0);
        assert_eq!(cw.observed_at.timestamp(), 1_705_320_000);
    }

    #[test]
    fn fractional_humidity_and_pressure_are_accepted() {
        let body = CURRENT.replace(r#""humidity": 81, "pressure": 1012"#, r#""humidity": 80.5, "pressure": 1013.5"#);
        let cw = parse_current(&body).unwrap();

        assert_eq!(cw.humidity_pct, 80.5);
        assert_eq!(cw.pressure_hpa, 1013.5);
    }

    #[test]
    fn current_without_conditions_is_parse_error() {
        let body = CURRENT.replace(r#"[ { "id": 803, "description": "broken clouds" } ]"#, "[]");
        let err = parse_current(&body).unwrap_err();
        assert!(matches!(err, WeatherError::Parse(_)));
    }

    #[test]
    fn forecast_keeps_every_eighth_sample() {
        let set = parse_forecast(&forecast_body(16)).unwrap();

        let codes: Vec<i64> = set.days.iter().map(|d| d.condition_code).collect();
        assert_eq!(codes, vec![500, 508]);
    }

    #[test]
    fn forecast_error_body_is_parse_error() {
        let err = parse_forecast(r#"{"cod":"404","message":"city not found"}"#).unwrap_err();
        assert!(matches!(err, WeatherError::Parse(_)));
    }

    #[test]
    fn truncate_long_bodies() {
        let body = "x".repeat(500);
        let out = truncate_body(&body);
        assert_eq!(out.len(), 203);
        assert!(out.ends_with("..."));
    }
}
