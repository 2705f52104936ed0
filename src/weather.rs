use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{TransportKind, WeatherError};

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

// API response structs
#[derive(Debug, Deserialize)]
struct Main {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Weather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    main: Main,
    weather: Vec<Weather>,
}

/// The parts of a current-conditions response that end up on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub condition_code: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherClient {
    pub fn new(config: &Config) -> Result<Self, WeatherError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(WeatherError::MissingCredential)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| WeatherError::Transport {
                kind: TransportKind::Other,
                detail: e.to_string(),
            })?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherReading, WeatherError> {
        let city = city.trim();
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);
        debug!("Requesting current weather for {:?}", city);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::transport(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::transport(&e))?;

        if !status.is_success() {
            warn!("Weather request for {:?} failed with status {}", city, status);
            return Err(WeatherError::from_status(
                status.as_u16(),
                error_detail(&body, status.canonical_reason()),
            ));
        }

        parse_current(&body)
    }
}

/// Interprets a body that arrived with a success status. The provider may
/// still report an error through `cod`.
pub fn parse_current(body: &str) -> Result<WeatherReading, WeatherError> {
    let value: Value = serde_json::from_str(body).map_err(|e| WeatherError::Parse {
        detail: e.to_string(),
    })?;

    if let Some(cod) = value.get("cod") {
        match response_code(cod) {
            Some(200) => {}
            Some(code) => {
                warn!("Provider reported code {} in a success response", code);
                return Err(WeatherError::from_status(code, error_detail(body, None)));
            }
            None => {
                return Err(WeatherError::Parse {
                    detail: format!("unrecognised cod value: {}", cod),
                })
            }
        }
    }

    let parsed: CurrentResponse = serde_json::from_value(value).map_err(|e| WeatherError::Parse {
        detail: e.to_string(),
    })?;

    let first = parsed
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::Parse {
            detail: "response contained no weather entries".to_string(),
        })?;

    Ok(WeatherReading {
        temperature_c: parsed.main.temp,
        condition_code: first.main,
        description: capitalize_first_letter(&first.description),
    })
}

/// `cod` arrives as a number on success and as a string on errors.
fn response_code(cod: &Value) -> Option<u16> {
    match cod {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn error_detail(body: &str, fallback: Option<&str>) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .or_else(|| fallback.map(str::to_string))
        .unwrap_or_else(|| "Unknown error".to_string())
}

pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
