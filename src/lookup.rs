use tracing::{info, warn};

use crate::config::Config;
use crate::display::{describe_error, describe_result, DisplayState};
use crate::error::WeatherError;
use crate::weather::{WeatherClient, WeatherReading};

/// Validates the raw input, then fetches. Input and credential problems are
/// reported before any request goes out.
pub async fn fetch_for_input(city_input: &str, config: &Config) -> Result<WeatherReading, WeatherError> {
    let city = city_input.trim();
    if city.is_empty() {
        return Err(WeatherError::EmptyInput);
    }

    let client = WeatherClient::new(config)?;
    client.fetch_weather(city).await
}

/// One button press, start to finish.
pub async fn lookup(city_input: &str, config: &Config) -> DisplayState {
    let result = fetch_for_input(city_input, config).await;
    match &result {
        Ok(reading) => {
            info!(
                "{}: {:.1}°C, {}",
                city_input.trim(),
                reading.temperature_c,
                reading.condition_code
            );
        }
        Err(err) => {
            warn!("Lookup for {:?} failed ({:?}): {:?}", city_input.trim(), err.kind(), err);
        }
    }
    describe_result(&result)
}

/// Blocking wrapper used from the GUI worker thread. Any failure to run the
/// request, including a panic, still ends in a DisplayState.
pub fn lookup_blocking(city_input: &str, config: &Config) -> DisplayState {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            return describe_error(&WeatherError::OtherHttp {
                status: None,
                detail: format!("Could not start request: {}", e),
            })
        }
    };

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        runtime.block_on(lookup(city_input, config))
    }));

    outcome.unwrap_or_else(|_| {
        describe_error(&WeatherError::OtherHttp {
            status: None,
            detail: "Unexpected error while fetching weather.".to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_with_key(base_url: String, key: Option<&str>) -> Config {
        Config {
            api_key: key.map(str::to_string),
            base_url,
            timeout: Duration::from_secs(5),
        }
    }

    async fn server_expecting(calls: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cod": 200,
                "main": { "temp": 21.4 },
                "weather": [{ "main": "Rain", "description": "light rain" }]
            })))
            .expect(calls)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn blank_input_never_hits_the_network() {
        let server = server_expecting(0).await;
        let config = config_with_key(server.uri(), Some("key"));

        for input in ["", "   ", "\t\n"] {
            let err = fetch_for_input(input, &config).await.unwrap_err();
            assert_eq!(err, WeatherError::EmptyInput);
            let state = lookup(input, &config).await;
            assert_eq!(state.temperature, "Input Error:\nPlease enter a city name.");
        }
        server.verify().await;
    }

    #[tokio::test]
    async fn missing_key_never_hits_the_network() {
        let server = server_expecting(0).await;
        let config = config_with_key(server.uri(), None);

        let err = fetch_for_input("London", &config).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
        let state = lookup("London", &config).await;
        assert_eq!(state.temperature, "Configuration Error:\nAPI key not found.");
        server.verify().await;
    }

    #[tokio::test]
    async fn successful_lookup_fills_all_regions() {
        let server = server_expecting(1).await;
        let config = config_with_key(server.uri(), Some("key"));

        let state = lookup("London", &config).await;
        assert_eq!(state.temperature, "21°C");
        assert_eq!(state.emoji, "🌧️");
        assert_eq!(state.description, "Light rain");
        assert!(!state.is_error());
    }

    #[tokio::test]
    async fn not_found_body_gives_not_found_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&server)
            .await;
        let config = config_with_key(server.uri(), Some("key"));

        let state = lookup("Nowhereville", &config).await;
        assert_eq!(state.temperature, "Not Found:\nCity not found.");
    }

    #[test]
    fn connection_failure_overwrites_whole_state() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let config = config_with_key(format!("http://127.0.0.1:{}", port), Some("key"));

        let state = lookup_blocking("London", &config);
        assert!(state.is_error());
        assert!(
            state.temperature.starts_with("Connection Error:")
                || state.temperature.starts_with("Request Error:"),
            "{}",
            state.temperature
        );
        assert!(state.emoji.is_empty());
        assert!(state.description.is_empty());
    }
}
