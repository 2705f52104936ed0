use crate::condition::condition_emoji;
use crate::error::WeatherError;
use crate::weather::WeatherReading;

/// Which font the temperature region uses. Error text doesn't fit the large
/// reading style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureStyle {
    #[default]
    Reading,
    Error,
}

/// Everything the three output regions show. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayState {
    pub temperature: String,
    pub emoji: String,
    pub description: String,
    pub style: TemperatureStyle,
}

impl DisplayState {
    pub fn is_error(&self) -> bool {
        self.style == TemperatureStyle::Error
    }
}

pub fn round_temperature(celsius: f64) -> i64 {
    celsius.round() as i64
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", round_temperature(celsius))
}

pub fn describe(reading: &WeatherReading) -> DisplayState {
    DisplayState {
        temperature: format_temperature(reading.temperature_c),
        emoji: condition_emoji(&reading.condition_code).to_string(),
        description: reading.description.clone(),
        style: TemperatureStyle::Reading,
    }
}

pub fn describe_error(error: &WeatherError) -> DisplayState {
    DisplayState {
        temperature: error.to_string(),
        emoji: String::new(),
        description: String::new(),
        style: TemperatureStyle::Error,
    }
}

pub fn describe_result(result: &Result<WeatherReading, WeatherError>) -> DisplayState {
    match result {
        Ok(reading) => describe(reading),
        Err(error) => describe_error(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::FALLBACK_EMOJI;

    fn reading(temp: f64, code: &str, description: &str) -> WeatherReading {
        WeatherReading {
            temperature_c: temp,
            condition_code: code.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn describes_light_rain() {
        let state = describe(&reading(21.4, "Rain", "Light rain"));
        assert_eq!(state.temperature, "21°C");
        assert_eq!(state.emoji, "🌧️");
        assert_eq!(state.description, "Light rain");
        assert!(!state.is_error());
    }

    #[test]
    fn rounding_is_idempotent_on_whole_degrees() {
        for t in [-40.0, -1.0, 0.0, 7.0, 21.0, 45.0] {
            let once = round_temperature(t);
            assert_eq!(once as f64, t);
            assert_eq!(round_temperature(once as f64), once);
        }
    }

    #[test]
    fn rounds_to_nearest_degree() {
        assert_eq!(format_temperature(21.5), "22°C");
        assert_eq!(format_temperature(-3.6), "-4°C");
        assert_eq!(format_temperature(-0.2), "0°C");
    }

    #[test]
    fn unknown_condition_gets_thermometer() {
        let state = describe(&reading(10.0, "Volcanic ash", "Ash"));
        assert_eq!(state.emoji, FALLBACK_EMOJI);
    }

    #[test]
    fn error_overwrites_every_region() {
        let before = describe(&reading(30.0, "Clear", "Clear sky"));
        let after = describe_error(&WeatherError::NotFound);
        assert_ne!(before, after);
        assert_eq!(after.temperature, "Not Found:\nCity not found.");
        assert!(after.emoji.is_empty());
        assert!(after.description.is_empty());
        assert!(after.is_error());
    }

    #[test]
    fn result_dispatches_to_reading_or_error() {
        let ok = Ok(reading(-7.5, "Snow", "Light snow"));
        assert_eq!(describe_result(&ok), describe(&reading(-7.5, "Snow", "Light snow")));
        assert_eq!(describe_result(&ok).temperature, "-8°C");

        let err = Err(WeatherError::Forbidden);
        assert_eq!(describe_result(&err), describe_error(&WeatherError::Forbidden));
    }
}
