/// The provider's coarse weather category, as carried in `weather[0].main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Haze,
    Unknown,
}

const CONDITION_CODES: &[(&str, Condition)] = &[
    ("Clear", Condition::Clear),
    ("Clouds", Condition::Clouds),
    ("Rain", Condition::Rain),
    ("Drizzle", Condition::Drizzle),
    ("Thunderstorm", Condition::Thunderstorm),
    ("Snow", Condition::Snow),
    ("Mist", Condition::Mist),
    ("Haze", Condition::Haze),
];

pub const FALLBACK_EMOJI: &str = "🌡️";

impl Condition {
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        CONDITION_CODES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(code))
            .map(|(_, condition)| *condition)
            .unwrap_or(Condition::Unknown)
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Condition::Clear => "☀️",
            Condition::Clouds => "☁️",
            Condition::Rain => "🌧️",
            Condition::Drizzle => "🌦️",
            Condition::Thunderstorm => "⛈️",
            Condition::Snow => "❄️",
            Condition::Mist => "🌫️",
            Condition::Haze => "🌁",
            Condition::Unknown => FALLBACK_EMOJI,
        }
    }
}

pub fn condition_emoji(code: &str) -> &'static str {
    Condition::from_code(code).emoji()
}
