use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, warn};

pub const API_KEY_VAR: &str = "OPENWEATHERMAP_API_KEY";
pub const BASE_URL_VAR: &str = "WEATHER_API_URL";
pub const TIMEOUT_VAR: &str = "WEATHER_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for a single lookup, re-read from the environment each time the
/// button is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Process environment first, then the first `.env` file found. Called on
    /// every lookup so a key added to the file after launch is picked up.
    pub fn load() -> Self {
        Self::load_from(|name| std::env::var(name).ok(), &env_file_candidates())
    }

    pub fn load_from<F>(env: F, candidates: &[PathBuf]) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_vars = read_env_file(candidates);
        Self::from_lookup(|name| {
            env(name)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| file_vars.get(name).cloned())
        })
    }

    /// Builds a config from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let base_url = read(BASE_URL_VAR)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match read(TIMEOUT_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!("Ignoring invalid {}={:?}, using default", TIMEOUT_VAR, raw);
                    DEFAULT_TIMEOUT
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        Self {
            api_key: read(API_KEY_VAR),
            base_url,
            timeout,
        }
    }
}

/// Candidate `.env` locations, most specific first.
fn env_file_candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(".env")];

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            paths.push(exe_dir.join(".env"));
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let home = PathBuf::from(home);
        paths.push(home.join(".city_weather.env"));
        paths.push(home.join(".env"));
    }

    paths
}

/// Reads the first parseable `.env` file among `candidates` into a map.
pub fn read_env_file(candidates: &[PathBuf]) -> HashMap<String, String> {
    for path in candidates {
        if !path.exists() {
            debug!("No .env at {}", path.display());
            continue;
        }
        match dotenv::from_path_iter(path) {
            Ok(iter) => {
                let vars: HashMap<String, String> = iter
                    .filter_map(|item| match item {
                        Ok(pair) => Some(pair),
                        Err(e) => {
                            warn!("Skipping bad line in {}: {}", path.display(), e);
                            None
                        }
                    })
                    .collect();
                debug!("Read {} variables from {}", vars.len(), path.display());
                if !vars.contains_key(API_KEY_VAR) {
                    warn!("{} not set in {}", API_KEY_VAR, path.display());
                }
                return vars;
            }
            Err(e) => warn!("Error loading .env from {}: {}", path.display(), e),
        }
    }

    debug!("No .env file found; relying on process environment");
    HashMap::new()
}
