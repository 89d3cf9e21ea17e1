use std::collections::HashMap;
use std::env;
use std::fs;

use serde::Deserialize;

/// Runtime settings for the console binary.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Load settings from `console.toml` when present, then apply environment
/// overrides. Missing or malformed values fall back to the defaults.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("console.toml") {
        if let Ok(parsed) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(value) = parsed.get("api_url") {
                settings.api_url = value.clone();
            }
            if let Some(value) = parsed.get("request_timeout_secs") {
                if let Ok(parsed_secs) = value.parse::<u64>() {
                    settings.request_timeout_secs = parsed_secs;
                }
            }
        }
    }

    if let Ok(value) = env::var("CONSOLE_API_URL") {
        settings.api_url = value;
    }
    if let Ok(value) = env::var("APP__API_URL") {
        settings.api_url = value;
    }
    if let Ok(value) = env::var("CONSOLE_TIMEOUT_SECS") {
        if let Ok(parsed_secs) = value.parse::<u64>() {
            settings.request_timeout_secs = parsed_secs;
        }
    }
    if let Ok(value) = env::var("APP__TIMEOUT_SECS") {
        if let Ok(parsed_secs) = value.parse::<u64>() {
            settings.request_timeout_secs = parsed_secs;
        }
    }

    settings
}

/// Normalize an operator-supplied base URL. Bare host:port strings get an
/// http scheme, trailing slashes are dropped, and a blank string falls back
/// to the default endpoint.
pub fn normalize_api_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Settings::default().api_url;
    }
    let without_slash = trimmed.trim_end_matches('/');
    if without_slash.contains("://") {
        without_slash.to_string()
    } else {
        format!("http://{without_slash}")
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
