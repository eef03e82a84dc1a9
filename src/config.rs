use std::env;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";
pub const BASE_URL_VAR: &str = "RECIPE_API_BASE_URL";

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend origin, without a trailing slash.
    pub base_url: String,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        let base_url = env::var(BASE_URL_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
