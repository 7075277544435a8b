use std::fs;

use serde::Deserialize;

const SETTINGS_FILE: &str = "addressbook.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rows per rendered page of the grid.
    pub page_size: usize,
    /// Preload the mock dataset into the in-memory store.
    pub seed_demo_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: 5,
            seed_demo_data: true,
        }
    }
}

/// Defaults, overridden by `addressbook.toml` when present, overridden in
/// turn by environment variables.
pub fn load_settings() -> Settings {
    let mut settings = fs::read_to_string(SETTINGS_FILE)
        .ok()
        .map(|raw| settings_from_toml(&raw))
        .unwrap_or_default();

    if let Ok(v) = std::env::var("ADDRESS_BOOK_PAGE_SIZE") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.page_size = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__PAGE_SIZE") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.page_size = parsed;
        }
    }

    if let Ok(v) = std::env::var("ADDRESS_BOOK_SEED_DEMO_DATA") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.seed_demo_data = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__SEED_DEMO_DATA") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.seed_demo_data = parsed;
        }
    }

    sanitize(settings)
}

fn settings_from_toml(raw: &str) -> Settings {
    toml::from_str::<Settings>(raw).unwrap_or_default()
}

fn sanitize(mut settings: Settings) -> Settings {
    if settings.page_size == 0 {
        settings.page_size = Settings::default().page_size;
    }
    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
