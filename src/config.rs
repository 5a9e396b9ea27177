use crate::error::AppResult;
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use toml;

/// Default timezone the schedule is authored in
pub const DEFAULT_TIMEZONE: &str = "Asia/Jakarta";

/// Default page title
pub const DEFAULT_SITE_TITLE: &str = "Jadwal Live";

/// Main configuration structure for the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Event list source: a local JSON file path or an http(s) URL
    pub events_source: String,
    /// Port the web server listens on
    pub port: u16,
    /// IANA timezone name used to interpret and display event times
    pub timezone: String,
    /// Locale for user-visible page strings
    pub site_locale: String,
    /// Page title shown in the header
    pub site_title: String,
    /// Derived event length in minutes when an event has no end time
    pub default_duration_minutes: i64,
    /// Map of component names to their enabled status
    pub components: HashMap<String, bool>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let events_source =
            env::var("EVENTS_SOURCE").unwrap_or_else(|_| String::from("events.json"));

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from(DEFAULT_TIMEZONE));

        let site_locale = env::var("SITE_LOCALE").unwrap_or_else(|_| String::from("id"));

        let site_title = env::var("SITE_TITLE").unwrap_or_else(|_| String::from(DEFAULT_SITE_TITLE));

        let default_duration_minutes = env::var("DEFAULT_EVENT_DURATION_MINUTES")
            .ok()
            .and_then(|m| m.parse::<i64>().ok())
            .unwrap_or(60);

        // Initialize default components
        let mut components = HashMap::new();
        components.insert("next_live".to_string(), true);

        // Load components configuration from file if it exists
        if let Ok(content) = fs::read_to_string("config/components.toml") {
            if let Ok(file_components) = toml::from_str::<HashMap<String, bool>>(&content) {
                // Merge with defaults
                for (key, value) in file_components {
                    components.insert(key, value);
                }
            }
        }

        Ok(Config {
            events_source,
            port,
            timezone,
            site_locale,
            site_title,
            default_duration_minutes,
            components,
        })
    }

    /// Parsed timezone, falling back to the default when the name is unknown
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(chrono_tz::Asia::Jakarta)
    }

    /// Check if a component is enabled
    pub fn is_component_enabled(&self, name: &str) -> bool {
        *self.components.get(name).unwrap_or(&false)
    }

    /// Update component enabled status
    #[allow(dead_code)]
    pub fn set_component_enabled(&mut self, name: &str, enabled: bool) -> AppResult<()> {
        self.components.insert(name.to_string(), enabled);
        self.save_components()
    }

    /// Save component configuration to file
    #[allow(dead_code)]
    fn save_components(&self) -> AppResult<()> {
        // Create config directory if it doesn't exist
        if !Path::new("config").exists() {
            fs::create_dir("config")?;
        }

        let toml_str = toml::to_string(&self.components)?;
        fs::write("config/components.toml", toml_str)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            events_source: String::from("events.json"),
            port: 3000,
            timezone: String::from(DEFAULT_TIMEZONE),
            site_locale: String::from("id"),
            site_title: String::from(DEFAULT_SITE_TITLE),
            default_duration_minutes: 60,
            components: HashMap::new(),
        }
    }
}
