//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use weather_context::{ConfigError, Coords, FetchPolicy, ProviderConfig, DEFAULT_BASE_URL};

/// Terminal weather dashboard
#[derive(Parser, Debug)]
#[command(name = "weather-dashboard")]
#[command(about = "Search for a city and watch its forecast, air quality and UV index")]
pub struct Args {
    /// Base URL of the weather backend
    #[arg(long, env = "WEATHER_API_BASE", default_value = DEFAULT_BASE_URL)]
    pub api_base: String,

    /// Initial latitude
    #[arg(long, env = "WEATHER_LAT", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Initial longitude
    #[arg(long, env = "WEATHER_LON", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Search debounce in milliseconds
    #[arg(long, env = "WEATHER_DEBOUNCE_MS", default_value = "500")]
    pub debounce_ms: u64,

    /// How to treat responses for superseded coordinates (latest, last-resolved)
    #[arg(long, env = "WEATHER_FETCH_POLICY", default_value = "latest")]
    pub fetch_policy: String,

    /// Log file (defaults to weather-dashboard.log in the user cache directory)
    #[arg(long, env = "WEATHER_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Build and validate the provider configuration
    ///
    /// Latitude and longitude only apply together; with just one of them
    /// the default coordinates are kept for the other.
    pub fn provider_config(&self) -> Result<ProviderConfig, ConfigError> {
        let policy: FetchPolicy = self.fetch_policy.parse()?;

        let mut config = ProviderConfig::new(self.api_base.clone())
            .with_debounce(Duration::from_millis(self.debounce_ms))
            .with_fetch_policy(policy);

        if self.lat.is_some() || self.lon.is_some() {
            let defaults = config.initial_coords;
            config = config.with_initial_coords(Coords::new(
                self.lat.unwrap_or(defaults.lat),
                self.lon.unwrap_or(defaults.lon),
            ));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("weather-dashboard.log")
        })
    }
}
