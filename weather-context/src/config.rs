//! Provider configuration

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::defaults::{DEFAULT_BASE_URL, DEFAULT_COORDS, DEFAULT_DEBOUNCE};
use crate::error::ConfigError;
use crate::state::Coords;

/// What happens to slice responses from a superseded fetch round
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Abort in-flight fetches of older rounds and drop their late results.
    /// Every slice converges on the most recently requested coordinates.
    #[default]
    LatestRequested,
    /// No cancellation: whichever response resolves last is kept, even if it
    /// belongs to older coordinates.
    LastResolved,
}

impl FetchPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            FetchPolicy::LatestRequested => "latest",
            FetchPolicy::LastResolved => "last-resolved",
        }
    }
}

impl fmt::Display for FetchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FetchPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" | "latest-requested" => Ok(FetchPolicy::LatestRequested),
            "last-resolved" | "last" => Ok(FetchPolicy::LastResolved),
            _ => Err(ConfigError::UnknownFetchPolicy(s.to_string())),
        }
    }
}

/// Settings for a [`WeatherProvider`](crate::WeatherProvider)
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderConfig {
    /// Origin the `/api/...` paths are resolved against
    pub base_url: String,
    /// Quiet period before a search lookup is sent
    pub debounce: Duration,
    /// Coordinates fetched on mount
    pub initial_coords: Coords,
    /// Handling of results from superseded fetch rounds
    pub fetch_policy: FetchPolicy,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            initial_coords: DEFAULT_COORDS,
            fetch_policy: FetchPolicy::default(),
        }
    }
}

impl ProviderConfig {
    /// Default settings against the given backend origin
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_initial_coords(mut self, coords: impl Into<Coords>) -> Self {
        self.initial_coords = coords.into();
        self
    }

    pub fn with_fetch_policy(mut self, policy: FetchPolicy) -> Self {
        self.fetch_policy = policy;
        self
    }

    /// Check values coming from user input (CLI, env)
    ///
    /// The base URL must be an absolute http(s) URL and the initial
    /// coordinates must be finite. Range is not checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme {:?}", url.scheme()),
            });
        }

        for (name, value) in [
            ("latitude", self.initial_coords.lat),
            ("longitude", self.initial_coords.lon),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidCoordinate { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProviderConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert_eq!(config.initial_coords, Coords::new(51.752021, -1.257726));
        assert_eq!(config.fetch_policy, FetchPolicy::LatestRequested);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ProviderConfig::new("https://weather.example")
            .with_debounce(Duration::from_millis(250))
            .with_initial_coords((40.7, -74.0))
            .with_fetch_policy(FetchPolicy::LastResolved);

        assert_eq!(config.base_url, "https://weather.example");
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert_eq!(config.initial_coords, Coords::new(40.7, -74.0));
        assert_eq!(config.fetch_policy, FetchPolicy::LastResolved);
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let config = ProviderConfig::new("not a url");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));

        let config = ProviderConfig::new("ftp://weather.example");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));

        let config = ProviderConfig::default().with_initial_coords((f64::NAN, 0.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCoordinate {
                name: "latitude",
                ..
            })
        ));
    }

    #[test]
    fn test_fetch_policy_parse() {
        assert_eq!(
            "latest".parse::<FetchPolicy>(),
            Ok(FetchPolicy::LatestRequested)
        );
        assert_eq!(
            "Last-Resolved".parse::<FetchPolicy>(),
            Ok(FetchPolicy::LastResolved)
        );
        assert_eq!(
            "newest".parse::<FetchPolicy>(),
            Err(ConfigError::UnknownFetchPolicy("newest".into()))
        );
        assert_eq!(FetchPolicy::LastResolved.to_string(), "last-resolved");
    }
}
