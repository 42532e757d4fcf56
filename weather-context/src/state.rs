//! Weather state - single source of truth
//!
//! The provider owns the only `WeatherState` that is ever mutated, and only
//! the reducer touches it. Consumers receive cloned snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{FetchPolicy, ProviderConfig};
use crate::defaults::default_locations;

/// Opaque JSON payload passed through from the backend unchanged
pub type Payload = Value;

/// An empty payload (`{}`), the value every slice starts with
pub fn empty_payload() -> Payload {
    Value::Object(Map::new())
}

/// A latitude/longitude pair
///
/// No range checks: whatever the UI hands over is what gets requested.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

impl Coords {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for Coords {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

/// The four coordinate-driven data slices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slice {
    Forecast,
    AirQuality,
    FiveDayForecast,
    UvIndex,
}

impl Slice {
    /// Every slice, in the order a fetch round issues them
    pub const ALL: [Slice; 4] = [
        Slice::Forecast,
        Slice::AirQuality,
        Slice::FiveDayForecast,
        Slice::UvIndex,
    ];

    /// Backend path serving this slice
    pub fn path(self) -> &'static str {
        match self {
            Slice::Forecast => "/api/weather",
            Slice::AirQuality => "/api/pollution",
            Slice::FiveDayForecast => "/api/fiveday",
            Slice::UvIndex => "/api/uv",
        }
    }

    /// Human-readable name used in logs and panel titles
    pub fn label(self) -> &'static str {
        match self {
            Slice::Forecast => "forecast",
            Slice::AirQuality => "air quality",
            Slice::FiveDayForecast => "five-day forecast",
            Slice::UvIndex => "UV index",
        }
    }
}

/// Typed view over one geocoded candidate
///
/// The geocoded list itself stays opaque JSON; this view only picks out the
/// fields a UI needs to show and select an entry. Unknown fields are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    /// Read a candidate, `None` if it lacks a name or coordinates
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    pub fn coords(&self) -> Coords {
        Coords::new(self.lat, self.lon)
    }

    /// "Name, State, Country" with missing parts left out
    pub fn display_name(&self) -> String {
        [Some(self.name.as_str()), self.state.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Everything a dashboard needs to render
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherState {
    /// Current forecast (`GET /api/weather`)
    pub forecast: Payload,

    /// Air quality (`GET /api/pollution`)
    pub air_quality: Payload,

    /// Five-day forecast (`GET /api/fiveday`)
    pub five_day_forecast: Payload,

    /// UV index (`GET /api/uv`)
    pub uv_index: Payload,

    /// Location candidates: the bundled defaults, or the last search result
    pub geo_coded_list: Vec<Value>,

    /// Search box text
    pub input_value: String,

    /// Coordinates the four slices are fetched for
    pub active_city_coords: Coords,

    /// Bumped each time a four-slice fetch round starts
    pub generation: u64,

    /// How results from superseded rounds are treated
    pub fetch_policy: FetchPolicy,
}

impl WeatherState {
    /// Initial state for a provider built from `config`
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            forecast: empty_payload(),
            air_quality: empty_payload(),
            five_day_forecast: empty_payload(),
            uv_index: empty_payload(),
            geo_coded_list: default_locations(),
            input_value: String::new(),
            active_city_coords: config.initial_coords,
            generation: 0,
            fetch_policy: config.fetch_policy,
        }
    }

    pub fn slice(&self, slice: Slice) -> &Payload {
        match slice {
            Slice::Forecast => &self.forecast,
            Slice::AirQuality => &self.air_quality,
            Slice::FiveDayForecast => &self.five_day_forecast,
            Slice::UvIndex => &self.uv_index,
        }
    }

    pub fn slice_mut(&mut self, slice: Slice) -> &mut Payload {
        match slice {
            Slice::Forecast => &mut self.forecast,
            Slice::AirQuality => &mut self.air_quality,
            Slice::FiveDayForecast => &mut self.five_day_forecast,
            Slice::UvIndex => &mut self.uv_index,
        }
    }

    /// Whether a slice holds anything beyond its initial `{}`
    ///
    /// A failed fetch leaves the slice as it was, so "not loaded" covers both
    /// "still loading" and "never succeeded".
    pub fn is_loaded(&self, slice: Slice) -> bool {
        match self.slice(slice) {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            _ => true,
        }
    }

    /// Candidates that can be shown and selected
    pub fn locations(&self) -> Vec<Location> {
        self.geo_coded_list
            .iter()
            .filter_map(Location::from_value)
            .collect()
    }
}

impl Default for WeatherState {
    fn default() -> Self {
        Self::new(&ProviderConfig::default())
    }
}
