//! Built-in fallback values

use std::time::Duration;

use serde_json::{json, Value};

use crate::state::Coords;

/// Oxford, UK
pub const DEFAULT_COORDS: Coords = Coords::new(51.752021, -1.257726);

/// Quiet period before a search lookup fires
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Where the dashboard backend is expected when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

// (name, state, country, lat, lon)
const DEFAULT_STATES: &[(&str, &str, &str, f64, f64)] = &[
    ("London", "England", "GB", 51.5073219, -0.1276474),
    ("Oxford", "England", "GB", 51.7520131, -1.2578499),
    ("Manchester", "England", "GB", 53.4794892, -2.2451148),
    ("Birmingham", "England", "GB", 52.4796992, -1.9026911),
    ("Bristol", "England", "GB", 51.4538022, -2.5972985),
    ("Edinburgh", "Scotland", "GB", 55.9533456, -3.1883749),
    ("Glasgow", "Scotland", "GB", 55.861155, -4.2501687),
    ("Cardiff", "Wales", "GB", 51.4816546, -3.1791934),
    ("Belfast", "Northern Ireland", "GB", 54.596391, -5.9301829),
];

/// The location list shown while the search box is empty
///
/// Entries use the same shape as backend geocoding results so consumers
/// never need to tell the two apart.
pub fn default_locations() -> Vec<Value> {
    DEFAULT_STATES
        .iter()
        .map(|&(name, state, country, lat, lon)| {
            json!({
                "name": name,
                "state": state,
                "country": country,
                "lat": lat,
                "lon": lon,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Location;

    #[test]
    fn test_default_locations_are_selectable() {
        let list = default_locations();
        assert_eq!(list.len(), DEFAULT_STATES.len());
        assert!(list.iter().all(|v| Location::from_value(v).is_some()));
    }
}
