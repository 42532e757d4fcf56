//! Test utilities for code built on the weather provider
//!
//! - [`MockApi`]: in-memory [`WeatherApi`] with canned replies and a request log
//! - [`ActionRecorder`]: middleware that keeps every dispatched action
//! - Assertion macros for checking reducer effects
//!
//! # Example
//!
//! ```ignore
//! use weather_context::testing::MockApi;
//!
//! let api = MockApi::new();
//! api.respond("/api/geocoded", json!([{ "name": "London", "lat": 51.5, "lon": -0.1 }]));
//!
//! let provider = WeatherProvider::new(ProviderConfig::default(), api.clone());
//! // ...
//! assert_eq!(api.requests_to("/api/geocoded"), vec!["/api/geocoded?search=London"]);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::action::Action;
use crate::api::{Endpoint, WeatherApi};
use crate::error::ApiError;
use crate::store::Middleware;

#[derive(Clone, Debug)]
struct Reply {
    outcome: Result<Value, StatusCode>,
    delay: Duration,
}

#[derive(Debug, Default)]
struct MockInner {
    replies: HashMap<String, Reply>,
    requests: Vec<String>,
}

/// In-memory backend
///
/// Replies are registered either for a full relative URL
/// (`/api/weather?lat=1&lon=2`) or for a bare path (`/api/weather`). A full
/// URL match wins over a path match. Unregistered endpoints answer 404.
///
/// Clones share replies and the request log.
#[derive(Clone, Debug, Default)]
pub struct MockApi {
    inner: Arc<Mutex<MockInner>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn insert(&self, route: &str, outcome: Result<Value, StatusCode>, delay: Duration) {
        self.lock()
            .replies
            .insert(route.to_string(), Reply { outcome, delay });
    }

    /// Answer `route` with `body`
    pub fn respond(&self, route: &str, body: Value) -> &Self {
        self.insert(route, Ok(body), Duration::ZERO);
        self
    }

    /// Answer `route` with `body` after `delay`
    pub fn respond_after(&self, route: &str, delay: Duration, body: Value) -> &Self {
        self.insert(route, Ok(body), delay);
        self
    }

    /// Answer `route` with an HTTP error status
    pub fn fail(&self, route: &str, status: StatusCode) -> &Self {
        self.insert(route, Err(status), Duration::ZERO);
        self
    }

    /// Answer `route` with an HTTP error status after `delay`
    pub fn fail_after(&self, route: &str, delay: Duration, status: StatusCode) -> &Self {
        self.insert(route, Err(status), delay);
        self
    }

    /// Every request seen so far, as relative URLs, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    /// Requests whose path is `path`
    pub fn requests_to(&self, path: &str) -> Vec<String> {
        self.lock()
            .requests
            .iter()
            .filter(|url| url.split('?').next() == Some(path))
            .cloned()
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }
}

#[async_trait]
impl WeatherApi for MockApi {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, ApiError> {
        let url = endpoint.path_and_query();

        let reply = {
            let mut inner = self.lock();
            inner.requests.push(url.clone());
            inner
                .replies
                .get(&url)
                .or_else(|| inner.replies.get(endpoint.path()))
                .cloned()
        };

        let Some(reply) = reply else {
            return Err(ApiError::Status {
                path: url,
                status: StatusCode::NOT_FOUND,
            });
        };

        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }

        reply
            .outcome
            .map_err(|status| ApiError::Status { path: url, status })
    }
}

/// Middleware that records every dispatched action
///
/// Clones share the same log, so keep one clone and hand the other to the
/// provider.
#[derive(Clone, Debug, Default)]
pub struct ActionRecorder {
    actions: Arc<Mutex<Vec<Action>>>,
}

impl ActionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions in dispatch order
    pub fn actions(&self) -> Vec<Action> {
        self.actions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Names of the dispatched actions, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.actions().iter().map(Action::name).collect()
    }
}

impl Middleware for ActionRecorder {
    fn before(&mut self, action: &Action) {
        self.actions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(action.clone());
    }

    fn after(&mut self, _action: &Action, _state_changed: bool) {}
}

/// Assert that an effect matching the pattern was produced
///
/// # Example
///
/// ```ignore
/// let result = reducer(&mut state, Action::InputChange("Lon".into()));
/// assert_effect!(result.effects, Effect::DebounceGeocode { search } if search == "Lon");
/// ```
#[macro_export]
macro_rules! assert_effect {
    ($effects:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $effects.iter().any(|e| matches!(e, $pattern $(if $guard)?)),
            "Expected effect matching `{}`, but got: {:?}",
            stringify!($pattern),
            $effects
        );
    };
}

/// Assert that no effect matching the pattern was produced
#[macro_export]
macro_rules! assert_no_effect {
    ($effects:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$effects.iter().any(|e| matches!(e, $pattern $(if $guard)?)),
            "Expected no effect matching `{}`, but got: {:?}",
            stringify!($pattern),
            $effects
        );
    };
}

/// Count the effects matching the pattern
#[macro_export]
macro_rules! count_effects {
    ($effects:expr, $pattern:pat $(if $guard:expr)?) => {
        $effects
            .iter()
            .filter(|e| matches!(e, $pattern $(if $guard)?))
            .count()
    };
}

/// Pause tokio time so debounce timers only fire when advanced
///
/// Requires the `testing-time` feature and a current-thread runtime.
#[cfg(feature = "testing-time")]
pub fn pause_time() {
    tokio::time::pause();
}

/// Resume real time after [`pause_time`]
#[cfg(feature = "testing-time")]
pub fn resume_time() {
    tokio::time::resume();
}

/// Move paused time forward, firing any timers that come due
#[cfg(feature = "testing-time")]
pub async fn advance_time(duration: Duration) {
    tokio::time::advance(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Coords, Slice};
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_api_routes_full_url_first() {
        let api = MockApi::new();
        api.respond("/api/weather", json!({ "generic": true }))
            .respond("/api/weather?lat=1&lon=2", json!({ "exact": true }));

        let exact = Endpoint::Slice {
            slice: Slice::Forecast,
            coords: Coords::new(1.0, 2.0),
        };
        let other = Endpoint::Slice {
            slice: Slice::Forecast,
            coords: Coords::new(3.0, 4.0),
        };

        assert_eq!(api.fetch(&exact).await.unwrap(), json!({ "exact": true }));
        assert_eq!(api.fetch(&other).await.unwrap(), json!({ "generic": true }));
        assert_eq!(
            api.requests(),
            vec!["/api/weather?lat=1&lon=2", "/api/weather?lat=3&lon=4"]
        );
    }

    #[tokio::test]
    async fn test_mock_api_unknown_route_is_404() {
        let api = MockApi::new();
        let err = api
            .fetch(&Endpoint::Geocoded {
                search: "Nowhere".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Status { status: StatusCode::NOT_FOUND, .. }
        ));
        assert_eq!(api.requests_to("/api/geocoded").len(), 1);
        assert!(api.requests_to("/api/weather").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_api_delay() {
        let api = MockApi::new();
        api.respond_after("/api/uv", Duration::from_millis(300), json!({}));

        let start = tokio::time::Instant::now();
        api.fetch(&Endpoint::Slice {
            slice: Slice::UvIndex,
            coords: Coords::new(0.0, 0.0),
        })
        .await
        .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[test]
    fn test_action_recorder_shares_log() {
        let recorder = ActionRecorder::new();
        let mut handle = recorder.clone();

        handle.before(&Action::Mount);
        handle.before(&Action::InputChange("Ox".into()));

        assert_eq!(recorder.names(), vec!["Mount", "InputChange"]);
    }

    #[test]
    fn test_effect_macros() {
        use crate::effect::Effect;

        let effects = vec![
            Effect::CancelGeocode,
            Effect::DebounceGeocode {
                search: "Lon".into(),
            },
        ];

        assert_effect!(effects, Effect::CancelGeocode);
        assert_no_effect!(effects, Effect::FetchSlice { .. });
        assert_eq!(count_effects!(effects, Effect::DebounceGeocode { search } if search == "Lon"), 1);
    }
}
