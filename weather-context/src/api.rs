//! Backend client
//!
//! Fetch tasks call [`fetch_slice`] / [`fetch_geocoded`], which run one
//! request and turn the outcome into a result action. Failures are logged
//! here, at the call site, and otherwise swallowed: the reducer keeps the
//! previous value for any `...DidFail` action.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::action::Action;
use crate::config::ProviderConfig;
use crate::error::ApiError;
use crate::state::{Coords, Payload, Slice};

/// Path of the search endpoint
pub const GEOCODED_PATH: &str = "/api/geocoded";

/// One backend request
#[derive(Clone, Debug, PartialEq)]
pub enum Endpoint {
    /// `GET /api/{weather,pollution,fiveday,uv}?lat=..&lon=..`
    Slice { slice: Slice, coords: Coords },
    /// `GET /api/geocoded?search=..`
    Geocoded { search: String },
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Slice { slice, .. } => slice.path(),
            Endpoint::Geocoded { .. } => GEOCODED_PATH,
        }
    }

    /// Relative URL as sent to the backend
    pub fn path_and_query(&self) -> String {
        match self {
            Endpoint::Slice { slice, coords } => {
                format!("{}?lat={}&lon={}", slice.path(), coords.lat, coords.lon)
            }
            Endpoint::Geocoded { search } => {
                format!("{}?search={}", GEOCODED_PATH, urlencoding::encode(search))
            }
        }
    }
}

/// Source of weather payloads
///
/// The provider only talks to the backend through this trait, so tests and
/// alternative transports can stand in for [`HttpApi`].
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Fetch the JSON body served at `endpoint`
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, ApiError>;
}

/// `reqwest`-backed client for the dashboard backend
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Client with default `reqwest` settings (no timeout)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing client (custom timeouts, proxies, TLS)
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint
    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path_and_query())
    }
}

#[async_trait]
impl WeatherApi for HttpApi {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, ApiError> {
        let url = self.url_for(endpoint);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                path: endpoint.path_and_query(),
                status,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            path: endpoint.path_and_query(),
            source,
        })
    }
}

/// Fetch one slice for one round
///
/// Spawned as a task for every `FetchSlice` effect. Resolves to
/// `SliceDidLoad` or `SliceDidFail`.
pub async fn fetch_slice(
    api: Arc<dyn WeatherApi>,
    slice: Slice,
    coords: Coords,
    generation: u64,
) -> Action {
    let endpoint = Endpoint::Slice { slice, coords };

    match api.fetch(&endpoint).await {
        Ok(payload) => Action::SliceDidLoad {
            slice,
            generation,
            payload,
        },
        Err(e) => {
            tracing::warn!(
                endpoint = %endpoint.path_and_query(),
                error = %e,
                "Error fetching {} data",
                slice.label()
            );
            Action::SliceDidFail {
                slice,
                generation,
                error: e.to_string(),
            }
        }
    }
}

/// Look up location candidates for the search text
///
/// A body that is not a JSON array counts as a failure.
pub async fn fetch_geocoded(api: Arc<dyn WeatherApi>, search: String) -> Action {
    let endpoint = Endpoint::Geocoded {
        search: search.clone(),
    };

    let result = api
        .fetch(&endpoint)
        .await
        .and_then(|body| into_list(&endpoint, body));

    match result {
        Ok(results) => Action::GeocodeDidLoad { search, results },
        Err(e) => {
            tracing::warn!(
                endpoint = %endpoint.path_and_query(),
                error = %e,
                "Error fetching geo-coded list"
            );
            Action::GeocodeDidFail {
                search,
                error: e.to_string(),
            }
        }
    }
}

fn into_list(endpoint: &Endpoint, body: Payload) -> Result<Vec<Value>, ApiError> {
    match body {
        Value::Array(items) => Ok(items),
        other => Err(ApiError::UnexpectedShape {
            path: endpoint.path_and_query(),
            expected: "an array",
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
