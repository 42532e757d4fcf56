//! Error types

use thiserror::Error;

/// A backend request that did not produce a usable payload
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, reset, body read error)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("{path} returned {status}")]
    Status {
        path: String,
        status: reqwest::StatusCode,
    },

    /// Body was not valid JSON
    #[error("{path} returned malformed JSON: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Body was JSON but of the wrong kind
    #[error("{path} returned {found}, expected {expected}")]
    UnexpectedShape {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// A context handle used after its provider stopped
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("{handle} used outside a running WeatherProvider")]
    ProviderClosed { handle: &'static str },
}

/// Invalid user-supplied configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("{name} must be a finite number, got {value}")]
    InvalidCoordinate { name: &'static str, value: f64 },

    #[error("unknown fetch policy {0:?} (expected \"latest\" or \"last-resolved\")")]
    UnknownFetchPolicy(String),
}
