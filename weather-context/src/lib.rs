//! Shared weather state for dashboard UIs
//!
//! One [`WeatherProvider`] owns the weather data for a dashboard: the current
//! forecast, air quality, five-day forecast and UV index for the active
//! coordinates, plus the search text and the list of matching locations.
//! UI code reaches it through two handles:
//!
//! - [`WeatherContext`]: read everything, type into the search box, pick a city
//! - [`WeatherContextUpdate`]: only pick a city
//!
//! # Flow
//!
//! Handles send intent actions to the provider. The provider runs them
//! through a reducer that returns effects (fetches to start or cancel),
//! executes the effects as tokio tasks and routes their result actions back
//! through the same reducer.
//!
//! - Mounting and every coordinate change fetch all four slices.
//! - Search text changes are debounced; only the last text in a burst is
//!   looked up.
//! - Clearing the search text resets the location list to a fixed set of
//!   cities without touching the network.
//! - A failed fetch leaves the previous value in place and is logged.
//!
//! # Example
//!
//! ```ignore
//! use weather_context::prelude::*;
//!
//! let provider = WeatherProvider::with_http(ProviderConfig::new("http://localhost:3000"));
//! let mut ctx = provider.context();
//! let shutdown = provider.shutdown_token();
//! let handle = tokio::spawn(provider.run());
//!
//! ctx.handle_input("London")?;
//! ctx.changed().await?;
//! println!("{:?}", ctx.locations());
//!
//! shutdown.cancel();
//! let final_state = handle.await?;
//! ```

pub mod action;
pub mod api;
pub mod config;
pub mod context;
pub mod defaults;
pub mod effect;
pub mod error;
pub mod provider;
pub mod reducer;
pub mod state;
pub mod store;
pub mod tasks;
pub mod testing;

pub use action::{Action, ActionSummary};
pub use api::{Endpoint, HttpApi, WeatherApi};
pub use config::{FetchPolicy, ProviderConfig};
pub use context::{CoordsSetter, WeatherContext, WeatherContextUpdate};
pub use defaults::{default_locations, DEFAULT_BASE_URL, DEFAULT_COORDS, DEFAULT_DEBOUNCE};
pub use effect::{DispatchResult, Effect};
pub use error::{ApiError, ConfigError, ContextError};
pub use provider::WeatherProvider;
pub use reducer::reducer;
pub use state::{Coords, Location, Payload, Slice, WeatherState};
pub use store::{Middleware, NoopMiddleware, TracingMiddleware, WeatherStore};
pub use tasks::{TaskKey, TaskManager};

// Re-exported so integration code does not need its own tokio-util dependency
pub use tokio_util::sync::CancellationToken;

pub use testing::{ActionRecorder, MockApi};

#[cfg(feature = "testing-time")]
pub use testing::{advance_time, pause_time, resume_time};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionSummary};
    pub use crate::api::{HttpApi, WeatherApi};
    pub use crate::config::{FetchPolicy, ProviderConfig};
    pub use crate::context::{CoordsSetter, WeatherContext, WeatherContextUpdate};
    pub use crate::error::{ApiError, ConfigError, ContextError};
    pub use crate::provider::WeatherProvider;
    pub use crate::state::{Coords, Location, Payload, Slice, WeatherState};
    pub use crate::store::{Middleware, NoopMiddleware, TracingMiddleware};
}
