//! Context handles: how descendant UI reaches the provider
//!
//! Two access points over the same provider:
//! - [`WeatherContext`] reads everything and can change search text and
//!   coordinates.
//! - [`WeatherContextUpdate`] can only change coordinates, for consumers that
//!   trigger navigation but never render weather data.
//!
//! Handles are cheap to clone. Once the provider stops, every setter returns
//! [`ContextError::ProviderClosed`].

use serde_json::Value;
use tokio::sync::{mpsc, watch};

use crate::action::Action;
use crate::error::ContextError;
use crate::state::{Coords, Location, Payload, WeatherState};

/// Anything that can move the dashboard to new coordinates
pub trait CoordsSetter {
    /// Replace the active coordinates, refetching every slice
    fn set_active_city_coords(&self, coords: Coords) -> Result<(), ContextError>;
}

fn send(
    action_tx: &mpsc::UnboundedSender<Action>,
    handle: &'static str,
    action: Action,
) -> Result<(), ContextError> {
    action_tx
        .send(action)
        .map_err(|_| ContextError::ProviderClosed { handle })
}

/// Full read access plus both setters
#[derive(Clone, Debug)]
pub struct WeatherContext {
    action_tx: mpsc::UnboundedSender<Action>,
    state_rx: watch::Receiver<WeatherState>,
}

impl WeatherContext {
    const HANDLE: &'static str = "WeatherContext";

    pub(crate) fn new(
        action_tx: mpsc::UnboundedSender<Action>,
        state_rx: watch::Receiver<WeatherState>,
    ) -> Self {
        Self { action_tx, state_rx }
    }

    /// Clone of the latest published state
    pub fn snapshot(&self) -> WeatherState {
        self.state_rx.borrow().clone()
    }

    /// Read the latest state without cloning all of it
    ///
    /// Keep `f` short: the provider cannot publish while it runs.
    pub fn read<R>(&self, f: impl FnOnce(&WeatherState) -> R) -> R {
        f(&self.state_rx.borrow())
    }

    pub fn forecast(&self) -> Payload {
        self.read(|s| s.forecast.clone())
    }

    pub fn air_quality(&self) -> Payload {
        self.read(|s| s.air_quality.clone())
    }

    pub fn five_day_forecast(&self) -> Payload {
        self.read(|s| s.five_day_forecast.clone())
    }

    pub fn uv_index(&self) -> Payload {
        self.read(|s| s.uv_index.clone())
    }

    pub fn geo_coded_list(&self) -> Vec<Value> {
        self.read(|s| s.geo_coded_list.clone())
    }

    /// Selectable view of the geocoded list
    pub fn locations(&self) -> Vec<Location> {
        self.read(WeatherState::locations)
    }

    pub fn input_value(&self) -> String {
        self.read(|s| s.input_value.clone())
    }

    pub fn active_city_coords(&self) -> Coords {
        self.read(|s| s.active_city_coords)
    }

    /// The search box changed
    ///
    /// An empty value resets the geocoded list to the defaults in the same
    /// state update that clears the text; anything else schedules a
    /// debounced lookup.
    pub fn handle_input(&self, value: impl Into<String>) -> Result<(), ContextError> {
        send(
            &self.action_tx,
            Self::HANDLE,
            Action::InputChange(value.into()),
        )
    }

    /// Wait until a newer state snapshot is published
    ///
    /// Returns immediately if a snapshot arrived since the last call.
    pub async fn changed(&mut self) -> Result<(), ContextError> {
        self.state_rx
            .changed()
            .await
            .map_err(|_| ContextError::ProviderClosed {
                handle: Self::HANDLE,
            })
    }

    /// Narrow this handle down to the coordinate setter
    pub fn update_context(&self) -> WeatherContextUpdate {
        WeatherContextUpdate::new(self.action_tx.clone())
    }
}

impl CoordsSetter for WeatherContext {
    fn set_active_city_coords(&self, coords: Coords) -> Result<(), ContextError> {
        send(&self.action_tx, Self::HANDLE, Action::CoordsSet(coords))
    }
}

/// Coordinate setter only
#[derive(Clone, Debug)]
pub struct WeatherContextUpdate {
    action_tx: mpsc::UnboundedSender<Action>,
}

impl WeatherContextUpdate {
    const HANDLE: &'static str = "WeatherContextUpdate";

    pub(crate) fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self { action_tx }
    }
}

impl CoordsSetter for WeatherContextUpdate {
    fn set_active_city_coords(&self, coords: Coords) -> Result<(), ContextError> {
        send(&self.action_tx, Self::HANDLE, Action::CoordsSet(coords))
    }
}
