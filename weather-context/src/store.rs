//! State container with reducer + middleware

use crate::action::{Action, ActionSummary};
use crate::effect::{DispatchResult, Effect};
use crate::reducer::reducer;
use crate::state::WeatherState;

/// Middleware trait for observing actions
///
/// Implement this to add logging, recording, or metrics around every
/// dispatch. Middleware sees actions, never the state.
pub trait Middleware: Send {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &Action);

    /// Called after the reducer ran
    fn after(&mut self, action: &Action, state_changed: bool);
}

/// A middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl Middleware for NoopMiddleware {
    fn before(&mut self, _action: &Action) {}
    fn after(&mut self, _action: &Action, _state_changed: bool) {}
}

/// Middleware that logs every action through `tracing`
#[derive(Debug, Clone)]
pub struct TracingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl Default for TracingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingMiddleware {
    /// Log after dispatch only
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Log both before and after dispatch
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl Middleware for TracingMiddleware {
    fn before(&mut self, action: &Action) {
        if self.log_before {
            tracing::debug!(action = %action.name(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &Action, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                summary = %action.summary(),
                state_changed,
                "Action processed"
            );
        }
    }
}

/// Weather state plus the middleware wrapped around its reducer
pub struct WeatherStore<M: Middleware = TracingMiddleware> {
    state: WeatherState,
    middleware: M,
}

impl<M: Middleware> WeatherStore<M> {
    pub fn new(state: WeatherState, middleware: M) -> Self {
        Self { state, middleware }
    }

    /// Run an action through middleware and reducer
    pub fn dispatch(&mut self, action: Action) -> DispatchResult<Effect> {
        self.middleware.before(&action);
        let result = reducer(&mut self.state, action.clone());
        self.middleware.after(&action, result.changed);
        result
    }

    pub fn state(&self) -> &WeatherState {
        &self.state
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    pub fn middleware_mut(&mut self) -> &mut M {
        &mut self.middleware
    }

    /// Give up the store, keeping only the state
    pub fn into_state(self) -> WeatherState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Coords;

    #[derive(Default)]
    struct CountingMiddleware {
        before_count: usize,
        after_count: usize,
        changed_count: usize,
    }

    impl Middleware for CountingMiddleware {
        fn before(&mut self, _action: &Action) {
            self.before_count += 1;
        }

        fn after(&mut self, _action: &Action, state_changed: bool) {
            self.after_count += 1;
            if state_changed {
                self.changed_count += 1;
            }
        }
    }

    #[test]
    fn test_store_dispatch_runs_reducer() {
        let mut store = WeatherStore::new(WeatherState::default(), NoopMiddleware);

        let result = store.dispatch(Action::CoordsSet(Coords::new(40.7, -74.0)));

        assert!(result.changed);
        assert_eq!(result.effects.len(), 4);
        assert_eq!(store.state().active_city_coords, Coords::new(40.7, -74.0));
    }

    #[test]
    fn test_store_with_middleware() {
        let mut store = WeatherStore::new(WeatherState::default(), CountingMiddleware::default());

        store.dispatch(Action::InputChange("Lon".into()));
        store.dispatch(Action::InputChange("Lon".into()));

        assert_eq!(store.middleware().before_count, 2);
        assert_eq!(store.middleware().after_count, 2);
        // second identical input is a no-op
        assert_eq!(store.middleware().changed_count, 1);
    }
}
