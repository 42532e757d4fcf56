//! The weather state provider
//!
//! Owns the store, the fetch tasks and the action channel. Everything else
//! talks to it through context handles.
//!
//! ```text
//! context handle --intent--> action channel --> middleware + reducer
//!                                  ^                    |
//!                                  |                 effects
//!                             result action             v
//!                                  +---------------- task manager (HTTP)
//! ```
//!
//! After each dispatch that changes the state, a snapshot is published on a
//! watch channel for the handles to read.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::action::Action;
use crate::api::{self, HttpApi, WeatherApi};
use crate::config::{FetchPolicy, ProviderConfig};
use crate::context::{WeatherContext, WeatherContextUpdate};
use crate::effect::Effect;
use crate::store::{Middleware, TracingMiddleware, WeatherStore};
use crate::tasks::{TaskKey, TaskManager};
use crate::state::WeatherState;

/// Owner of the weather state
///
/// # Example
///
/// ```ignore
/// let provider = WeatherProvider::with_http(ProviderConfig::default());
/// let ctx = provider.context();
/// let shutdown = provider.shutdown_token();
/// tokio::spawn(provider.run());
///
/// ctx.handle_input("London")?;
/// ```
pub struct WeatherProvider<M: Middleware = TracingMiddleware> {
    config: ProviderConfig,
    store: WeatherStore<M>,
    api: Arc<dyn WeatherApi>,
    tasks: TaskManager,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    state_tx: watch::Sender<WeatherState>,
    shutdown: CancellationToken,
}

impl WeatherProvider<TracingMiddleware> {
    /// Provider over any backend, logging actions through `tracing`
    pub fn new(config: ProviderConfig, api: impl WeatherApi + 'static) -> Self {
        Self::with_middleware(config, Arc::new(api), TracingMiddleware::new())
    }

    /// Provider over the HTTP backend at `config.base_url`
    pub fn with_http(config: ProviderConfig) -> Self {
        let api = HttpApi::from_config(&config);
        Self::new(config, api)
    }
}

impl<M: Middleware> WeatherProvider<M> {
    pub fn with_middleware(config: ProviderConfig, api: Arc<dyn WeatherApi>, middleware: M) -> Self {
        let state = WeatherState::new(&config);
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(state.clone());

        Self {
            config,
            store: WeatherStore::new(state, middleware),
            api,
            tasks: TaskManager::new(action_tx.clone()),
            action_tx,
            action_rx,
            state_tx,
            shutdown: CancellationToken::new(),
        }
    }

    /// Handle with full read access and both setters
    pub fn context(&self) -> WeatherContext {
        WeatherContext::new(self.action_tx.clone(), self.state_tx.subscribe())
    }

    /// Handle that can only change coordinates
    pub fn update_context(&self) -> WeatherContextUpdate {
        WeatherContextUpdate::new(self.action_tx.clone())
    }

    /// Cancelling this token stops [`run`](Self::run)
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn state(&self) -> &WeatherState {
        self.store.state()
    }

    pub fn middleware(&self) -> &M {
        self.store.middleware()
    }

    pub fn tasks(&self) -> &TaskManager {
        &self.tasks
    }

    /// Queue an action behind everything already waiting
    pub fn enqueue(&self, action: Action) {
        // We hold the receiver ourselves, so this cannot fail
        let _ = self.action_tx.send(action);
    }

    /// Queue the first fetch round for the initial coordinates
    pub fn mount(&self) {
        tracing::info!(
            coords = %self.store.state().active_city_coords,
            policy = %self.config.fetch_policy,
            "Mounting weather provider"
        );
        self.enqueue(Action::Mount);
    }

    /// Abort the pending search lookup and every tracked fetch
    pub fn unmount(&mut self) {
        tracing::info!(tasks = self.tasks.len(), "Unmounting weather provider");
        self.tasks.cancel_all();
    }

    /// Run one action through middleware and reducer, start its effects and
    /// publish the new state if it changed
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);

        for effect in result.effects {
            self.handle_effect(effect);
        }

        if result.changed {
            self.state_tx.send_replace(self.store.state().clone());
        }
        result.changed
    }

    /// Dispatch everything currently queued without waiting
    ///
    /// Returns how many actions were processed.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
            processed += 1;
        }
        processed
    }

    fn handle_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchSlice {
                slice,
                coords,
                generation,
                policy,
            } => {
                let fetch = api::fetch_slice(Arc::clone(&self.api), slice, coords, generation);
                match policy {
                    FetchPolicy::LatestRequested => {
                        self.tasks.spawn(TaskKey::Slice(slice), fetch);
                    }
                    FetchPolicy::LastResolved => {
                        self.tasks.spawn_detached(fetch);
                    }
                }
            }
            Effect::DebounceGeocode { search } => {
                let fetch = api::fetch_geocoded(Arc::clone(&self.api), search);
                self.tasks
                    .debounce(TaskKey::Geocode, self.config.debounce, fetch);
            }
            Effect::CancelGeocode => self.tasks.cancel(&TaskKey::Geocode),
        }
    }

    /// Mount, then process actions until the shutdown token is cancelled
    ///
    /// Returns the final state. Handles fail with
    /// [`ContextError::ProviderClosed`](crate::ContextError::ProviderClosed)
    /// once this returns and the provider is dropped.
    pub async fn run(mut self) -> WeatherState {
        let shutdown = self.shutdown.clone();
        self.mount();

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => break,

                Some(action) = self.action_rx.recv() => {
                    self.dispatch(action);
                }
            }
        }

        self.unmount();
        self.store.state().clone()
    }
}
