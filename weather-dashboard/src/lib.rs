//! Terminal weather dashboard
//!
//! A ratatui front end over [`weather_context`]: a search box, the list of
//! matching locations and one panel per weather slice. Exposed as a library
//! so the rendering can be tested against ratatui's `TestBackend`.

pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod event;
pub mod logging;
pub mod summary;
pub mod testing;

pub use action::UiAction;
pub use app::{run_app, App, Focus};
pub use cli::Args;
pub use event::{EventKind, PollerConfig};
