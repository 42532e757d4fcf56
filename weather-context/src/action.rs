//! Actions: intents from context handles and results from fetch tasks
//!
//! Naming convention:
//! - Intents name the thing they change: `CoordsSet`, `InputChange`
//! - "Did" marks an async result: `SliceDidLoad`, `GeocodeDidFail`

use serde_json::Value;

use crate::state::{Coords, Payload, Slice};

/// Concise one-line description of an action for logs
///
/// The derived `Debug` output of a result action includes whole payloads,
/// which is far too noisy for per-dispatch logging.
pub trait ActionSummary {
    fn summary(&self) -> String;
}

/// Everything that can happen to the weather state
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Provider started: fetch all slices for the initial coordinates
    Mount,

    /// Intent: replace the active coordinates and refetch every slice
    CoordsSet(Coords),

    /// Intent: the search box now holds this text
    InputChange(String),

    /// Result: a slice request succeeded
    SliceDidLoad {
        slice: Slice,
        generation: u64,
        payload: Payload,
    },

    /// Result: a slice request failed (already logged at the call site)
    SliceDidFail {
        slice: Slice,
        generation: u64,
        error: String,
    },

    /// Result: a search lookup succeeded
    GeocodeDidLoad { search: String, results: Vec<Value> },

    /// Result: a search lookup failed (already logged at the call site)
    GeocodeDidFail { search: String, error: String },
}

impl Action {
    /// Variant name for logging and filtering
    pub fn name(&self) -> &'static str {
        match self {
            Action::Mount => "Mount",
            Action::CoordsSet(_) => "CoordsSet",
            Action::InputChange(_) => "InputChange",
            Action::SliceDidLoad { .. } => "SliceDidLoad",
            Action::SliceDidFail { .. } => "SliceDidFail",
            Action::GeocodeDidLoad { .. } => "GeocodeDidLoad",
            Action::GeocodeDidFail { .. } => "GeocodeDidFail",
        }
    }

    /// Whether this action carries the outcome of a fetch task
    pub fn is_async_result(&self) -> bool {
        matches!(
            self,
            Action::SliceDidLoad { .. }
                | Action::SliceDidFail { .. }
                | Action::GeocodeDidLoad { .. }
                | Action::GeocodeDidFail { .. }
        )
    }
}

fn truncate(msg: &str) -> String {
    if msg.chars().count() > 40 {
        format!("{}...", msg.chars().take(37).collect::<String>())
    } else {
        msg.to_string()
    }
}

impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::SliceDidLoad {
                slice, generation, ..
            } => {
                format!("SliceDidLoad {{ slice: {}, gen: {} }}", slice.label(), generation)
            }
            Action::SliceDidFail {
                slice,
                generation,
                error,
            } => format!(
                "SliceDidFail {{ slice: {}, gen: {}, error: {:?} }}",
                slice.label(),
                generation,
                truncate(error)
            ),
            Action::GeocodeDidLoad { search, results } => format!(
                "GeocodeDidLoad {{ search: {:?}, results: {} }}",
                search,
                results.len()
            ),
            Action::GeocodeDidFail { search, error } => format!(
                "GeocodeDidFail {{ search: {:?}, error: {:?} }}",
                search,
                truncate(error)
            ),
            _ => format!("{:?}", self),
        }
    }
}
