//! Effects - side effects declared by the reducer
//!
//! The reducer never performs I/O. It returns a [`DispatchResult`] listing
//! the work to do, and the provider turns each [`Effect`] into a task.

use crate::config::FetchPolicy;
use crate::state::{Coords, Slice};

/// Result of dispatching one action
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified (a new snapshot must be published)
    pub changed: bool,
    /// Effects to run after the state update
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change, nothing to run
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, nothing to run
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn changed_with_many(effects: Vec<E>) -> Self {
        Self {
            changed: true,
            effects,
        }
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// Work the provider performs on the reducer's behalf
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Request one slice for the given round
    FetchSlice {
        slice: Slice,
        coords: Coords,
        generation: u64,
        policy: FetchPolicy,
    },

    /// (Re)start the quiet-period timer for a search lookup
    DebounceGeocode { search: String },

    /// Drop the pending search lookup, if any
    CancelGeocode,
}

impl Effect {
    /// One fetch per slice, all for the same coordinates and round
    pub fn fetch_round(coords: Coords, generation: u64, policy: FetchPolicy) -> Vec<Effect> {
        Slice::ALL
            .into_iter()
            .map(|slice| Effect::FetchSlice {
                slice,
                coords,
                generation,
                policy,
            })
            .collect()
    }
}
