//! Reducer - (state, action) -> (changed, effects)
//!
//! All state transitions live here. No I/O: fetches and timers are returned
//! as effects and executed by the provider.

use crate::action::Action;
use crate::config::FetchPolicy;
use crate::defaults::default_locations;
use crate::effect::{DispatchResult, Effect};
use crate::state::WeatherState;

/// Apply one action to the weather state
pub fn reducer(state: &mut WeatherState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Coordinate-driven fetching =====
        Action::Mount => start_fetch_round(state),

        // Always a new round, even for identical coordinates: the UI asked
        // for fresh data.
        Action::CoordsSet(coords) => {
            state.active_city_coords = coords;
            start_fetch_round(state)
        }

        Action::SliceDidLoad {
            slice,
            generation,
            payload,
        } => {
            if is_superseded(state, generation) {
                tracing::debug!(
                    slice = slice.label(),
                    generation,
                    current = state.generation,
                    "Discarding result from superseded fetch round"
                );
                return DispatchResult::unchanged();
            }
            *state.slice_mut(slice) = payload;
            DispatchResult::changed()
        }

        // Stale-on-error: keep whatever the slice held before
        Action::SliceDidFail { .. } => DispatchResult::unchanged(),

        // ===== Search =====
        Action::InputChange(value) => {
            if value.is_empty() {
                state.input_value.clear();
                state.geo_coded_list = default_locations();
                return DispatchResult::changed_with(Effect::CancelGeocode);
            }
            if value == state.input_value {
                return DispatchResult::unchanged();
            }
            state.input_value = value.clone();
            DispatchResult::changed_with(Effect::DebounceGeocode { search: value })
        }

        Action::GeocodeDidLoad { search, results } => {
            if state.fetch_policy == FetchPolicy::LatestRequested && search != state.input_value {
                tracing::debug!(%search, current = %state.input_value, "Discarding stale search result");
                return DispatchResult::unchanged();
            }
            state.geo_coded_list = results;
            DispatchResult::changed()
        }

        Action::GeocodeDidFail { .. } => DispatchResult::unchanged(),
    }
}

fn start_fetch_round(state: &mut WeatherState) -> DispatchResult<Effect> {
    state.generation += 1;
    DispatchResult::changed_with_many(Effect::fetch_round(
        state.active_city_coords,
        state.generation,
        state.fetch_policy,
    ))
}

fn is_superseded(state: &WeatherState, generation: u64) -> bool {
    state.fetch_policy == FetchPolicy::LatestRequested && generation != state.generation
}
