//! Reducer - pure function: (state, action) -> state
//!
//! - fn(&AppState, Action) -> AppState
//! - Every call returns a whole new state; the store swaps it in
//! - No side effects; fetches are declared by `effect::watch`

use crate::action::Action;
use crate::state::AppState;

/// The reducer handles all state transitions
///
/// Results are applied whatever the current phase, so when two fetches race
/// the one that completes last wins.
pub fn reducer(state: &AppState, action: Action) -> AppState {
    match action {
        Action::DogFetch => AppState {
            fetching: true,
            error: None,
            ..state.clone()
        },

        Action::DogDidLoad(photo) => AppState {
            fetching: false,
            photo: Some(photo),
            error: None,
        },

        // The previous photo stays on screen next to the error
        Action::DogDidError(message) => AppState {
            fetching: false,
            error: Some(message),
            ..state.clone()
        },

        Action::UiTerminalResize(..) | Action::Quit => state.clone(),
    }
}
