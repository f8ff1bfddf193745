//! Random dog photo fetcher
//!
//! One button, one HTTP call, one photo:
//! 1. Event (key or mouse) -> `DogDisplay::handle_event` -> `DogFetch`
//! 2. The store reduces it and notifies listeners (the runtime marks a redraw)
//! 3. `effect::watch` declares a `FetchDog` effect
//! 4. `EffectRunner` spawns the request; its outcome comes back as
//!    `DogDidLoad` or `DogDidError`

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod reducer;
pub mod state;
pub mod ui;

pub use action::Action;
pub use api::{DEFAULT_ENDPOINT, DogApi, FetchError};
pub use effect::{Effect, EffectRunner, FetchPolicy, watch};
pub use reducer::reducer;
pub use state::{AppState, Phase};
pub use ui::DogUi;
