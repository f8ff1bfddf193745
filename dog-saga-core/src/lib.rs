//! Store, effect and runtime layer for terminal apps
//!
//! This crate provides the plumbing behind a unidirectional-data-flow
//! terminal application, following a Redux-inspired architecture.
//!
//! # Core Concepts
//!
//! - **Action**: Events that describe state changes
//! - **Store**: Single owner of the state; pure reducer plus listener list
//! - **Effect watcher**: Maps dispatched actions to declared side effects
//! - **TaskManager**: Runs effects as async tasks that send result actions back
//! - **Component**: Pure UI elements that render based on props
//! - **EffectRuntime**: The event/action/render loop tying it together
//!
//! # Basic Example
//!
//! ```ignore
//! use dog_saga_core::prelude::*;
//!
//! #[derive(Clone, Debug)]
//! enum MyAction {
//!     Increment,
//! }
//!
//! impl Action for MyAction {
//!     fn name(&self) -> &'static str {
//!         "Increment"
//!     }
//! }
//!
//! #[derive(Clone, Default, PartialEq)]
//! struct AppState {
//!     counter: i32,
//! }
//!
//! fn reducer(state: &AppState, action: MyAction) -> AppState {
//!     match action {
//!         MyAction::Increment => AppState { counter: state.counter + 1 },
//!     }
//! }
//!
//! let mut store = Store::new(AppState::default(), reducer);
//! store.subscribe(|state| tracing::info!(counter = state.counter, "changed"));
//! store.dispatch(MyAction::Increment);
//! ```
//!
//! # Async Pattern
//!
//! Async work uses a two-phase action pattern:
//!
//! 1. **Intent actions** trigger async work (e.g., `DataFetch`)
//! 2. **Result actions** carry the outcome back (e.g., `DataDidLoad`, `DataDidError`)
//!
//! The watcher turns the intent into an effect, the effect handler spawns a
//! task through [`TaskManager`], and the task's output action is queued back
//! into the runtime like any other action.

pub mod action;
pub mod component;
pub mod effect;
pub mod event;
pub mod runtime;
pub mod store;
pub mod tasks;
pub mod testing;

pub use action::Action;
pub use component::Component;
pub use effect::{DispatchResult, EffectStore, EffectWatcher};
pub use event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
pub use runtime::{EffectContext, EffectRuntime, EventOutcome, PollerConfig};
pub use store::{ListenerId, LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store};
pub use tasks::{TaskKey, TaskManager};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::component::Component;
    pub use crate::effect::{DispatchResult, EffectStore, EffectWatcher};
    pub use crate::event::EventKind;
    pub use crate::runtime::{EffectContext, EffectRuntime, EventOutcome};
    pub use crate::store::{
        ListenerId, LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store,
    };
    pub use crate::tasks::{TaskKey, TaskManager};
}
