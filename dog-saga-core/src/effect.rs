//! Effect-based state management
//!
//! Reducers stay pure. Side effects are declared by a separate *watcher*
//! that looks at every dispatched action (and the state it produced) and
//! returns a list of effects. Effects are descriptions of work, not the work
//! itself; the runtime hands them to an effect handler which spawns tasks.
//!
//! # Example
//!
//! ```ignore
//! use dog_saga_core::{DispatchResult, EffectStore};
//!
//! enum Effect {
//!     FetchData,
//! }
//!
//! fn reducer(state: &AppState, action: AppAction) -> AppState {
//!     match action {
//!         AppAction::LoadData => AppState { loading: true, ..state.clone() },
//!         AppAction::DidLoadData(data) => AppState { loading: false, data: Some(data) },
//!     }
//! }
//!
//! fn watch(_state: &AppState, action: &AppAction) -> Vec<Effect> {
//!     match action {
//!         AppAction::LoadData => vec![Effect::FetchData],
//!         _ => vec![],
//!     }
//! }
//!
//! let mut store = EffectStore::new(AppState::default(), reducer, watch);
//! let result = store.dispatch(AppAction::LoadData);
//!
//! for effect in result.effects {
//!     match effect {
//!         Effect::FetchData => { /* spawn async task */ }
//!     }
//! }
//! ```

use crate::action::Action;
use crate::store::{ListenerId, Middleware, NoopMiddleware, Reducer, Store};

/// Result of dispatching an action to an effect-aware store.
///
/// Contains both the state change indicator and any effects to be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// Create a result indicating no state change and no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// Create a result indicating state changed but no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Returns true if there are any effects to process.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// Maps a dispatched action to the effects it should trigger.
///
/// Called after the reducer, with the state the action produced.
pub type EffectWatcher<S, A, E> = fn(&S, &A) -> Vec<E>;

/// A store that pairs a pure reducer with an effect watcher.
///
/// Wraps [`Store`], so listeners and middleware behave exactly the same;
/// [`dispatch`](EffectStore::dispatch) additionally returns the effects
/// declared for the action.
pub struct EffectStore<S, A: Action, E, M: Middleware<A> = NoopMiddleware> {
    store: Store<S, A, M>,
    watcher: EffectWatcher<S, A, E>,
}

impl<S, A: Action, E> EffectStore<S, A, E, NoopMiddleware> {
    /// Create a new effect store with the given initial state, reducer and watcher.
    pub fn new(state: S, reducer: Reducer<S, A>, watcher: EffectWatcher<S, A, E>) -> Self {
        Self::from_store(Store::new(state, reducer), watcher)
    }
}

impl<S, A: Action, E, M: Middleware<A>> EffectStore<S, A, E, M> {
    /// Wrap an existing store (e.g. one built with middleware).
    pub fn from_store(store: Store<S, A, M>, watcher: EffectWatcher<S, A, E>) -> Self {
        Self { store, watcher }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Register a listener on the inner store.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&S) + 'static,
    {
        self.store.subscribe(listener)
    }

    /// Remove a listener from the inner store.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Get the wrapped store.
    pub fn store(&self) -> &Store<S, A, M> {
        &self.store
    }
}

impl<S: PartialEq, A: Action, E, M: Middleware<A>> EffectStore<S, A, E, M> {
    /// Dispatch an action to the store.
    ///
    /// The reducer runs and listeners are notified first; the watcher then sees
    /// the new state and the action.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        let observed = action.clone();
        let changed = self.store.dispatch(action);
        let effects = (self.watcher)(self.store.state(), &observed);
        DispatchResult { changed, effects }
    }
}
