//! Centralized state store with reducer and listener list

use crate::Action;

/// A reducer function that computes the next state from the current one
///
/// Reducers must be pure: the store replaces its state with the returned value
/// and never hands out a mutable reference to the reducer.
pub type Reducer<S, A> = fn(&S, A) -> S;

/// Handle returned by [`Store::subscribe`], used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<S> = Box<dyn FnMut(&S)>;

/// Centralized state store with Redux-like reducer pattern
///
/// The store is the single owner of the application state. All writes go
/// through [`dispatch`](Store::dispatch); reads go through [`state`](Store::state)
/// and listeners registered with [`subscribe`](Store::subscribe).
///
/// # Type Parameters
/// * `S` - The application state type
/// * `A` - The action type (must implement `Action`)
/// * `M` - Middleware observing every dispatch
///
/// # Example
/// ```ignore
/// #[derive(Clone, Default, PartialEq)]
/// struct AppState {
///     counter: i32,
/// }
///
/// fn reducer(state: &AppState, action: MyAction) -> AppState {
///     match action {
///         MyAction::Increment => AppState { counter: state.counter + 1 },
///         MyAction::Decrement => AppState { counter: state.counter - 1 },
///     }
/// }
///
/// let mut store = Store::new(AppState::default(), reducer);
/// let id = store.subscribe(|state| println!("counter = {}", state.counter));
/// store.dispatch(MyAction::Increment);
/// store.unsubscribe(id);
/// ```
pub struct Store<S, A: Action, M: Middleware<A> = NoopMiddleware> {
    state: S,
    reducer: Reducer<S, A>,
    listeners: Vec<(ListenerId, Listener<S>)>,
    next_listener: u64,
    middleware: M,
}

impl<S, A: Action> Store<S, A, NoopMiddleware> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self::with_middleware(state, reducer, NoopMiddleware)
    }
}

impl<S, A: Action, M: Middleware<A>> Store<S, A, M> {
    /// Create a new store whose dispatches pass through `middleware`
    pub fn with_middleware(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            state,
            reducer,
            listeners: Vec::new(),
            next_listener: 0,
            middleware,
        }
    }

    /// Get a reference to the current state
    ///
    /// Always reflects the last completed dispatch.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Register a listener called synchronously after every dispatch
    ///
    /// Listeners run in subscription order and only receive `&S`, so they
    /// cannot dispatch from inside a notification.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&S) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}

impl<S: PartialEq, A: Action, M: Middleware<A>> Store<S, A, M> {
    /// Dispatch an action to the store
    ///
    /// Applies the reducer, replaces the stored state, then notifies every
    /// listener before returning. Returns `true` if the new state differs from
    /// the old one and a re-render is needed.
    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action);

        let next = (self.reducer)(&self.state, action.clone());
        let changed = next != self.state;
        self.state = next;

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }

        self.middleware.after(&action, changed);
        changed
    }
}

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging or other cross-cutting concerns
/// to your store.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the state is replaced and listeners have run
    fn after(&mut self, action: &A, state_changed: bool);
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Middleware that logs actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Create a new logging middleware with default settings (log after only)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Create a logging middleware that logs both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.name(), summary = %action.summary(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                state_changed = state_changed,
                "Action processed"
            );
        }
    }
}
