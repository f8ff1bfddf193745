//! Runtime loop for effect-based apps.
//!
//! Wires terminal input, the action queue, the store, the effect handler and
//! rendering together:
//!
//! 1. Terminal event -> `map_event` -> actions pushed onto the queue
//! 2. Queue -> `EffectStore::dispatch` -> reducer, listeners, watcher
//! 3. Effects -> `handle_effect` -> tasks whose result actions re-enter the queue
//! 4. Store notification -> next loop iteration redraws

use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::effect::EffectStore;
use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
use crate::store::{Middleware, NoopMiddleware};
use crate::tasks::TaskManager;
use crate::Action;

/// Configuration for the event poller.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call.
    pub poll_timeout: Duration,
    /// Sleep between poll cycles.
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Result of mapping an event into actions plus an optional render hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    /// Actions to enqueue.
    pub actions: Vec<A>,
    /// Whether to force a re-render.
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    /// No actions and no render.
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    /// Wrap a single action.
    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    /// Create from any iterator of actions
    ///
    /// Useful for converting `Component::handle_event` results which return
    /// `impl IntoIterator<Item = A>`.
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    /// Mark that a render is needed.
    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<Option<A>> for EventOutcome<A> {
    fn from(action: Option<A>) -> Self {
        match action {
            Some(action) => Self::action(action),
            None => Self::ignored(),
        }
    }
}

/// Context passed to effect handlers.
pub struct EffectContext<'a, A: Action> {
    tasks: &'a mut TaskManager<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    /// Access the task manager.
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

/// Runtime for effect-based stores.
///
/// Owns the store; nothing else can reach the state except through the
/// render and event-mapping closures, which only ever see `&S`.
pub struct EffectRuntime<S, A: Action, E, M: Middleware<A> = NoopMiddleware> {
    store: EffectStore<S, A, E, M>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    poller_config: PollerConfig,
    tasks: TaskManager<A>,
    dirty: Rc<Cell<bool>>,
}

impl<S: PartialEq + 'static, A: Action, E, M: Middleware<A>> EffectRuntime<S, A, E, M> {
    /// Create a runtime from an existing effect store.
    ///
    /// Registers a store listener that schedules a redraw on every
    /// notification. The listener lives as long as the store, so dispatches
    /// made outside `run` are drawn on the next frame too.
    pub fn from_store(mut store: EffectStore<S, A, E, M>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());

        let dirty = Rc::new(Cell::new(true));
        let flag = dirty.clone();
        store.subscribe(move |_: &S| flag.set(true));

        Self {
            store,
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
            tasks,
            dirty,
        }
    }

    /// Configure event polling behavior.
    pub fn with_event_poller(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: A) {
        send_action(&self.action_tx, action);
    }

    /// Access the current state.
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Access the task manager.
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        &mut self.tasks
    }

    /// Whether a store notification is waiting to be drawn.
    pub fn needs_render(&self) -> bool {
        self.dirty.get()
    }

    /// Wait for the next queued action (user intent or task result).
    pub async fn next_action(&mut self) -> Option<A> {
        self.action_rx.recv().await
    }

    /// Dispatch one action and hand any declared effects to `handle_effect`.
    ///
    /// Returns whether the state changed.
    pub fn dispatch<FEffect>(&mut self, action: A, handle_effect: &mut FEffect) -> bool
    where
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let result = self.store.dispatch(action);
        if result.has_effects() {
            let mut ctx = EffectContext {
                tasks: &mut self.tasks,
            };
            for effect in result.effects {
                handle_effect(effect, &mut ctx);
            }
        }
        result.changed
    }

    /// Run the event/action loop until quit.
    ///
    /// On exit the input poller is stopped and every in-flight task is
    /// aborted, so no result action outlives the loop.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        render: FRender,
        map_event: FEvent,
        should_quit: FQuit,
        handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(
            event_tx,
            self.poller_config.poll_timeout,
            self.poller_config.loop_sleep,
            cancel_token.clone(),
        );

        let result = self
            .drive(
                terminal,
                event_rx,
                render,
                map_event,
                should_quit,
                handle_effect,
            )
            .await;

        cancel_token.cancel();
        self.tasks.cancel_all();

        result
    }

    async fn drive<B, FRender, FEvent, FQuit, FEffect, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut event_rx: mpsc::UnboundedReceiver<RawEvent>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        loop {
            if self.dirty.replace(false) {
                let state = self.store.state();
                terminal.draw(|frame| render(frame, frame.area(), state))?;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let event = process_raw_event(raw_event);
                    let outcome: EventOutcome<A> = map_event(&event, self.store.state()).into();
                    if outcome.needs_render {
                        self.dirty.set(true);
                    }
                    for action in outcome.actions {
                        send_action(&self.action_tx, action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        tracing::info!(action = %action.name(), "Quit requested");
                        return Ok(());
                    }
                    self.dispatch(action, &mut handle_effect);
                }

                else => {
                    return Ok(());
                }
            }
        }
    }
}

fn send_action<A: Action>(tx: &mpsc::UnboundedSender<A>, action: A) {
    if let Err(err) = tx.send(action) {
        tracing::debug!(action = %err.0.name(), "Action channel closed, dropping action");
    }
}
