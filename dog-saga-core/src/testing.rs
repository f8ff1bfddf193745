//! Test utilities for dog-saga-core applications
//!
//! - [`key`]: Create `KeyEvent` from string (e.g., `key("ctrl+p")`)
//! - [`click`]: Create a left-button mouse press at a cell
//! - [`StoreHarness`]: Effect store wrapper that records notifications
//! - [`RenderHarness`]: Render components into an in-memory buffer
//! - [`ActionAssertions`]: Assertions over emitted action lists
//!
//! # Example
//!
//! ```ignore
//! use dog_saga_core::testing::*;
//!
//! let mut harness = StoreHarness::new(AppState::default(), reducer, watch);
//! let result = harness.dispatch(Action::Fetch);
//! assert_eq!(result.effects.len(), 1);
//! assert_eq!(harness.notifications(), 1);
//! ```

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

use crate::effect::{DispatchResult, EffectStore, EffectWatcher};
use crate::event::EventKind;
use crate::store::Reducer;
use crate::Action;

/// Parse a key string like "q", "esc", "ctrl+c", "space" into a KeyEvent
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();

    if key_str.is_empty() {
        return None;
    }

    let parts: Vec<&str> = key_str.split('+').collect();
    let mut modifiers = KeyModifiers::empty();
    let key_part = parts.last()?.trim();

    for part in &parts[..parts.len() - 1] {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => {}
        }
    }

    let code = match key_part {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "f5" => KeyCode::F(5),
        "space" => KeyCode::Char(' '),
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Create a `KeyEvent` from a key string.
///
/// # Examples
///
/// ```
/// use dog_saga_core::testing::key;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let k = key("q");
/// assert_eq!(k.code, KeyCode::Char('q'));
///
/// let k = key("ctrl+c");
/// assert_eq!(k.code, KeyCode::Char('c'));
/// assert!(k.modifiers.contains(KeyModifiers::CONTROL));
/// ```
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Wrap a key string as an [`EventKind::Key`].
pub fn key_event(s: &str) -> EventKind {
    EventKind::Key(key(s))
}

/// Create a left-button mouse press at `(column, row)`.
pub fn click(column: u16, row: u16) -> EventKind {
    EventKind::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Effect store wrapper for reducer/watcher tests.
///
/// Counts store notifications through a real subscription, so tests observe
/// exactly what a view would.
pub struct StoreHarness<S, A: Action, E> {
    store: EffectStore<S, A, E>,
    notifications: Rc<Cell<usize>>,
}

impl<S: PartialEq + 'static, A: Action, E> StoreHarness<S, A, E> {
    /// Create a harness around a fresh effect store.
    pub fn new(state: S, reducer: Reducer<S, A>, watcher: EffectWatcher<S, A, E>) -> Self {
        let mut store = EffectStore::new(state, reducer, watcher);
        let notifications = Rc::new(Cell::new(0));
        let counter = notifications.clone();
        store.subscribe(move |_: &S| counter.set(counter.get() + 1));
        Self {
            store,
            notifications,
        }
    }

    /// Dispatch an action and return the store's result.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.store.dispatch(action)
    }

    /// Dispatch several actions in order, collecting every declared effect.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = A>) -> Vec<E> {
        actions
            .into_iter()
            .flat_map(|action| self.store.dispatch(action).effects)
            .collect()
    }

    /// Current state.
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// How many times listeners were notified.
    pub fn notifications(&self) -> usize {
        self.notifications.get()
    }
}

/// Render components into a [`TestBackend`] and read the result back.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal size.
    ///
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test terminal");
        Self { terminal }
    }

    /// Render a frame and return the resulting buffer.
    pub fn render<F>(&mut self, draw: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(draw).expect("draw to test backend");
        self.terminal.backend().buffer()
    }

    /// Render a frame and return its text content without styles.
    pub fn render_to_string_plain<F>(&mut self, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(self.render(draw))
    }
}

/// Convert a buffer to plain text, one line per row, trailing spaces trimmed.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Assertions over a list of emitted actions.
pub trait ActionAssertions<A> {
    /// Assert no actions were emitted.
    fn assert_empty(&self);
    /// Assert exactly `n` actions were emitted.
    fn assert_count(&self, n: usize);
    /// Assert the first emitted action equals `expected`.
    fn assert_first(&self, expected: A);
    /// Assert `expected` appears somewhere in the list.
    fn assert_contains(&self, expected: A);
}

impl<A: PartialEq + Debug> ActionAssertions<A> for Vec<A> {
    fn assert_empty(&self) {
        assert!(self.is_empty(), "Expected no actions, got: {:?}", self);
    }

    fn assert_count(&self, n: usize) {
        assert_eq!(
            self.len(),
            n,
            "Expected {} actions, got {}: {:?}",
            n,
            self.len(),
            self
        );
    }

    fn assert_first(&self, expected: A) {
        match self.first() {
            Some(first) => assert_eq!(first, &expected, "Unexpected first action"),
            None => panic!("Expected first action {:?}, got none", expected),
        }
    }

    fn assert_contains(&self, expected: A) {
        assert!(
            self.contains(&expected),
            "Expected {:?} in emitted actions: {:?}",
            expected,
            self
        );
    }
}
