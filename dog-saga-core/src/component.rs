//! Component trait for pure UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A pure UI component that renders based on props and emits actions
///
/// Components follow these rules:
/// 1. Props contain ALL read-only data needed for rendering
/// 2. `handle_event` returns actions, never mutates application state
/// 3. `render` is a pure function of props (plus internal UI state such as
///    the area last drawn, kept for mouse hit-testing)
///
/// # Example
///
/// ```ignore
/// use dog_saga_core::{Component, EventKind};
///
/// struct FetchButton;
///
/// struct FetchButtonProps {
///     busy: bool,
/// }
///
/// impl Component<AppAction> for FetchButton {
///     type Props<'a> = FetchButtonProps;
///
///     fn handle_event<'p>(&mut self, event: &EventKind, props: Self::Props<'p>) -> Option<AppAction>
///     where
///         Self: 'p,
///     {
///         match event {
///             EventKind::Key(key) if !props.busy && key.code == KeyCode::Enter => Some(AppAction::Fetch),
///             _ => None,
///         }
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         let label = if props.busy { "Fetching..." } else { "Fetch" };
///         frame.render_widget(Paragraph::new(label), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Returns any type implementing `IntoIterator<Item = A>`:
    /// - `None` - no actions (most common)
    /// - `Some(action)` - single action
    /// - `vec![...]` - multiple actions
    ///
    /// Default implementation returns no actions (render-only components).
    ///
    /// Implementations name the props lifetime (`fn handle_event<'p>(..,
    /// props: Self::Props<'p>) where Self: 'p`) so it stays early-bound.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
