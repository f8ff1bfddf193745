//! Glue between the runtime loop and the root component

use dog_saga_core::{EventKind, EventOutcome};
use ratatui::{Frame, layout::Rect};

use crate::action::Action;
use crate::components::{Component, DogDisplay, DogDisplayProps};
use crate::state::AppState;

#[derive(Default)]
pub struct DogUi {
    display: DogDisplay,
}

impl DogUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &DogDisplay {
        &self.display
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        self.display.render(frame, area, DogDisplayProps { state });
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        if let EventKind::Resize(width, height) = event {
            return EventOutcome::action(Action::UiTerminalResize(*width, *height)).with_render();
        }

        EventOutcome::from_actions(self.display.handle_event(event, DogDisplayProps { state }))
    }
}
