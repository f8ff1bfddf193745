//! The one control: request a dog, or show that a request is in flight

use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use dog_saga_core::EventKind;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::Component;
use crate::action::Action;

pub const REQUEST_LABEL: &str = "Request a dog picture";
pub const FETCHING_LABEL: &str = "Fetching...";

/// Button that dispatches `DogFetch`
///
/// Remembers where it was last drawn so mouse clicks can be hit-tested.
#[derive(Default)]
pub struct RequestButton {
    area: Option<Rect>,
}

pub struct RequestButtonProps {
    /// Disables the button and swaps the label
    pub fetching: bool,
}

impl RequestButton {
    pub const HEIGHT: u16 = 3;

    /// Where the button was drawn on the last frame
    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    fn contains(&self, column: u16, row: u16) -> bool {
        self.area.is_some_and(|area| {
            column >= area.x
                && column < area.x.saturating_add(area.width)
                && row >= area.y
                && row < area.y.saturating_add(area.height)
        })
    }
}

impl Component<Action> for RequestButton {
    type Props<'a> = RequestButtonProps;

    fn handle_event<'p>(&mut self, event: &EventKind, props: Self::Props<'p>) -> Vec<Action>
    where
        Self: 'p,
    {
        if props.fetching {
            return vec![];
        }

        let activated = match event {
            EventKind::Key(key) => {
                key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r'))
            }
            EventKind::Mouse(mouse) => {
                mouse.kind == MouseEventKind::Down(MouseButton::Left)
                    && self.contains(mouse.column, mouse.row)
            }
            EventKind::Resize(..) => false,
        };

        if activated {
            vec![Action::DogFetch]
        } else {
            vec![]
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: RequestButtonProps) {
        let (label, color) = if props.fetching {
            (FETCHING_LABEL, Color::Yellow)
        } else {
            (REQUEST_LABEL, Color::Cyan)
        };

        let width = (label.len() as u16 + 6).min(area.width);
        let [button_area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color));
        let mut text = Line::from(label).centered().fg(color);

        if props.fetching {
            block = block.border_style(Style::default().fg(Color::DarkGray));
            text = text.italic();
        } else {
            text = text.bold();
        }

        frame.render_widget(Paragraph::new(text).block(block), button_area);
        self.area = Some(button_area);
    }
}
