//! Root view
//!
//! - Props<'a>: read-only view of the whole state
//! - handle_event: global keys here, everything else goes to the button
//! - render: pure function of props, apart from the button's hit-test area

use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use dog_saga_core::EventKind;
use ratatui::prelude::{Frame, Rect};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

use super::{
    Component, ErrorBanner, ErrorBannerProps, HelpBar, HelpBarProps, PhotoPanel, PhotoPanelProps,
    RequestButton, RequestButtonProps,
};
use crate::action::Action;
use crate::state::AppState;

pub const TITLE: &str = "The Dog Saga";
pub const CAPTION_WITH_PHOTO: &str = "Keep pressing for new dogs";
pub const CAPTION_EMPTY: &str = "Replace the placeholder with a dog!";

pub struct DogDisplayProps<'a> {
    pub state: &'a AppState,
}

#[derive(Default)]
pub struct DogDisplay {
    button: RequestButton,
}

impl DogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// The request button, for hit-testing in tests
    pub fn button(&self) -> &RequestButton {
        &self.button
    }
}

impl Component<Action> for DogDisplay {
    type Props<'a> = DogDisplayProps<'a>;

    fn handle_event<'p>(&mut self, event: &EventKind, props: Self::Props<'p>) -> Vec<Action>
    where
        Self: 'p,
    {
        if let EventKind::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return vec![];
            }
            let quit = match key.code {
                KeyCode::Char('q') | KeyCode::Esc => true,
                KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
                _ => false,
            };
            if quit {
                return vec![Action::Quit];
            }
        }

        self.button.handle_event(
            event,
            RequestButtonProps {
                fetching: props.state.fetching,
            },
        )
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DogDisplayProps<'_>) {
        let state = props.state;

        let outer_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" {} ", TITLE))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);

        frame.render_widget(outer_block.clone(), area);
        let inner = outer_block.inner(area);

        let [photo, caption, button, error, credits, help] = Layout::vertical([
            Constraint::Min(7),
            Constraint::Length(2),
            Constraint::Length(RequestButton::HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        PhotoPanel.render(
            frame,
            photo,
            PhotoPanelProps {
                photo: state.photo.as_deref(),
            },
        );

        frame.render_widget(Paragraph::new(caption_text(state)), caption);

        self.button.render(
            frame,
            button,
            RequestButtonProps {
                fetching: state.fetching,
            },
        );

        ErrorBanner.render(
            frame,
            error,
            ErrorBannerProps {
                error: state.error.as_deref(),
            },
        );

        let credits_line = Line::from(vec![
            Span::styled("Photos from the ", Style::default().fg(Color::DarkGray)),
            Span::styled("Dog CEO API", Style::default().fg(Color::Gray).underlined()),
            Span::styled(" (dog.ceo/dog-api)", Style::default().fg(Color::DarkGray)),
        ])
        .centered();
        frame.render_widget(Paragraph::new(credits_line), credits);

        HelpBar.render(frame, help, HelpBarProps);
    }
}

fn caption_text(state: &AppState) -> Text<'static> {
    let intro = if state.has_photo() {
        CAPTION_WITH_PHOTO
    } else {
        CAPTION_EMPTY
    };

    let mut lines = vec![Line::from(Span::styled(intro, Style::default().fg(Color::White))).centered()];
    if let Some(breed) = state.breed() {
        lines.push(
            Line::from(vec![
                Span::styled("This one looks like a ", Style::default().fg(Color::DarkGray)),
                Span::styled(breed, Style::default().fg(Color::Yellow).bold()),
            ])
            .centered(),
        );
    }
    Text::from(lines)
}
