use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;

pub const ERROR_TEXT: &str = "Uh oh - something went wrong!";

/// Static red banner shown while the last fetch failed
///
/// The underlying message is only logged, never shown.
pub struct ErrorBanner;

pub struct ErrorBannerProps<'a> {
    pub error: Option<&'a str>,
}

impl Component<Action> for ErrorBanner {
    type Props<'a> = ErrorBannerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.error.is_none() {
            return;
        }

        let line = Line::from(vec![Span::styled(
            ERROR_TEXT,
            Style::default().fg(Color::Red).bold(),
        )])
        .centered();
        frame.render_widget(Paragraph::new(line), area);
    }
}
