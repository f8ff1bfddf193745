use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;

pub struct HelpBar;

pub struct HelpBarProps;

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, _props: Self::Props<'_>) {
        let help = Line::from(vec![
            Span::styled(" r", Style::default().fg(Color::Cyan).bold()),
            Span::styled("/", Style::default().fg(Color::DarkGray)),
            Span::styled("enter", Style::default().fg(Color::Cyan).bold()),
            Span::styled(" request  ", Style::default().fg(Color::DarkGray)),
            Span::styled("q", Style::default().fg(Color::Cyan).bold()),
            Span::styled(" quit ", Style::default().fg(Color::DarkGray)),
        ])
        .centered();
        frame.render_widget(Paragraph::new(help), area);
    }
}
