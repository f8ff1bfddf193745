//! Photo panel: the fetched image source, or a placeholder graphic
//!
//! The terminal cannot show the image itself, so the panel shows where it
//! lives. Before the first successful fetch it shows ASCII art instead.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::Component;
use crate::action::Action;

/// Placeholder graphic, embedded at compile time
pub const PLACEHOLDER: &str = include_str!("../../sprites/placeholder.txt");

pub struct PhotoPanel;

pub struct PhotoPanelProps<'a> {
    pub photo: Option<&'a str>,
}

impl Component<Action> for PhotoPanel {
    type Props<'a> = PhotoPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" photo ")
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (paragraph, height) = match props.photo {
            Some(url) => {
                // Caption line plus the URL wrapped to the panel width
                let url_rows = url.chars().count().div_ceil(inner.width.max(1) as usize);
                let height = u16::try_from(url_rows)
                    .unwrap_or(u16::MAX)
                    .saturating_add(1);
                (
                    Paragraph::new(photo_text(url)).wrap(Wrap { trim: true }),
                    height,
                )
            }
            None => {
                let art = placeholder_text();
                let height = art.lines.len() as u16;
                (Paragraph::new(art), height)
            }
        };

        let [content_area] = Layout::vertical([Constraint::Length(height.min(inner.height))])
            .flex(Flex::Center)
            .areas(inner);

        frame.render_widget(paragraph.alignment(Alignment::Center), content_area);
    }
}

fn photo_text(url: &str) -> Text<'static> {
    Text::from(vec![
        Line::from(Span::styled(
            "image source",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            url.to_string(),
            Style::default().fg(Color::Green).underlined(),
        )),
    ])
}

/// Lines are padded to a common width so centering keeps the art intact
fn placeholder_text() -> Text<'static> {
    let width = PLACEHOLDER
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    PLACEHOLDER
        .lines()
        .map(|line| {
            Line::from(Span::styled(
                format!("{:<width$}", line, width = width),
                Style::default().fg(Color::Rgb(200, 160, 100)),
            ))
        })
        .collect::<Vec<_>>()
        .into()
}
