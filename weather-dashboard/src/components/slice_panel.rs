use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::Component;
use crate::action::UiAction;

pub struct SlicePanelProps<'a> {
    pub title: &'a str,
    /// Summary lines; empty while the slice has not loaded
    pub lines: &'a [String],
}

/// Render-only panel for one weather slice
#[derive(Default)]
pub struct SlicePanel;

impl Component<UiAction> for SlicePanel {
    type Props<'a> = SlicePanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .title(Line::styled(
                format!(" {} ", props.title),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));

        let body: Vec<Line> = if props.lines.is_empty() {
            vec![Line::styled(
                "Loading...",
                Style::default().fg(Color::DarkGray),
            )]
        } else {
            props.lines.iter().map(|l| Line::raw(l.as_str())).collect()
        };

        frame.render_widget(
            Paragraph::new(body).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }
}
