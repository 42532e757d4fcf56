use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::UiAction;

pub struct HelpBarProps<'a> {
    /// (key, description) pairs
    pub hints: &'a [(&'a str, &'a str)],
    /// Right-aligned status, e.g. the active coordinates
    pub status: &'a str,
}

#[derive(Default)]
pub struct HelpBar;

impl Component<UiAction> for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let key_style = Style::default().fg(Color::Cyan);
        let text_style = Style::default().fg(Color::DarkGray);

        let mut spans = Vec::with_capacity(props.hints.len() * 2);
        for (key, desc) in props.hints {
            spans.push(Span::styled(format!(" {key}"), key_style));
            spans.push(Span::styled(format!(" {desc} "), text_style));
        }

        let status_width = props.status.chars().count() as u16 + 1;
        let [hints_area, status_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(status_width)])
                .areas(area);

        frame.render_widget(Paragraph::new(Line::from(spans)), hints_area);
        frame.render_widget(
            Paragraph::new(Line::styled(props.status, text_style).right_aligned()),
            status_area,
        );
    }
}
