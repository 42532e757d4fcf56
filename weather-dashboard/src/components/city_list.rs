//! Scrollable list of location candidates

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use super::Component;
use crate::event::EventKind;

pub struct CityListProps<'a, A> {
    /// Display names of the candidates
    pub items: &'a [String],
    /// Highlighted index
    pub selected: usize,
    pub is_focused: bool,
    /// Called when the highlight moves
    pub on_select: fn(usize) -> A,
    /// Called on Enter with the highlighted index
    pub on_confirm: fn(usize) -> A,
}

/// Candidate list with keyboard navigation
///
/// j/k/up/down move the highlight, g/G/home/end jump, Enter confirms.
#[derive(Default)]
pub struct CityList {
    /// Scroll offset for viewport
    scroll_offset: usize,
}

impl CityList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure the selected index is visible within the viewport
    fn ensure_visible(&mut self, selected: usize, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }

        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + viewport_height {
            self.scroll_offset = selected.saturating_sub(viewport_height - 1);
        }
    }
}

impl<A> Component<A> for CityList {
    type Props<'a> = CityListProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused || props.items.is_empty() {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };

        let last = props.items.len() - 1;
        let selected = props.selected.min(last);

        let target = match key.code {
            KeyCode::Char('j') | KeyCode::Down => (selected + 1).min(last),
            KeyCode::Char('k') | KeyCode::Up => selected.saturating_sub(1),
            KeyCode::Char('g') | KeyCode::Home => 0,
            KeyCode::Char('G') | KeyCode::End => last,
            KeyCode::Enter => return Some((props.on_confirm)(selected)),
            _ => return None,
        };

        (target != props.selected).then(|| (props.on_select)(target))
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let viewport_height = area.height.saturating_sub(2) as usize;
        let selected = props.selected.min(props.items.len().saturating_sub(1));
        self.ensure_visible(selected, viewport_height);

        let items: Vec<ListItem> = props
            .items
            .iter()
            .map(|item| ListItem::new(Line::raw(item.as_str())))
            .collect();

        let border_style = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Locations ")
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );

        let mut state = ListState::default()
            .with_selected((!props.items.is_empty()).then_some(selected));
        *state.offset_mut() = self.scroll_offset;

        frame.render_stateful_widget(list, area, &mut state);
    }
}
