//! Single-line search box

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::event::EventKind;

pub struct SearchInputProps<'a, A> {
    /// Current search text, as held by the provider
    pub value: &'a str,
    pub placeholder: &'a str,
    pub is_focused: bool,
    /// Called with the new text on every edit
    pub on_change: fn(String) -> A,
    /// Called on Enter
    pub on_submit: fn(String) -> A,
}

/// Search box with a cursor
///
/// Emits `on_change` for each edit, including Ctrl+U which clears the line.
#[derive(Default)]
pub struct SearchInput {
    /// Cursor position (byte index)
    cursor: usize,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
        while self.cursor > 0 && !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn move_cursor_left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    fn move_cursor_right(&mut self, value: &str) {
        if let Some(c) = value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert_char(&mut self, value: &str, c: char) -> String {
        let mut new_value = String::with_capacity(value.len() + c.len_utf8());
        new_value.push_str(&value[..self.cursor]);
        new_value.push(c);
        new_value.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        new_value
    }

    /// Backspace
    fn delete_char_before(&mut self, value: &str) -> Option<String> {
        let (char_start, _) = value[..self.cursor].char_indices().next_back()?;

        let mut new_value = String::with_capacity(value.len());
        new_value.push_str(&value[..char_start]);
        new_value.push_str(&value[self.cursor..]);
        self.cursor = char_start;
        Some(new_value)
    }

    /// Delete
    fn delete_char_at(&self, value: &str) -> Option<String> {
        let c = value[self.cursor..].chars().next()?;

        let mut new_value = String::with_capacity(value.len());
        new_value.push_str(&value[..self.cursor]);
        new_value.push_str(&value[self.cursor + c.len_utf8()..]);
        Some(new_value)
    }
}

impl<A> Component<A> for SearchInput {
    type Props<'a> = SearchInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused {
            return None;
        }

        self.clamp_cursor(props.value);

        let EventKind::Key(key) = event else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some((props.on_change)(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                let new_value = self.insert_char(props.value, c);
                Some((props.on_change)(new_value))
            }
            KeyCode::Backspace => self
                .delete_char_before(props.value)
                .map(props.on_change),
            KeyCode::Delete => self.delete_char_at(props.value).map(props.on_change),
            KeyCode::Left => {
                self.move_cursor_left(props.value);
                None
            }
            KeyCode::Right => {
                self.move_cursor_right(props.value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                None
            }
            KeyCode::Enter => Some((props.on_submit)(props.value.to_string())),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.value);

        let (text, style) = if props.value.is_empty() {
            (props.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            (props.value, Style::default())
        };

        let border_style = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let paragraph = Paragraph::new(text).style(style).block(
            Block::default()
                .title(" Search ")
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(paragraph, area);

        if props.is_focused && area.width > 2 && area.height > 2 {
            let cursor_cols = props.value[..self.cursor].chars().count() as u16;
            let cursor_x = area.x + 1 + cursor_cols;
            if cursor_x < area.x + area.width - 1 {
                frame.set_cursor_position((cursor_x, area.y + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Change(String),
        Submit(String),
    }

    fn props(value: &str) -> SearchInputProps<'_, TestAction> {
        SearchInputProps {
            value,
            placeholder: "",
            is_focused: true,
            on_change: TestAction::Change,
            on_submit: TestAction::Submit,
        }
    }

    fn press(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> EventKind {
        EventKind::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn collect(input: &mut SearchInput, event: EventKind, value: &str) -> Vec<TestAction> {
        input.handle_event(&event, props(value)).into_iter().collect()
    }

    #[test]
    fn test_typing_appends() {
        let mut input = SearchInput::new();
        input.cursor = 3;

        let actions = collect(&mut input, press(KeyCode::Char('d')), "Lon");

        assert_eq!(actions, vec![TestAction::Change("Lond".into())]);
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn test_backspace_multibyte() {
        let mut input = SearchInput::new();
        input.cursor = "Zürich".len();

        let actions = collect(&mut input, press(KeyCode::Left), "Zürich");
        assert!(actions.is_empty());
        let actions = collect(&mut input, press(KeyCode::Left), "Zürich");
        assert!(actions.is_empty());
        let actions = collect(&mut input, press(KeyCode::Left), "Zürich");
        assert!(actions.is_empty());
        let actions = collect(&mut input, press(KeyCode::Left), "Zürich");
        assert!(actions.is_empty());
        // cursor now sits after "Zü"
        let actions = collect(&mut input, press(KeyCode::Backspace), "Zürich");

        assert_eq!(actions, vec![TestAction::Change("Zrich".into())]);
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_backspace_at_start() {
        let mut input = SearchInput::new();
        let actions = collect(&mut input, press(KeyCode::Backspace), "Paris");
        assert!(actions.is_empty());
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = SearchInput::new();
        input.cursor = 5;

        let actions = collect(&mut input, ctrl('u'), "Paris");

        assert_eq!(actions, vec![TestAction::Change(String::new())]);
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_submit() {
        let mut input = SearchInput::new();
        let actions = collect(&mut input, press(KeyCode::Enter), "Oslo");
        assert_eq!(actions, vec![TestAction::Submit("Oslo".into())]);
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut input = SearchInput::new();
        let mut p = props("");
        p.is_focused = false;

        let actions: Vec<_> = input
            .handle_event(&press(KeyCode::Char('a')), p)
            .into_iter()
            .collect();

        assert!(actions.is_empty());
    }
}
