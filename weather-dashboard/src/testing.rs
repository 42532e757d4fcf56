//! Test helpers for the dashboard
//!
//! - Key constructors for driving components and the app
//! - [`RenderHarness`]: render into a `TestBackend` and read the result as text

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};

use crate::event::EventKind;

/// Key press with no modifiers
pub fn key(code: KeyCode) -> EventKind {
    EventKind::Key(KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

pub fn char_key(c: char) -> EventKind {
    key(KeyCode::Char(c))
}

/// Character with Ctrl held
pub fn ctrl_key(c: char) -> EventKind {
    EventKind::Key(KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// One key press per character of `text`
pub fn type_str(text: &str) -> Vec<EventKind> {
    text.chars().map(char_key).collect()
}

/// Buffer contents as text, one line per row, styles dropped
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::with_capacity((area.width as usize + 1) * area.height as usize);
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

/// Fixed-size terminal for render tests
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("failed to create test terminal: {e}"));
        Self { terminal }
    }

    /// Draw one frame and return it as plain text
    ///
    /// # Panics
    ///
    /// Panics if drawing fails.
    pub fn render_to_string_plain<F>(&mut self, render: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        let completed = self
            .terminal
            .draw(render)
            .unwrap_or_else(|e| panic!("failed to draw test frame: {e}"));
        buffer_to_string_plain(completed.buffer)
    }

    pub fn terminal(&mut self) -> &mut Terminal<TestBackend> {
        &mut self.terminal
    }
}
