//! # SearchBox Component
//!
//! Single-line query field under the main panel.
//!
//! The buffer is internal state. Whether a request is in flight is a prop,
//! shown in the title. Editing happens at the end of the line only; names
//! in the compendium are short enough that a movable cursor buys nothing.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the SearchBox
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Enter with text in the box. The buffer is cleared.
    Submit(String),
    ContentChanged,
}

pub struct SearchBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// A request is in flight (Prop)
    pub loading: bool,
}

impl SearchBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            loading: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// The tail of the buffer that fits in `width` columns.
    fn visible_text(&self, width: usize) -> &str {
        let mut start = 0;
        while self.buffer[start..].width() > width {
            match self.buffer[start..].chars().next() {
                Some(c) => start += c.len_utf8(),
                None => break,
            }
        }
        &self.buffer[start..]
    }
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.loading {
            " Search (loading...) "
        } else {
            " Search "
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title);

        // Leave one column for the cursor.
        let inner_width = area.width.saturating_sub(3) as usize;
        let visible = self.visible_text(inner_width);
        let cursor_x = area.x + 1 + visible.width() as u16;

        let input = Paragraph::new(visible.to_string())
            .block(block)
            .style(Style::default().fg(Color::Green));
        frame.render_widget(input, area);

        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Queries are one line.
                let line = text.lines().next().unwrap_or_default();
                self.buffer.push_str(line);
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Backspace => self.buffer.pop().map(|_| SearchEvent::ContentChanged),
            TuiEvent::Submit if !self.buffer.is_empty() => {
                Some(SearchEvent::Submit(std::mem::take(&mut self.buffer)))
            }
            _ => None,
        }
    }
}
