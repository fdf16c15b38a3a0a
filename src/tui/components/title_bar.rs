//! # TitleBar Component
//!
//! Top status bar: app name, the current status message, and how many views
//! deep the back stack goes.
//!
//! Purely presentational. All three props come from core `App` state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.status_message.clone(), app.history.len(), app.is_loading);
//! title_bar.render(frame, title_area);
//! ```
//!
//! The title text changes based on state:
//!
//! 1. **Loading**: `"Hyrule Compendium | Loading monsters... ⟳"`
//! 2. **Status**: `"Hyrule Compendium | 38 entries in monsters  ← 2"`
//! 3. **Default**: `"Hyrule Compendium"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Status message (e.g., "Loading monsters...", "No results found")
    pub status_message: String,
    /// Number of views on the back stack
    pub depth: usize,
    /// Whether a request is in flight
    pub loading: bool,
}

impl TitleBar {
    pub fn new(status_message: String, depth: usize, loading: bool) -> Self {
        Self {
            status_message,
            depth,
            loading,
        }
    }

    fn text(&self) -> String {
        let mut text = String::from("Hyrule Compendium");
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if self.loading {
            text.push_str(" ⟳");
        } else if self.depth > 0 {
            text.push_str(&format!("  ← {}", self.depth));
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
