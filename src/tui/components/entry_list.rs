//! # EntryList Component
//!
//! Selectable list used for both the category root and entry listings.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ListSelection` lives in `TuiState` and survives redraws
//! - `EntryList` is created each frame with borrowed rows and state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

/// Rows moved by PageUp / PageDown.
const PAGE: usize = 10;

/// Persistent selection state for whichever list is on screen.
#[derive(Debug, Default)]
pub struct ListSelection {
    pub selected: usize,
    pub list_state: ListState,
}

impl ListSelection {
    pub fn new() -> Self {
        Self::at(0)
    }

    pub fn at(selected: usize) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(selected));
        Self {
            selected,
            list_state,
        }
    }

    pub fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else {
            let target = self.selected as isize + delta;
            self.selected = target.clamp(0, len as isize - 1) as usize;
        }
        self.list_state.select(Some(self.selected));
    }

    pub fn up(&mut self, len: usize) {
        self.move_by(-1, len);
    }

    pub fn down(&mut self, len: usize) {
        self.move_by(1, len);
    }

    pub fn page_up(&mut self, len: usize) {
        self.move_by(-(PAGE as isize), len);
    }

    pub fn page_down(&mut self, len: usize) {
        self.move_by(PAGE as isize, len);
    }
}

/// One line in the list: a label and optional right-aligned detail.
pub struct ListRow {
    pub label: String,
    pub detail: Option<String>,
}

/// Transient render wrapper.
pub struct EntryList<'a> {
    pub title: String,
    pub rows: Vec<ListRow>,
    /// Shown instead of the list when `rows` is empty.
    pub empty_message: &'a str,
    pub state: &'a mut ListSelection,
}

impl Component for EntryList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let count = format!(" {} ", self.rows.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title))
            .title_bottom(Line::from(count).right_aligned())
            .padding(Padding::horizontal(1));

        if self.rows.is_empty() {
            let empty = Paragraph::new(self.empty_message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // Keep the selection inside the list if it shrank.
        if self.state.selected >= self.rows.len() {
            self.state.move_by(0, self.rows.len());
        }

        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };

                let detail = row.detail.as_deref().unwrap_or("");
                let label_width = inner_width.saturating_sub(detail.width() + 2);
                let label = truncate_str(&row.label, label_width);
                let padded = format!("{:<width$}", label, width = label_width);

                let mut spans = vec![Span::styled(padded, style)];
                if !detail.is_empty() {
                    spans.push(Span::styled("  ", style));
                    spans.push(Span::styled(detail.to_string(), style.add_modifier(Modifier::DIM)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + c.to_string().width() > max_width - 3 {
            break;
        }
        out.push(c);
    }
    out.push_str("...");
    out
}
