//! # EntryCard Component
//!
//! Detail view for a single entry: name, category, description, image link,
//! and the optional location / drop lists. Long descriptions scroll inside a
//! `ScrollView`; the scroll offset is persistent state owned by `TuiState`.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::Entry;
use crate::core::search::display_name;
use crate::tui::component::Component;

pub struct EntryCard<'a> {
    pub entry: &'a Entry,
    pub scroll: &'a mut ScrollViewState,
}

impl EntryCard<'_> {
    fn lines(&self) -> Vec<Line<'static>> {
        let label = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let entry = self.entry;

        let mut lines = vec![Line::from(vec![
            Span::styled("Category  ", label),
            Span::raw(display_name(&entry.category)),
        ])];
        if let Some(id) = entry.id {
            lines.push(Line::from(vec![
                Span::styled("Number    ", label),
                Span::raw(format!("#{id}")),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(entry.description.clone()));

        let lists = [
            ("Found in", entry.common_locations.as_deref()),
            ("Drops", entry.drops.as_deref()),
        ];
        for (title, items) in lists {
            if let Some(items) = items
                && !items.is_empty()
            {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(title, label)));
                for item in items {
                    lines.push(Line::from(format!("  • {}", display_name(item))));
                }
            }
        }

        if !entry.image.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled("Image  ", label),
                Span::styled(
                    entry.image.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
        lines
    }
}

impl Component for EntryCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(format!(" {} ", display_name(&self.entry.name)))
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // One column reserved for the scrollbar.
        let content_width = inner.width.saturating_sub(1);
        let paragraph = Paragraph::new(self.lines()).wrap(Wrap { trim: false });
        let height = paragraph.line_count(content_width) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));

        frame.render_stateful_widget(scroll_view, inner, self.scroll);
    }
}
