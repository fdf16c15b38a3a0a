use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::api::Entry;
use crate::core::search::display_name;
use crate::core::state::{App, ViewState};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{EntryCard, EntryList, ListRow, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(3), Length(1)]);
    let [title_area, main_area, search_area, help_area] = layout.areas(frame.area());

    TitleBar::new(app.status_message.clone(), app.history.len(), app.is_loading)
        .render(frame, title_area);

    // Main area - show error OR the current view
    if let Some(error_msg) = &app.error {
        draw_error_view(frame, main_area, error_msg);
    } else {
        draw_view(frame, main_area, app, tui);
    }

    tui.search_box.loading = app.is_loading;
    tui.search_box.render(frame, search_area);

    let help = Paragraph::new(help_text(&app.view))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, help_area);
}

fn draw_view(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    match &app.view {
        ViewState::Categories => {
            let empty_message = if app.categories_failed {
                "Could not load categories. Press Ctrl+R to retry."
            } else {
                "Loading categories..."
            };
            EntryList {
                title: app.view.title(),
                rows: category_rows(&app.categories),
                empty_message,
                state: &mut tui.selection,
            }
            .render(frame, area);
        }
        ViewState::CategoryList { category, entries } => {
            EntryList {
                title: display_name(category),
                rows: entry_rows(entries, false),
                empty_message: "This category is empty.",
                state: &mut tui.selection,
            }
            .render(frame, area);
        }
        ViewState::SearchResults { entries, .. } => {
            EntryList {
                title: app.view.title(),
                rows: entry_rows(entries, true),
                empty_message: "No results found.",
                state: &mut tui.selection,
            }
            .render(frame, area);
        }
        ViewState::SingleItem(entry) => {
            EntryCard {
                entry,
                scroll: &mut tui.card_scroll,
            }
            .render(frame, area);
        }
    }
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let error_paragraph = Paragraph::new(vec![
        Line::from(error_msg.to_string()),
        Line::default(),
        Line::from("Esc to go back, Ctrl+R to reload"),
    ])
    .block(Block::bordered().title("ERROR"))
    .style(Style::default().fg(Color::Red))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}

fn category_rows(categories: &[String]) -> Vec<ListRow> {
    categories
        .iter()
        .map(|c| ListRow {
            label: display_name(c),
            detail: None,
        })
        .collect()
}

fn entry_rows(entries: &[Entry], with_category: bool) -> Vec<ListRow> {
    entries
        .iter()
        .map(|e| ListRow {
            label: display_name(&e.name),
            detail: with_category.then(|| e.category.clone()),
        })
        .collect()
}

fn help_text(view: &ViewState) -> &'static str {
    match view {
        ViewState::Categories => " ↑↓ select  Enter open  Ctrl+A all entries  Ctrl+R reload  Ctrl+C quit",
        ViewState::CategoryList { .. } | ViewState::SearchResults { .. } => {
            " ↑↓ select  Enter open  Esc back  Ctrl+G categories  Ctrl+C quit"
        }
        ViewState::SingleItem(_) => " ↑↓ scroll  Esc back  Ctrl+G categories  Ctrl+C quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_entries;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new();
        terminal.draw(|f| draw_ui(f, app, &mut tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_categories() {
        let mut app = App::new();
        app.categories = vec!["monsters".into(), "materials".into()];
        let text = render_text(&app);
        assert!(text.contains("Categories"));
        assert!(text.contains("Monsters"));
        assert!(text.contains("Materials"));
        assert!(text.contains("Search"));
    }

    #[test]
    fn test_draw_search_results_with_categories() {
        let mut app = App::new();
        app.view = ViewState::SearchResults {
            term: "blin".into(),
            entries: sample_entries(),
        };
        let text = render_text(&app);
        assert!(text.contains("Results for \"blin\""));
        assert!(text.contains("Bokoblin"));
        assert!(text.contains("materials"));
    }

    #[test]
    fn test_draw_empty_search_results() {
        let mut app = App::new();
        app.view = ViewState::SearchResults {
            term: "guardian".into(),
            entries: Vec::new(),
        };
        assert!(render_text(&app).contains("No results found."));
    }

    #[test]
    fn test_draw_single_item() {
        let mut app = App::new();
        app.view = ViewState::SingleItem(sample_entries().remove(0));
        let text = render_text(&app);
        assert!(text.contains("Moblin"));
        assert!(text.contains("A large, brutish monster."));
        assert!(text.contains("Esc back"));
    }

    #[test]
    fn test_failed_category_load_offers_retry() {
        let mut app = App::new();
        app.categories_failed = true;
        let text = render_text(&app);
        assert!(text.contains("Could not load categories"));
        assert!(!text.contains("Loading categories..."));
    }

    #[test]
    fn test_categories_loading_message() {
        assert!(render_text(&App::new()).contains("Loading categories..."));
    }

    #[test]
    fn test_error_replaces_view() {
        let mut app = App::new();
        app.categories = vec!["monsters".into()];
        app.error = Some("network error: connection refused".into());
        let text = render_text(&app);
        assert!(text.contains("ERROR"));
        assert!(text.contains("connection refused"));
        assert!(!text.contains("Monsters"));
    }
}
