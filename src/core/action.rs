//! # Actions
//!
//! Everything that can happen in the browser becomes an `Action`.
//! User picks a category? That's `Action::SelectCategory(name)`.
//! The compendium answers? That's `Action::CategoryLoaded { .. }`.
//!
//! `update()` applies an action to the state and returns an `Effect` telling
//! the adapter what I/O to perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Transitions:
//!
//! ```text
//! Categories   ──SelectCategory──▶ (FetchCategory) ──CategoryLoaded──▶ CategoryList
//! CategoryList ──SelectEntry─────▶ (FetchEntry)    ──EntryLoaded─────▶ SingleItem
//! SearchResults──SelectEntry─────────────────────────────────────────▶ SingleItem
//! any          ──Submit(term)────▶ (RunSearch)     ──SearchResolved──▶ SingleItem | SearchResults
//! any          ──Back────────────▶ previous view on the stack, else Categories
//! any          ──Home────────────▶ Categories, stack cleared
//! ```

use log::{info, warn};

use crate::api::{ApiError, Entry};
use crate::core::search::{QueryOutcome, sort_by_name};
use crate::core::state::{App, RequestId, ViewState};

#[derive(Debug, PartialEq)]
pub enum Action {
    /// App start, or a manual reload of the category root.
    Init,
    CategoriesLoaded(Vec<String>),
    CategoriesFailed(ApiError),

    SelectCategory(String),
    CategoryLoaded {
        request: RequestId,
        category: String,
        entries: Vec<Entry>,
    },
    /// An entry picked from the list on screen.
    SelectEntry(Entry),
    EntryLoaded {
        request: RequestId,
        entry: Entry,
    },
    Submit(String),
    /// List the whole collection, A to Z.
    BrowseAll,
    SearchResolved {
        request: RequestId,
        term: String,
        outcome: QueryOutcome,
    },
    RequestFailed {
        request: RequestId,
        error: ApiError,
    },

    Back,
    Home,
    /// Abandon the request in flight.
    Cancel,
    Quit,
}

/// I/O the adapter must perform after an update.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    LoadCategories,
    FetchCategory { request: RequestId, category: String },
    FetchEntry { request: RequestId, name: String },
    RunSearch { request: RequestId, term: String },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Init => {
            app.error = None;
            app.categories_failed = false;
            app.status_message = String::from("Loading the compendium...");
            Effect::LoadCategories
        }
        Action::CategoriesLoaded(categories) => {
            info!("{} categories available", categories.len());
            app.categories = categories;
            app.categories_failed = false;
            app.status_message = String::from("Pick a category or search by name");
            Effect::None
        }
        Action::CategoriesFailed(error) => {
            app.categories_failed = true;
            app.error = Some(format!("Could not load categories: {error}"));
            app.status_message = String::from("Press Ctrl+R to retry");
            Effect::None
        }

        Action::SelectCategory(category) => {
            app.error = None;
            let request = app.begin_request();
            app.status_message = format!("Loading {category}...");
            Effect::FetchCategory { request, category }
        }
        Action::CategoryLoaded {
            request,
            category,
            mut entries,
        } => {
            if !app.finish_request(request) {
                return Effect::None;
            }
            sort_by_name(&mut entries);
            app.status_message = format!("{} entries in {category}", entries.len());
            app.navigate(ViewState::CategoryList { category, entries });
            Effect::None
        }

        Action::SelectEntry(entry) => {
            app.error = None;
            // Category listings are re-fetched per entry; search results
            // already hold the full entry.
            if matches!(app.view, ViewState::CategoryList { .. }) {
                let request = app.begin_request();
                app.status_message = format!("Loading {}...", entry.name);
                Effect::FetchEntry {
                    request,
                    name: entry.name,
                }
            } else {
                app.cancel_request();
                app.status_message = entry.category.clone();
                app.navigate(ViewState::SingleItem(entry));
                Effect::None
            }
        }
        Action::EntryLoaded { request, entry } => {
            if !app.finish_request(request) {
                return Effect::None;
            }
            app.status_message = entry.category.clone();
            app.navigate(ViewState::SingleItem(entry));
            Effect::None
        }

        Action::Submit(term) => {
            let term = term.trim().to_string();
            if term.is_empty() {
                app.status_message = String::from("Type a name to search");
                return Effect::None;
            }
            app.error = None;
            let request = app.begin_request();
            app.status_message = format!("Searching for \"{term}\"...");
            Effect::RunSearch { request, term }
        }
        Action::BrowseAll => {
            app.error = None;
            let request = app.begin_request();
            app.status_message = String::from("Loading every entry...");
            Effect::RunSearch {
                request,
                term: String::new(),
            }
        }
        Action::SearchResolved {
            request,
            term,
            outcome,
        } => {
            if !app.finish_request(request) {
                return Effect::None;
            }
            match outcome {
                QueryOutcome::Single(entry) => {
                    app.status_message = entry.category.clone();
                    app.navigate(ViewState::SingleItem(entry));
                }
                QueryOutcome::Matches(entries) => {
                    app.status_message = match entries.len() {
                        0 => String::from("No results found"),
                        1 => String::from("1 match"),
                        n => format!("{n} matches"),
                    };
                    app.navigate(ViewState::SearchResults { term, entries });
                }
                QueryOutcome::All(entries) => {
                    app.status_message = format!("{} entries", entries.len());
                    app.navigate(ViewState::SearchResults { term, entries });
                }
            }
            Effect::None
        }
        Action::RequestFailed { request, error } => {
            if !app.finish_request(request) {
                return Effect::None;
            }
            warn!("Request {:?} failed: {}", request, error);
            if error.is_not_found() {
                app.status_message = String::from("Nothing by that name in the compendium");
            } else {
                app.error = Some(error.to_string());
                app.status_message = String::from("Request failed");
            }
            Effect::None
        }

        Action::Back => {
            app.error = None;
            app.cancel_request();
            if app.go_back() {
                app.status_message = app.view.title();
            }
            Effect::None
        }
        Action::Home => {
            app.error = None;
            app.cancel_request();
            app.go_home();
            app.status_message = String::from("Pick a category or search by name");
            Effect::None
        }
        Action::Cancel => {
            if app.is_loading {
                app.cancel_request();
                app.status_message = String::from("Cancelled");
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search::resolve_query;
    use crate::test_support::{entry, sample_entries};

    fn monsters() -> Vec<Entry> {
        sample_entries()
            .into_iter()
            .filter(|e| e.category == "monsters")
            .collect()
    }

    /// Drives SelectCategory → CategoryLoaded.
    fn open_category(app: &mut App, category: &str) {
        let Effect::FetchCategory { request, .. } =
            update(app, Action::SelectCategory(category.to_string()))
        else {
            panic!("expected FetchCategory");
        };
        update(
            app,
            Action::CategoryLoaded {
                request,
                category: category.to_string(),
                entries: monsters(),
            },
        );
    }

    /// Drives SelectEntry → EntryLoaded from a category list.
    fn open_entry_from_category(app: &mut App, name: &str) {
        let picked = entry(name);
        let Effect::FetchEntry { request, name } = update(app, Action::SelectEntry(picked)) else {
            panic!("expected FetchEntry");
        };
        let loaded = sample_entries()
            .into_iter()
            .find(|e| e.name == name)
            .unwrap();
        update(app, Action::EntryLoaded { request, entry: loaded });
    }

    fn run_search(app: &mut App, term: &str) {
        let Effect::RunSearch { request, term } = update(app, Action::Submit(term.to_string()))
        else {
            panic!("expected RunSearch");
        };
        let outcome = resolve_query(&term, &sample_entries());
        update(
            app,
            Action::SearchResolved {
                request,
                term,
                outcome,
            },
        );
    }

    #[test]
    fn test_categories_failure_then_retry() {
        let mut app = App::new();
        update(
            &mut app,
            Action::CategoriesFailed(ApiError::Transport("connection refused".into())),
        );
        assert!(app.error.as_deref().unwrap().contains("connection refused"));
        assert_eq!(app.status_message, "Press Ctrl+R to retry");
        assert!(app.categories_failed);

        // Leaving the error panel keeps the failure on record.
        update(&mut app, Action::Back);
        assert!(app.error.is_none());
        assert!(app.categories_failed);

        assert_eq!(update(&mut app, Action::Init), Effect::LoadCategories);
        assert!(app.error.is_none());
        assert!(!app.categories_failed);
    }

    #[test]
    fn test_init_requests_categories() {
        let mut app = App::new();
        assert_eq!(update(&mut app, Action::Init), Effect::LoadCategories);
        update(
            &mut app,
            Action::CategoriesLoaded(vec!["monsters".into(), "materials".into()]),
        );
        assert_eq!(app.categories.len(), 2);
        assert_eq!(app.view, ViewState::Categories);
    }

    #[test]
    fn test_category_list_is_sorted() {
        let mut app = App::new();
        open_category(&mut app, "monsters");
        let ViewState::CategoryList { category, entries } = &app.view else {
            panic!("expected category list, got {:?}", app.view);
        };
        assert_eq!(category, "monsters");
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["blue moblin", "bokoblin", "moblin"]);
        assert!(!app.is_loading);
    }

    #[test]
    fn test_back_from_item_reached_via_category_replays_category() {
        let mut app = App::new();
        open_category(&mut app, "monsters");
        open_entry_from_category(&mut app, "moblin");
        assert!(matches!(&app.view, ViewState::SingleItem(e) if e.name == "moblin"));

        update(&mut app, Action::Back);
        assert!(
            matches!(&app.view, ViewState::CategoryList { category, .. } if category == "monsters")
        );

        update(&mut app, Action::Back);
        assert_eq!(app.view, ViewState::Categories);
    }

    #[test]
    fn test_back_from_item_reached_via_search_results() {
        let mut app = App::new();
        run_search(&mut app, "blin");
        let entries = app.view.entries().unwrap().to_vec();
        assert_eq!(entries.len(), 3);

        let effect = update(&mut app, Action::SelectEntry(entries[1].clone()));
        assert_eq!(effect, Effect::None);
        assert!(matches!(&app.view, ViewState::SingleItem(e) if e.name == "bokoblin"));

        update(&mut app, Action::Back);
        assert!(matches!(&app.view, ViewState::SearchResults { term, .. } if term == "blin"));
    }

    #[test]
    fn test_exact_search_goes_straight_to_item() {
        let mut app = App::new();
        open_category(&mut app, "monsters");
        run_search(&mut app, "APPLE");
        assert!(matches!(&app.view, ViewState::SingleItem(e) if e.name == "apple"));

        update(&mut app, Action::Back);
        assert!(matches!(app.view, ViewState::CategoryList { .. }));
    }

    #[test]
    fn test_search_without_matches_shows_empty_results() {
        let mut app = App::new();
        run_search(&mut app, "guardian");
        assert_eq!(
            app.view,
            ViewState::SearchResults {
                term: "guardian".into(),
                entries: Vec::new()
            }
        );
        assert_eq!(app.status_message, "No results found");
        assert!(app.error.is_none());
    }

    #[test]
    fn test_empty_search_never_navigates() {
        let mut app = App::new();
        open_category(&mut app, "monsters");
        let before = app.view.clone();
        let depth = app.history.len();

        for term in ["", "   "] {
            assert_eq!(update(&mut app, Action::Submit(term.into())), Effect::None);
        }

        assert_eq!(app.view, before);
        assert_eq!(app.history.len(), depth);
        assert!(!app.is_loading);
    }

    #[test]
    fn test_browse_all_lists_everything_sorted() {
        let mut app = App::new();
        let Effect::RunSearch { request, term } = update(&mut app, Action::BrowseAll) else {
            panic!("expected RunSearch");
        };
        assert!(term.is_empty());
        let outcome = resolve_query(&term, &sample_entries());
        update(
            &mut app,
            Action::SearchResolved {
                request,
                term,
                outcome,
            },
        );
        let names: Vec<_> = app
            .view
            .entries()
            .unwrap()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["apple", "blue moblin", "bokoblin", "moblin"]);
        assert_eq!(app.view.title(), "All entries");
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut app = App::new();
        let Effect::FetchCategory { request: stale, .. } =
            update(&mut app, Action::SelectCategory("monsters".into()))
        else {
            panic!("expected FetchCategory");
        };
        run_search(&mut app, "apple");

        update(
            &mut app,
            Action::CategoryLoaded {
                request: stale,
                category: "monsters".into(),
                entries: monsters(),
            },
        );

        assert!(matches!(&app.view, ViewState::SingleItem(e) if e.name == "apple"));
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn test_back_discards_in_flight_result() {
        let mut app = App::new();
        open_category(&mut app, "monsters");
        let Effect::FetchEntry { request, .. } =
            update(&mut app, Action::SelectEntry(entry("moblin")))
        else {
            panic!("expected FetchEntry");
        };
        update(&mut app, Action::Back);
        update(
            &mut app,
            Action::EntryLoaded {
                request,
                entry: entry("moblin"),
            },
        );
        assert_eq!(app.view, ViewState::Categories);
    }

    #[test]
    fn test_failure_keeps_current_view() {
        let mut app = App::new();
        open_category(&mut app, "monsters");
        let before = app.view.clone();

        let Effect::FetchEntry { request, .. } =
            update(&mut app, Action::SelectEntry(entry("moblin")))
        else {
            panic!("expected FetchEntry");
        };
        update(
            &mut app,
            Action::RequestFailed {
                request,
                error: ApiError::Transport("connection reset".into()),
            },
        );

        assert_eq!(app.view, before);
        assert!(!app.is_loading);
        assert_eq!(
            app.error.as_deref(),
            Some("network error: connection reset")
        );
    }

    #[test]
    fn test_not_found_is_a_status_not_an_error() {
        let mut app = App::new();
        let Effect::RunSearch { request, .. } = update(&mut app, Action::Submit("x".into())) else {
            panic!("expected RunSearch");
        };
        update(
            &mut app,
            Action::RequestFailed {
                request,
                error: ApiError::Application {
                    status: 404,
                    message: "no results".into(),
                },
            },
        );
        assert!(app.error.is_none());
        assert_eq!(app.view, ViewState::Categories);
    }

    #[test]
    fn test_home_resets_stack() {
        let mut app = App::new();
        open_category(&mut app, "monsters");
        open_entry_from_category(&mut app, "bokoblin");
        update(&mut app, Action::Home);
        assert_eq!(app.view, ViewState::Categories);
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_cancel_stops_loading() {
        let mut app = App::new();
        update(&mut app, Action::SelectCategory("monsters".into()));
        assert!(app.is_loading);
        update(&mut app, Action::Cancel);
        assert!(!app.is_loading);
        assert_eq!(app.status_message, "Cancelled");
    }

    #[test]
    fn test_quit() {
        let mut app = App::new();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
