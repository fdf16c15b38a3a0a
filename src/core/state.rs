//! # Application State
//!
//! Core browsing state. Domain logic only, no TUI types. Presentation state
//! (selection, scroll, the search buffer) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── view: ViewState           // what is on screen
//! ├── history: Vec<ViewState>   // back stack, most recent last
//! ├── categories: Vec<String>   // root list, derived from the collection
//! ├── categories_failed: bool   // last category load failed
//! ├── status_message: String    // status bar text
//! ├── error: Option<String>     // error panel text
//! ├── is_loading: bool          // a navigating request is in flight
//! └── pending: Option<RequestId>// the only request whose result we accept
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use log::debug;

use crate::api::Entry;

/// Upper bound on the back stack. The oldest view is dropped beyond this.
pub const MAX_HISTORY: usize = 64;

/// Identifies one asynchronous request so late answers can be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub u64);

/// Everything the main panel can show.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Categories,
    CategoryList { category: String, entries: Vec<Entry> },
    /// `term` is empty when browsing the whole collection.
    SearchResults { term: String, entries: Vec<Entry> },
    SingleItem(Entry),
}

impl ViewState {
    /// Heading for the main panel.
    pub fn title(&self) -> String {
        match self {
            ViewState::Categories => "Categories".to_string(),
            ViewState::CategoryList { category, .. } => category.clone(),
            ViewState::SearchResults { term, .. } if term.is_empty() => "All entries".to_string(),
            ViewState::SearchResults { term, .. } => format!("Results for \"{term}\""),
            ViewState::SingleItem(entry) => entry.name.clone(),
        }
    }

    /// The entry list backing this view, if it is a list of entries.
    pub fn entries(&self) -> Option<&[Entry]> {
        match self {
            ViewState::CategoryList { entries, .. } | ViewState::SearchResults { entries, .. } => {
                Some(entries.as_slice())
            }
            ViewState::Categories | ViewState::SingleItem(_) => None,
        }
    }
}

pub struct App {
    pub view: ViewState,
    pub history: Vec<ViewState>,
    pub categories: Vec<String>,
    /// The last category load failed and no retry is running.
    pub categories_failed: bool,
    pub status_message: String,
    pub error: Option<String>,
    pub is_loading: bool,
    next_request: u64,
    pending: Option<RequestId>,
}

impl App {
    pub fn new() -> Self {
        Self {
            view: ViewState::Categories,
            history: Vec::new(),
            categories: Vec::new(),
            categories_failed: false,
            status_message: String::from("Loading the compendium..."),
            error: None,
            is_loading: false,
            next_request: 0,
            pending: None,
        }
    }

    /// Shows `view`, remembering the current one for back-navigation.
    pub fn navigate(&mut self, view: ViewState) {
        let previous = std::mem::replace(&mut self.view, view);
        self.history.push(previous);
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
        debug!(
            "Navigated to '{}' (depth {})",
            self.view.title(),
            self.history.len()
        );
    }

    /// Restores the previous view. With an empty stack, falls back to the
    /// category root. Returns false when there was nowhere to go.
    pub fn go_back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.view = previous;
                true
            }
            None if self.view != ViewState::Categories => {
                self.view = ViewState::Categories;
                true
            }
            None => false,
        }
    }

    pub fn go_home(&mut self) {
        self.history.clear();
        self.view = ViewState::Categories;
    }

    /// Starts a navigating request. Any earlier one is superseded.
    pub fn begin_request(&mut self) -> RequestId {
        self.next_request += 1;
        let id = RequestId(self.next_request);
        self.pending = Some(id);
        self.is_loading = true;
        id
    }

    /// Accepts the answer to `id` if it is still the current request.
    pub fn finish_request(&mut self, id: RequestId) -> bool {
        if self.pending != Some(id) {
            debug!("Dropping stale result for {:?}", id);
            return false;
        }
        self.pending = None;
        self.is_loading = false;
        true
    }

    /// Abandons whatever request is in flight.
    pub fn cancel_request(&mut self) {
        self.pending = None;
        self.is_loading = false;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
