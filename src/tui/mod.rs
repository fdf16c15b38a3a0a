//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into `core::Action` values, and performs the
//! `Effect`s that `update()` asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Requests
//!
//! Every effect that needs the network runs on its own tokio task and reports
//! back by sending an `Action` over a std channel that the event loop drains
//! between frames. Only the most recent navigating request is kept alive;
//! Esc, Back, and Home abort it. Results that still slip through are dropped
//! by the core's request-id check.
//!
//! ## Redraw Strategy
//!
//! The loop polls quickly (50ms) while a task is outstanding so results show
//! up promptly, and sleeps up to 500ms otherwise. It only redraws after an
//! event or an action.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use tokio::task::AbortHandle;
use tui_scrollview::ScrollViewState;

use crate::api::HttpSource;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::provider::DataProvider;
use crate::core::search::{categories, resolve_query};
use crate::core::state::{App, ViewState};
use crate::tui::component::EventHandler;
use crate::tui::components::{ListSelection, SearchBox, SearchEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_box: SearchBox,
    /// Selection in whichever list is on screen
    pub selection: ListSelection,
    /// Scroll offset of the detail card
    pub card_scroll: ScrollViewState,
    /// Saved selections, one per view on the core back stack
    selection_stack: Vec<usize>,
    /// Depth and title of the view the state above belongs to
    shown: (usize, String),
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            search_box: SearchBox::new(),
            selection: ListSelection::new(),
            card_scroll: ScrollViewState::default(),
            selection_stack: Vec::new(),
            shown: (0, ViewState::Categories.title()),
        }
    }

    /// Keeps list selection in step with the core back stack: going deeper
    /// starts a fresh selection, going back restores the one left behind.
    pub fn sync_with(&mut self, app: &App) {
        let depth = app.history.len();
        let title = app.view.title();
        if self.shown.0 == depth && self.shown.1 == title {
            return;
        }

        if depth < self.shown.0 {
            let restored = self.selection_stack.get(depth).copied().unwrap_or(0);
            self.selection_stack.truncate(depth);
            self.selection = ListSelection::at(restored);
        } else {
            self.selection_stack.push(self.selection.selected);
            let excess = self.selection_stack.len().saturating_sub(depth);
            self.selection_stack.drain(..excess);
            self.selection = ListSelection::new();
        }
        self.card_scroll = ScrollViewState::default();
        self.shown = (depth, title);
    }

    /// Number of selectable rows in the current view.
    fn list_len(&self, app: &App) -> usize {
        match &app.view {
            ViewState::Categories => app.categories.len(),
            view => view.entries().map_or(0, <[_]>::len),
        }
    }

    /// The action that opens the selected row, if any.
    fn open_selected(&self, app: &App) -> Option<Action> {
        let index = self.selection.selected;
        match &app.view {
            ViewState::Categories => app.categories.get(index).cloned().map(Action::SelectCategory),
            ViewState::SingleItem(_) => None,
            view => view
                .entries()
                .and_then(|entries| entries.get(index))
                .cloned()
                .map(Action::SelectEntry),
        }
    }

    /// Translates one terminal event into at most one core action, applying
    /// purely presentational changes (typing, selection, scrolling) directly.
    pub fn handle_event(&mut self, event: &TuiEvent, app: &App) -> Option<Action> {
        let in_card = matches!(app.view, ViewState::SingleItem(_));
        let buffer_empty = self.search_box.is_empty();

        match event {
            TuiEvent::ForceQuit => Some(Action::Quit),
            TuiEvent::BrowseAll => Some(Action::BrowseAll),
            TuiEvent::GoHome => Some(Action::Home),
            TuiEvent::Reload => Some(Action::Init),
            TuiEvent::Resize => None,

            // Esc unwinds one layer at a time: request, query text, view.
            TuiEvent::Escape if app.is_loading => Some(Action::Cancel),
            TuiEvent::Escape if !buffer_empty => {
                self.search_box.clear();
                None
            }
            TuiEvent::Escape => Some(Action::Back),

            TuiEvent::Submit if buffer_empty => self.open_selected(app),
            TuiEvent::CursorRight if buffer_empty => self.open_selected(app),
            TuiEvent::Backspace | TuiEvent::CursorLeft if buffer_empty => Some(Action::Back),

            TuiEvent::CursorUp if in_card => {
                self.card_scroll.scroll_up();
                None
            }
            TuiEvent::CursorDown if in_card => {
                self.card_scroll.scroll_down();
                None
            }
            TuiEvent::PageUp if in_card => {
                self.card_scroll.scroll_page_up();
                None
            }
            TuiEvent::PageDown if in_card => {
                self.card_scroll.scroll_page_down();
                None
            }
            TuiEvent::CursorUp => {
                self.selection.up(self.list_len(app));
                None
            }
            TuiEvent::CursorDown => {
                self.selection.down(self.list_len(app));
                None
            }
            TuiEvent::PageUp => {
                self.selection.page_up(self.list_len(app));
                None
            }
            TuiEvent::PageDown => {
                self.selection.page_down(self.list_len(app));
                None
            }

            _ => match self.search_box.handle_event(event)? {
                SearchEvent::Submit(term) => Some(Action::Submit(term)),
                SearchEvent::ContentChanged => None,
            },
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for the search box
            SetCursorStyle::SteadyBlock  // Non-blinking: avoids blink timer reset from redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Background tasks the loop is waiting on.
#[derive(Default)]
struct Tasks {
    categories: Option<AbortHandle>,
    request: Option<AbortHandle>,
}

impl Tasks {
    fn busy(&self) -> bool {
        [&self.categories, &self.request]
            .into_iter()
            .flatten()
            .any(|handle| !handle.is_finished())
    }

    fn abort_request(&mut self) {
        if let Some(handle) = self.request.take() {
            debug!("Aborting request in flight");
            handle.abort();
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source = HttpSource::new(&config.base_url, config.timeout)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    info!("Using compendium at {}", config.base_url);
    let provider = Arc::new(DataProvider::new(Arc::new(source)));

    let mut app = App::new();
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut tasks = Tasks::default();

    let mut should_quit = dispatch(&mut app, Action::Init, &provider, &tx, &mut tasks);
    let mut needs_redraw = true;

    while !should_quit {
        tui.sync_with(&app);
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if tasks.busy() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            let Some(action) = tui.handle_event(&event, &app) else {
                continue;
            };
            if dispatch(&mut app, action, &provider, &tx, &mut tasks) {
                should_quit = true;
                break;
            }
            // Selection must follow the view before the next key is read.
            tui.sync_with(&app);
        }

        // Handle background task actions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &provider, &tx, &mut tasks) {
                should_quit = true;
            }
        }
    }

    tasks.abort_request();
    ratatui::restore();
    info!("Compendium browser exited");
    Ok(())
}

/// Applies `action` and performs the resulting effect. Returns true on quit.
fn dispatch(
    app: &mut App,
    action: Action,
    provider: &Arc<DataProvider>,
    tx: &mpsc::Sender<Action>,
    tasks: &mut Tasks,
) -> bool {
    if matches!(action, Action::Cancel | Action::Back | Action::Home) {
        tasks.abort_request();
    }

    match update(app, action) {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::LoadCategories => {
            tasks.categories = Some(spawn_action(tx.clone(), {
                let provider = provider.clone();
                async move {
                    match provider.fetch_all().await {
                        Ok(all) => Action::CategoriesLoaded(categories(&all)),
                        Err(error) => Action::CategoriesFailed(error),
                    }
                }
            }));
        }
        Effect::FetchCategory { request, category } => {
            tasks.abort_request();
            tasks.request = Some(spawn_action(tx.clone(), {
                let provider = provider.clone();
                async move {
                    match provider.fetch_by_category(&category).await {
                        Ok(entries) => Action::CategoryLoaded {
                            request,
                            category,
                            entries,
                        },
                        Err(error) => Action::RequestFailed { request, error },
                    }
                }
            }));
        }
        Effect::FetchEntry { request, name } => {
            tasks.abort_request();
            tasks.request = Some(spawn_action(tx.clone(), {
                let provider = provider.clone();
                async move {
                    match provider.fetch_by_name(&name).await {
                        Ok(entry) => Action::EntryLoaded { request, entry },
                        Err(error) => Action::RequestFailed { request, error },
                    }
                }
            }));
        }
        Effect::RunSearch { request, term } => {
            tasks.abort_request();
            if let Some(all) = provider.cached() {
                debug!("Searching cached collection for '{}'", term);
                let outcome = resolve_query(&term, &all);
                let resolved = Action::SearchResolved {
                    request,
                    term,
                    outcome,
                };
                return dispatch(app, resolved, provider, tx, tasks);
            }
            tasks.request = Some(spawn_action(tx.clone(), {
                let provider = provider.clone();
                async move {
                    match provider.fetch_all().await {
                        Ok(all) => {
                            let outcome = resolve_query(&term, &all);
                            Action::SearchResolved {
                                request,
                                term,
                                outcome,
                            }
                        }
                        Err(error) => Action::RequestFailed { request, error },
                    }
                }
            }));
        }
    }
    false
}

/// Runs `work` on the runtime and posts its resulting action to the loop.
fn spawn_action<F>(tx: mpsc::Sender<Action>, work: F) -> AbortHandle
where
    F: Future<Output = Action> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let action = work.await;
        if tx.send(action).is_err() {
            warn!("Failed to send action: receiver dropped");
        }
    });
    handle.abort_handle()
}
