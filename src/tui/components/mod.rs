//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: status line with back-stack depth
//! - `EntryCard`: single-entry detail view (scroll offset borrowed from `TuiState`)
//!
//! ### Stateful Components
//!
//! - `SearchBox`: query field, emits `SearchEvent`
//! - `EntryList`: selectable list for categories and entries, backed by `ListSelection`
//!
//! Each component file holds its state types, events, rendering, and tests.
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs    (top status line)
//! ├── search_box.rs   (query input)
//! ├── entry_list.rs   (category / entry lists)
//! └── entry_card.rs   (detail view)
//! ```

pub mod entry_card;
pub mod entry_list;
pub mod search_box;
mod title_bar;

pub use entry_card::EntryCard;
pub use entry_list::{EntryList, ListRow, ListSelection};
pub use search_box::{SearchBox, SearchEvent};
pub use title_bar::TitleBar;
