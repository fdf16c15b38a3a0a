//! # Core Application Logic
//!
//! The browser's business logic. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (views, stack) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • search (finder)      │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  Provider  │
//!     │  Adapter   │ ── performs Effects ───▶ │  (cache +  │
//!     │ (ratatui)  │                          │   HTTP)    │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `App` and `ViewState`, all browsing state in one place
//! - [`action`]: `Action`, `Effect` and the `update()` transition function
//! - [`search`]: sorting and name matching over entries
//! - [`provider`]: fetch-once cache over a `CompendiumSource`
//! - [`config`]: settings resolution

pub mod action;
pub mod config;
pub mod provider;
pub mod search;
pub mod state;
