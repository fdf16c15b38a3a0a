pub mod client;
pub mod source;
pub mod types;

pub use client::HttpSource;
pub use source::{ApiError, CompendiumSource};
pub use types::{Entry, Envelope};
