use std::fmt;

use async_trait::async_trait;

use super::types::Entry;

/// Errors that can occur while talking to the compendium.
///
/// `Clone` so a single in-flight fetch can hand the same failure to every
/// caller waiting on it.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Transport(String),
    /// The envelope carried a non-200 `status`.
    Application { status: u16, message: String },
    /// The response body was not the JSON we expected.
    Parse(String),
}

impl ApiError {
    /// True when the compendium said the thing does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Application { status: 404, .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "network error: {msg}"),
            ApiError::Application { status, message } => {
                write!(f, "compendium error ({status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Where entries come from. The HTTP client implements this; tests plug in
/// an in-memory source.
#[async_trait]
pub trait CompendiumSource: Send + Sync {
    /// Returns the name of the source, for logging.
    fn name(&self) -> &str;

    /// Every entry in the compendium.
    async fn fetch_all(&self) -> Result<Vec<Entry>, ApiError>;

    /// Entries belonging to one category.
    async fn fetch_category(&self, category: &str) -> Result<Vec<Entry>, ApiError>;

    /// A single entry looked up by name.
    async fn fetch_entry(&self, name: &str) -> Result<Entry, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ApiError::Transport("connection refused".into()).to_string(),
            "network error: connection refused"
        );
        assert_eq!(
            ApiError::Application {
                status: 404,
                message: "no results".into()
            }
            .to_string(),
            "compendium error (404): no results"
        );
    }

    #[test]
    fn test_not_found_only_for_404() {
        let missing = ApiError::Application {
            status: 404,
            message: String::new(),
        };
        let broken = ApiError::Application {
            status: 500,
            message: String::new(),
        };
        assert!(missing.is_not_found());
        assert!(!broken.is_not_found());
        assert!(!ApiError::Parse("eof".into()).is_not_found());
    }
}
