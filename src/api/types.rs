use serde::{Deserialize, Serialize};

/// A single compendium entry.
///
/// The API returns more fields than we render (`dlc`, `properties`, ...).
/// Anything not named here is ignored during deserialization.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_locations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drops: Option<Vec<String>>,
}

impl Entry {
    /// Builds an entry with just the four core fields set.
    pub fn new(name: &str, category: &str, description: &str, image: &str) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            image: image.to_string(),
            id: None,
            common_locations: None,
            drops: None,
        }
    }

    /// Case-insensitive name comparison. Names are the entry identity.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Response wrapper used by every compendium endpoint.
///
/// `status` is the application status, independent of the HTTP status.
/// Only `200` carries usable `data`.
#[derive(Deserialize, Debug)]
pub struct Envelope<T> {
    pub status: u16,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}
