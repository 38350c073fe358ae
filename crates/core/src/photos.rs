//! Photo reference normalization.
//!
//! Clients send photo references in several shapes: a JSON array of URI
//! strings, a single URI string, or a string that itself contains a JSON
//! array (the upload form serializes it that way). The store always
//! persists an ordered list, so every inbound shape is normalized here
//! before it reaches the database.

use serde::Deserialize;

/// Inbound photo payload accepted by the event endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PhotoInput {
    Many(Vec<String>),
    One(String),
}

/// Normalize an optional photo payload into an ordered list of URIs.
///
/// - `None` becomes an empty list.
/// - A single string that parses as a JSON array is expanded; any other
///   non-empty string becomes a one-element list.
/// - Blank entries are dropped; order is preserved.
pub fn normalize(input: Option<PhotoInput>) -> Vec<String> {
    let raw = match input {
        None => return Vec::new(),
        Some(PhotoInput::Many(list)) => list,
        Some(PhotoInput::One(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Vec::new();
            }
            match serde_json::from_str::<Vec<String>>(trimmed) {
                Ok(list) => list,
                Err(_) => vec![s],
            }
        }
    };

    raw.into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}
