//! URL record entity representing a registered short link.

use chrono::{DateTime, Utc};

/// A shortened URL mapping.
///
/// `original_url` always holds the normalized form of the submitted URL, so it
/// doubles as the deduplication key. Records are immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: String,
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a record whose internal id equals its short code.
    pub fn new(code: String, original_url: String) -> Self {
        Self {
            id: code.clone(),
            code,
            original_url,
            created_at: Utc::now(),
        }
    }
}
