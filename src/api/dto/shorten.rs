//! DTOs for the URL shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlRecord;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,
}

/// A created or reused short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    /// Normalized form of the submitted URL.
    pub original_url: String,
}

impl ShortenResponse {
    pub fn new(record: UrlRecord, short_url: String) -> Self {
        Self {
            short_code: record.code,
            short_url,
            original_url: record.original_url,
        }
    }
}
