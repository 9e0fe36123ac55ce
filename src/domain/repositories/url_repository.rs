//! Repository trait for the URL registry.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Registry of short links, indexed by id, short code and normalized URL.
///
/// Implementations keep the three indices consistent with each other: a
/// reader never sees a code or URL that resolves to a missing record.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::MemoryUrlRepository`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Stores a new record in every index.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if:
    /// - The id or short code already exists
    /// - The normalized URL is already registered
    async fn save(&self, record: UrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by its internal id.
    async fn find_by_id(&self, id: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds the record registered for a normalized URL.
    ///
    /// Used to deduplicate create requests.
    async fn find_by_normalized_url(&self, url: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Removes a record from every index and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this id.
    async fn delete(&self, id: &str) -> Result<UrlRecord, AppError>;

    /// Number of registered records.
    async fn count(&self) -> Result<usize, AppError>;
}
