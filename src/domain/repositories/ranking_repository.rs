//! Repository trait for domain popularity counters.

use crate::domain::entities::DomainStat;
use crate::error::AppError;
use async_trait::async_trait;

/// Number of domains returned when a caller asks for zero.
pub const DEFAULT_TOP_K: usize = 3;

/// Per-domain counters with a top-K view.
///
/// Domains are ranked by count descending; equal counts are ordered by
/// domain name ascending.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::MemoryRankingRepository`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RankingRepository: Send + Sync {
    /// Adds one to the counter of `domain`, creating it at 1 if absent.
    ///
    /// Returns the counter after the increment.
    async fn increment_or_create(&self, domain: &str) -> Result<DomainStat, AppError>;

    /// Returns at most `k` domains in ranking order.
    ///
    /// A `k` of `0` uses [`DEFAULT_TOP_K`].
    async fn top_k(&self, k: usize) -> Result<Vec<DomainStat>, AppError>;

    /// Returns the counter of a single domain.
    async fn get(&self, domain: &str) -> Result<Option<DomainStat>, AppError>;

    /// Number of tracked domains.
    async fn len(&self) -> Result<usize, AppError>;
}
