//! Read side of the domain popularity ranking.

use std::sync::Arc;

use crate::domain::entities::DomainStat;
use crate::domain::repositories::{DEFAULT_TOP_K, RankingRepository};
use crate::error::AppError;

/// Service answering top-domain queries.
///
/// Writes reach the ranking through [`crate::domain::ranking_worker`], never
/// through this service.
pub struct RankingService<R: RankingRepository> {
    repository: Arc<R>,
}

impl<R: RankingRepository> RankingService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the `limit` most shortened domains, most popular first.
    ///
    /// A `limit` of `0` uses [`DEFAULT_TOP_K`]. Fewer entries are returned
    /// when fewer domains are tracked.
    pub async fn top_domains(&self, limit: usize) -> Result<Vec<DomainStat>, AppError> {
        let limit = effective_limit(limit);
        let top = self.repository.top_k(limit).await?;

        tracing::debug!(limit, returned = top.len(), "Top domains computed");
        Ok(top)
    }

    /// Counter of a single domain, `0` if it was never shortened.
    pub async fn domain_count(&self, domain: &str) -> Result<u64, AppError> {
        Ok(self
            .repository
            .get(domain)
            .await?
            .map_or(0, |stat| stat.count))
    }

    /// Number of distinct domains seen so far.
    pub async fn tracked_domains(&self) -> Result<usize, AppError> {
        self.repository.len().await
    }
}

/// Maps a requested limit to the one actually applied.
pub fn effective_limit(limit: usize) -> usize {
    if limit == 0 { DEFAULT_TOP_K } else { limit }
}
