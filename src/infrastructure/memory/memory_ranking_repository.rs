//! In-memory implementation of the ranking repository.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::entities::DomainStat;
use crate::domain::repositories::{DEFAULT_TOP_K, RankingRepository};
use crate::error::AppError;
use crate::infrastructure::memory::IndexedMaxHeap;

/// Domain counters kept in an [`IndexedMaxHeap`] behind a single lock.
///
/// Increments take the write lock for one `O(log n)` sift; top-K queries
/// share the read lock and never reorder the heap.
#[derive(Debug, Default)]
pub struct MemoryRankingRepository {
    heap: RwLock<IndexedMaxHeap<String>>,
}

impl MemoryRankingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RankingRepository for MemoryRankingRepository {
    async fn increment_or_create(&self, domain: &str) -> Result<DomainStat, AppError> {
        let count = self.heap.write().increment(domain);
        Ok(DomainStat::new(domain, count))
    }

    async fn top_k(&self, k: usize) -> Result<Vec<DomainStat>, AppError> {
        let k = if k == 0 { DEFAULT_TOP_K } else { k };

        let top = self.heap.read().top_k(k);
        Ok(top
            .into_iter()
            .map(|(domain, count)| DomainStat { domain, count })
            .collect())
    }

    async fn get(&self, domain: &str) -> Result<Option<DomainStat>, AppError> {
        Ok(self
            .heap
            .read()
            .get(domain)
            .map(|count| DomainStat::new(domain, count)))
    }

    async fn len(&self) -> Result<usize, AppError> {
        Ok(self.heap.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    async fn seeded(counts: &[(&str, u64)]) -> MemoryRankingRepository {
        let repo = MemoryRankingRepository::new();
        for &(domain, count) in counts {
            for _ in 0..count {
                repo.increment_or_create(domain).await.unwrap();
            }
        }
        repo
    }

    #[tokio::test]
    async fn increment_returns_new_count() {
        let repo = MemoryRankingRepository::new();

        let first = repo.increment_or_create("github.com").await.unwrap();
        let second = repo.increment_or_create("github.com").await.unwrap();

        assert_eq!(first, DomainStat::new("github.com", 1));
        assert_eq!(second, DomainStat::new("github.com", 2));
        assert_eq!(repo.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn top_k_limits_and_orders() {
        let repo = seeded(&[("A", 5), ("B", 10), ("C", 3), ("D", 7)]).await;

        let top2 = repo.top_k(2).await.unwrap();
        assert_eq!(top2, vec![DomainStat::new("B", 10), DomainStat::new("D", 7)]);

        let all = repo.top_k(10).await.unwrap();
        let counts: Vec<u64> = all.iter().map(|s| s.count).collect();
        assert_eq!(counts, vec![10, 7, 5, 3]);
    }

    #[tokio::test]
    async fn top_k_zero_uses_default() {
        let repo = seeded(&[("A", 5), ("B", 10), ("C", 3), ("D", 7)]).await;

        let zero = repo.top_k(0).await.unwrap();
        assert_eq!(zero, repo.top_k(3).await.unwrap());
        assert_eq!(zero.len(), 3);
    }

    #[tokio::test]
    async fn get_missing_domain() {
        let repo = MemoryRankingRepository::new();
        assert!(repo.get("nowhere.org").await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_increments_are_not_lost() {
        let repo = Arc::new(MemoryRankingRepository::new());
        let domains = ["a.com", "b.com", "c.com", "d.com"];

        let mut handles = Vec::new();
        for task in 0..32 {
            let repo = repo.clone();
            let domain = domains[task % domains.len()];
            handles.push(tokio::spawn(async move {
                for _ in 0..250 {
                    repo.increment_or_create(domain).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        for domain in domains {
            let stat = repo.get(domain).await.unwrap().unwrap();
            assert_eq!(stat.count, 8 * 250);
        }
        let top = repo.top_k(4).await.unwrap();
        let names: Vec<&str> = top.iter().map(|s| s.domain.as_str()).collect();
        assert_eq!(names, vec!["a.com", "b.com", "c.com", "d.com"]);
    }
}
