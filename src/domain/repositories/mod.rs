//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::memory`. Mock implementations are generated via
//! `mockall` for service tests.
//!
//! # Available Repositories
//!
//! - [`UrlRepository`] - Short link registry with deduplication
//! - [`RankingRepository`] - Domain popularity counters and ranking

pub mod ranking_repository;
pub mod url_repository;

pub use ranking_repository::{DEFAULT_TOP_K, RankingRepository};
pub use url_repository::UrlRepository;

#[cfg(test)]
pub use ranking_repository::MockRankingRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
