//! In-memory repository implementations.
//!
//! Each structure owns its own `parking_lot::RwLock`; no lock is held across
//! an `.await`.

pub mod indexed_heap;
pub mod memory_ranking_repository;
pub mod memory_url_repository;

pub use indexed_heap::IndexedMaxHeap;
pub use memory_ranking_repository::MemoryRankingRepository;
pub use memory_url_repository::MemoryUrlRepository;
