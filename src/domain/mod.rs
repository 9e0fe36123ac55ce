//! Domain layer containing business entities and contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`ranking_event`] - Domain counting event model
//! - [`ranking_worker`] - Asynchronous ranking worker
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; repository traits are implemented in [`crate::infrastructure`].
//!
//! # Ranking Flow
//!
//! 1. [`crate::application::services::LinkService`] saves a new record
//! 2. A [`ranking_event::RankingEvent`] is queued on a bounded channel
//! 3. [`ranking_worker::run_ranking_worker`] applies it with retry logic
//! 4. The counter is updated via [`repositories::RankingRepository`]

pub mod entities;
pub mod ranking_event;
pub mod ranking_worker;
pub mod repositories;
