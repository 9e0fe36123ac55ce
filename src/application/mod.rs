//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls, validation and the ranking queue,
//! and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short URL creation, resolution and deletion
//! - [`services::ranking_service::RankingService`] - Top domain queries

pub mod services;
