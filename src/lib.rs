//! # linkrank
//!
//! An in-memory URL shortener built with Axum that deduplicates links and
//! keeps a live ranking of the most shortened domains.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities, repository traits and the ranking worker
//! - **Application Layer** ([`application`]) - Shortening and ranking services
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory registry and ranking index
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - URL normalization and deduplication: equivalent URLs share one short code
//! - Block list and self-reference protection
//! - Top-K domain ranking maintained by an indexed max-heap
//! - Asynchronous ranking updates through a bounded queue with retry logic
//! - Structured logging and graceful shutdown
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="http://localhost:3000"
//! cargo run
//!
//! curl -X POST localhost:3000/api/v1/urls -H 'content-type: application/json' \
//!      -d '{"url": "https://github.com/golang/go"}'
//! curl localhost:3000/api/v1/metrics/domains?limit=3
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkService, RankingService};
    pub use crate::domain::entities::{DomainStat, UrlRecord};
    pub use crate::domain::repositories::{RankingRepository, UrlRepository};
    pub use crate::error::AppError;
    pub use crate::infrastructure::memory::{MemoryRankingRepository, MemoryUrlRepository};
    pub use crate::state::AppState;
}
