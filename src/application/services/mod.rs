//! Business logic services for the application layer.

pub mod link_service;
pub mod ranking_service;

pub use link_service::LinkService;
pub use ranking_service::RankingService;
