//! Core domain entities.
//!
//! - [`UrlRecord`] - A registered short link
//! - [`DomainStat`] - Popularity counter of a destination domain
//!
//! Entities are plain data structures without business logic.

pub mod domain_stat;
pub mod url_record;

pub use domain_stat::DomainStat;
pub use url_record::UrlRecord;
