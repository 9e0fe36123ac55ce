//! Per-domain shortening counter.

use serde::Serialize;

/// Number of distinct URLs registered for a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainStat {
    pub domain: String,
    pub count: u64,
}

impl DomainStat {
    pub fn new(domain: impl Into<String>, count: u64) -> Self {
        Self {
            domain: domain.into(),
            count,
        }
    }
}
