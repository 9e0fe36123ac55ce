//! DTOs for the top domains endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::DomainStat;

/// Query parameters of `GET /api/v1/metrics/domains`.
///
/// `limit` is kept as raw text so that malformed values fall back to the
/// default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct TopDomainsQuery {
    pub limit: Option<String>,
}

impl TopDomainsQuery {
    /// Parsed limit; `0` when missing, unparsable or not positive.
    pub fn requested_limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|&limit| limit > 0)
            .and_then(|limit| usize::try_from(limit).ok())
            .unwrap_or(0)
    }
}

#[derive(Debug, Serialize)]
pub struct TopDomainsResponse {
    pub top_domains: Vec<DomainStat>,
    /// Limit actually applied.
    pub limit: usize,
}
