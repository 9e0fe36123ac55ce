//! Ranking event model for asynchronous domain counting.

/// A newly registered URL whose domain must be counted.
///
/// Sent by [`crate::application::services::LinkService`] after a successful
/// save and consumed by [`crate::domain::ranking_worker::run_ranking_worker`],
/// so the create path never waits on the ranking index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEvent {
    pub domain: String,
    /// Short code of the record that triggered the event, for logging.
    pub code: String,
}

impl RankingEvent {
    pub fn new(domain: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            code: code.into(),
        }
    }
}
