//! Short URL creation and resolution service.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::entities::UrlRecord;
use crate::domain::ranking_event::RankingEvent;
use crate::domain::repositories::{RankingRepository, UrlRepository};
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::UrlValidator;

/// Attempts at saving a fresh code before giving up.
const MAX_ATTEMPTS: usize = 5;

/// Service for creating and resolving shortened URLs.
///
/// Validates and normalizes input, deduplicates by normalized URL and queues
/// a ranking event for every newly registered URL.
pub struct LinkService<U: UrlRepository, R: RankingRepository> {
    url_repository: Arc<U>,
    ranking_repository: Arc<R>,
    ranking_tx: mpsc::Sender<RankingEvent>,
    overflow_tx: mpsc::Sender<RankingEvent>,
    validator: UrlValidator,
    base_url: String,
    code_length: usize,
}

impl<U, R> LinkService<U, R>
where
    U: UrlRepository,
    R: RankingRepository,
{
    /// Creates a new link service.
    ///
    /// Events that find `ranking_tx` full go to `overflow_tx`, which is drained
    /// by [`run_overflow_forwarder`](crate::domain::ranking_worker::run_overflow_forwarder).
    /// `ranking_repository` is only written to directly when both queues are
    /// unavailable.
    pub fn new(
        url_repository: Arc<U>,
        ranking_repository: Arc<R>,
        ranking_tx: mpsc::Sender<RankingEvent>,
        overflow_tx: mpsc::Sender<RankingEvent>,
        validator: UrlValidator,
        base_url: impl Into<String>,
        code_length: usize,
    ) -> Self {
        Self {
            url_repository,
            ranking_repository,
            ranking_tx,
            overflow_tx,
            validator,
            base_url: base_url.into(),
            code_length,
        }
    }

    /// Creates a short URL, or returns the existing one for the same resource.
    ///
    /// # Deduplication
    ///
    /// URLs are compared after normalization. A reused record does not count
    /// towards its domain's ranking, including when a concurrent request
    /// registered the URL first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is malformed, uses another
    /// scheme, points at this service or at a blocked domain.
    ///
    /// Returns [`AppError::Internal`] if no free code was found in
    /// `MAX_ATTEMPTS` tries.
    pub async fn create_short_url(&self, raw_url: &str) -> Result<UrlRecord, AppError> {
        let validated = self.validator.validate(raw_url)?;

        if let Some(existing) = self.find_existing(&validated.normalized_url).await? {
            return Ok(existing);
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let code = generate_code(self.code_length);
            let record = UrlRecord::new(code, validated.normalized_url.clone());

            match self.url_repository.save(record).await {
                Ok(saved) => {
                    metrics::counter!("links_created_total").increment(1);
                    tracing::info!(
                        code = %saved.code,
                        domain = %validated.domain,
                        "Short URL created"
                    );

                    self.dispatch_ranking(RankingEvent::new(
                        validated.domain.clone(),
                        saved.code.clone(),
                    ))
                    .await;

                    return Ok(saved);
                }
                Err(AppError::Conflict { .. }) => {
                    if let Some(winner) = self.find_existing(&validated.normalized_url).await? {
                        return Ok(winner);
                    }
                    tracing::debug!(attempt, "Short code collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": MAX_ATTEMPTS }),
        ))
    }

    /// Retrieves a record by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches the code.
    pub async fn get_url(&self, code: &str) -> Result<UrlRecord, AppError> {
        self.url_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Returns the redirect target of a short code.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        Ok(self.get_url(code).await?.original_url)
    }

    /// Removes a record by id.
    ///
    /// The domain ranking keeps counting the removed URL.
    pub async fn delete_url(&self, id: &str) -> Result<UrlRecord, AppError> {
        let removed = self.url_repository.delete(id).await?;
        tracing::info!(id = %removed.id, code = %removed.code, "Short URL deleted");
        Ok(removed)
    }

    /// Builds the public short URL for a code.
    pub fn generate_short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Number of registered URLs.
    pub async fn count_urls(&self) -> Result<usize, AppError> {
        self.url_repository.count().await
    }

    /// Whether the ranking worker has stopped accepting events.
    pub fn is_ranking_queue_closed(&self) -> bool {
        self.ranking_tx.is_closed()
    }

    /// Free slots in the ranking queue.
    pub fn ranking_queue_available(&self) -> usize {
        self.ranking_tx.capacity()
    }

    async fn find_existing(&self, normalized_url: &str) -> Result<Option<UrlRecord>, AppError> {
        let existing = self
            .url_repository
            .find_by_normalized_url(normalized_url)
            .await?;

        if let Some(record) = &existing {
            metrics::counter!("links_reused_total").increment(1);
            tracing::debug!(code = %record.code, "Reusing existing short URL");
        }

        Ok(existing)
    }

    /// Queues a ranking event without waiting for the worker.
    ///
    /// A full queue hands the event to the overflow queue, whose forwarder
    /// waits for capacity. When neither queue accepts the event the increment
    /// is applied here.
    async fn dispatch_ranking(&self, event: RankingEvent) {
        let event = match self.ranking_tx.try_send(event) {
            Ok(()) => return,
            Err(TrySendError::Full(event)) => event,
            Err(TrySendError::Closed(event)) => {
                apply_inline(
                    self.ranking_repository.as_ref(),
                    &event,
                    "Ranking queue closed",
                )
                .await;
                return;
            }
        };

        metrics::counter!("ranking_events_deferred_total").increment(1);

        match self.overflow_tx.try_send(event) {
            Ok(()) => {
                tracing::warn!("Ranking queue full, event handed to overflow queue");
            }
            Err(TrySendError::Full(event)) => {
                apply_inline(
                    self.ranking_repository.as_ref(),
                    &event,
                    "Ranking and overflow queues full",
                )
                .await;
            }
            Err(TrySendError::Closed(event)) => {
                apply_inline(
                    self.ranking_repository.as_ref(),
                    &event,
                    "Ranking overflow queue closed",
                )
                .await;
            }
        }
    }
}

async fn apply_inline<R: RankingRepository + ?Sized>(
    ranking: &R,
    event: &RankingEvent,
    reason: &str,
) {
    tracing::error!(
        domain = %event.domain,
        code = %event.code,
        reason,
        "Applying ranking increment inline"
    );

    match ranking.increment_or_create(&event.domain).await {
        Ok(_) => metrics::counter!("ranking_increments_total").increment(1),
        Err(e) => {
            metrics::counter!("ranking_increment_failures_total").increment(1);
            tracing::error!(domain = %event.domain, error = %e, "Inline ranking increment failed");
        }
    }
}
