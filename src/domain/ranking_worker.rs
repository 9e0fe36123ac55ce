//! Background worker applying ranking increments.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::entities::DomainStat;
use crate::domain::ranking_event::RankingEvent;
use crate::domain::repositories::RankingRepository;
use crate::error::AppError;

const RETRY_BASE_MILLIS: u64 = 10;
const RETRY_MAX_DELAY: Duration = Duration::from_millis(500);

/// Consumes ranking events until every sender is dropped.
///
/// Each increment runs in its own task so a panicking repository is logged
/// and counted instead of stopping the worker. Events still queued when the
/// senders go away are applied before the function returns.
pub async fn run_ranking_worker<R>(
    mut rx: mpsc::Receiver<RankingEvent>,
    ranking: Arc<R>,
    max_retries: usize,
) where
    R: RankingRepository + 'static,
{
    tracing::info!(max_retries, "Ranking worker started");

    while let Some(event) = rx.recv().await {
        let repo = ranking.clone();
        let domain = event.domain.clone();
        let handle =
            tokio::spawn(async move { apply_increment(repo.as_ref(), &domain, max_retries).await });

        match handle.await {
            Ok(Ok(stat)) => {
                metrics::counter!("ranking_increments_total").increment(1);
                tracing::debug!(
                    domain = %stat.domain,
                    count = stat.count,
                    code = %event.code,
                    "Domain counted"
                );
            }
            Ok(Err(e)) => {
                metrics::counter!("ranking_increment_failures_total").increment(1);
                tracing::error!(
                    domain = %event.domain,
                    code = %event.code,
                    error = %e,
                    "Ranking increment failed after retries"
                );
            }
            Err(e) => {
                metrics::counter!("ranking_increment_failures_total").increment(1);
                tracing::error!(
                    domain = %event.domain,
                    code = %event.code,
                    error = %e,
                    "Ranking increment task panicked"
                );
            }
        }
    }

    tracing::info!("Ranking queue closed and drained, worker stopped");
}

/// Moves events that found the ranking queue full into it as capacity frees.
///
/// Runs until every overflow sender is dropped, holding its own ranking sender
/// so the worker keeps running until the overflow queue is drained. Events
/// left over after the ranking queue closes are applied directly.
pub async fn run_overflow_forwarder<R>(
    mut overflow_rx: mpsc::Receiver<RankingEvent>,
    ranking_tx: mpsc::Sender<RankingEvent>,
    ranking: Arc<R>,
    max_retries: usize,
) where
    R: RankingRepository,
{
    while let Some(event) = overflow_rx.recv().await {
        let Err(mpsc::error::SendError(event)) = ranking_tx.send(event).await else {
            continue;
        };

        tracing::error!(
            domain = %event.domain,
            code = %event.code,
            "Ranking queue closed, applying overflow event directly"
        );

        match apply_increment(ranking.as_ref(), &event.domain, max_retries).await {
            Ok(_) => metrics::counter!("ranking_increments_total").increment(1),
            Err(e) => {
                metrics::counter!("ranking_increment_failures_total").increment(1);
                tracing::error!(domain = %event.domain, error = %e, "Overflow increment failed");
            }
        }
    }

    tracing::debug!("Ranking overflow queue closed, forwarder stopped");
}

/// Increments `domain`, retrying failures with exponential backoff.
///
/// Makes at most `max_retries + 1` attempts.
///
/// # Errors
///
/// Returns the last error once the retries are exhausted.
pub async fn apply_increment<R>(
    ranking: &R,
    domain: &str,
    max_retries: usize,
) -> Result<DomainStat, AppError>
where
    R: RankingRepository + ?Sized,
{
    let strategy = ExponentialBackoff::from_millis(RETRY_BASE_MILLIS)
        .max_delay(RETRY_MAX_DELAY)
        .map(jitter)
        .take(max_retries);

    Retry::spawn(strategy, move || async move {
        ranking.increment_or_create(domain).await.inspect_err(|e| {
            tracing::warn!(domain, error = %e, "Ranking increment attempt failed");
        })
    })
    .await
}
