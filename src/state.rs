//! Shared application state injected into every handler.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::application::services::{LinkService, RankingService};
use crate::config::Config;
use crate::domain::ranking_worker::{run_overflow_forwarder, run_ranking_worker};
use crate::infrastructure::memory::{MemoryRankingRepository, MemoryUrlRepository};

pub type AppLinkService = LinkService<MemoryUrlRepository, MemoryRankingRepository>;
pub type AppRankingService = RankingService<MemoryRankingRepository>;

/// Services shared by all handlers.
///
/// Cloning is cheap. The ranking queue stays open as long as any clone of the
/// state is alive.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
    pub ranking_service: Arc<AppRankingService>,
}

impl AppState {
    pub fn new(link_service: Arc<AppLinkService>, ranking_service: Arc<AppRankingService>) -> Self {
        Self {
            link_service,
            ranking_service,
        }
    }

    /// Builds the in-memory repositories and services and spawns the ranking
    /// worker together with its overflow forwarder.
    ///
    /// The returned handle completes once every clone of the state has been
    /// dropped and both queues have been drained.
    pub fn start(config: &Config) -> (Self, JoinHandle<()>) {
        let url_repository = Arc::new(MemoryUrlRepository::new());
        let ranking_repository = Arc::new(MemoryRankingRepository::new());

        let (ranking_tx, ranking_rx) = mpsc::channel(config.ranking_queue_capacity);
        let (overflow_tx, overflow_rx) = mpsc::channel(config.ranking_queue_capacity);

        let forwarder = run_overflow_forwarder(
            overflow_rx,
            ranking_tx.clone(),
            ranking_repository.clone(),
            config.ranking_max_retries,
        );
        let worker = run_ranking_worker(
            ranking_rx,
            ranking_repository.clone(),
            config.ranking_max_retries,
        );
        let worker = tokio::spawn(async move {
            tokio::join!(forwarder, worker);
        });

        let link_service = Arc::new(LinkService::new(
            url_repository,
            ranking_repository.clone(),
            ranking_tx,
            overflow_tx,
            config.url_validator(),
            config.base_url.clone(),
            config.code_length,
        ));
        let ranking_service = Arc::new(RankingService::new(ranking_repository));

        (Self::new(link_service, ranking_service), worker)
    }
}
