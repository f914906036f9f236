use std::sync::Arc;

use crate::config::Config;
use crate::favorites::FavoritesStore;
use crate::github::{GitHubClient, RepositoryClient};
use crate::relevance::DefaultRelevance;
use crate::service::RepositoryService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub service: Arc<RepositoryService>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = GitHubClient::new(&config.github)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Build state around any repository client. Favorites start empty.
    pub fn with_client(config: Config, client: Arc<dyn RepositoryClient>) -> Self {
        let service = RepositoryService::new(
            client,
            Arc::new(FavoritesStore::new()),
            Arc::new(DefaultRelevance),
        )
        .with_max_concurrent_fetches(config.max_concurrent_fetches);

        Self {
            config,
            service: Arc::new(service),
        }
    }
}
