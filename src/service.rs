//! Repository orchestration: search, favorites and relevance ranking.
//!
//! Every operation takes a [`CancellationToken`]. Cancellation is reported as
//! [`ServiceError::Cancelled`] and is never turned into an empty result.
//! Missing upstream records are not errors: they show up as `None` or are
//! left out of a listing.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::favorites::FavoritesStore;
use crate::github::RepositoryClient;
use crate::models::{RankedRepository, RepositoryId, RepositoryRecord};
use crate::relevance::RelevanceStrategy;

/// Upper bound on simultaneous upstream fetches while listing favorites.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("search query must not be empty")]
    EmptyQuery,
    #[error("operation cancelled")]
    Cancelled,
}

pub struct RepositoryService {
    client: Arc<dyn RepositoryClient>,
    favorites: Arc<FavoritesStore>,
    relevance: Arc<dyn RelevanceStrategy>,
    max_concurrent_fetches: usize,
}

impl RepositoryService {
    pub fn new(
        client: Arc<dyn RepositoryClient>,
        favorites: Arc<FavoritesStore>,
        relevance: Arc<dyn RelevanceStrategy>,
    ) -> Self {
        Self {
            client,
            favorites,
            relevance,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.max(1);
        self
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Search upstream by repository name. Results keep the upstream order and
    /// are all checked against one favorites snapshot.
    pub async fn search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<RankedRepository>, ServiceError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ServiceError::EmptyQuery);
        }
        ensure_active(cancel)?;

        let records = until_cancelled(cancel, self.client.search_by_name(query, cancel)).await?;
        let favorites: HashSet<RepositoryId> = self.favorites.list().into_iter().collect();

        Ok(records
            .into_iter()
            .map(|record| {
                let is_favorite = favorites.contains(&record.id);
                rank(self.relevance.as_ref(), record, is_favorite)
            })
            .collect())
    }

    /// Flip favorite membership for `id`. Returns `true` when it was added and
    /// `false` when it was removed. Retrying after a lost response inverts the
    /// outcome.
    ///
    /// The membership check and the mutation are two separate store calls:
    /// concurrent toggles of the same id may both report "added".
    pub async fn toggle_favorite(
        &self,
        id: RepositoryId,
        cancel: &CancellationToken,
    ) -> Result<bool, ServiceError> {
        ensure_active(cancel)?;

        if self.favorites.exists(id) {
            self.favorites.remove(id);
            tracing::info!("Favorite removed: {id} ({} left)", self.favorites.len());
            Ok(false)
        } else {
            self.favorites.add(id);
            tracing::info!("Favorite added: {id} ({} total)", self.favorites.len());
            Ok(true)
        }
    }

    /// Resolve every favorite upstream, at most `max_concurrent_fetches` at a
    /// time. Favorites that cannot be resolved are logged and skipped. Results
    /// follow the order of the favorites snapshot taken at the start.
    pub async fn list_favorites(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<RankedRepository>, ServiceError> {
        ensure_active(cancel)?;

        let ids = self.favorites.list();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!("Resolving {} favorites", ids.len());

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_fetches));
        let mut tasks = JoinSet::new();

        for (index, id) in ids.iter().copied().enumerate() {
            let client = self.client.clone();
            let relevance = self.relevance.clone();
            let semaphore = semaphore.clone();
            let cancel = cancel.clone();

            tasks.spawn(async move {
                let _permit = tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Err(ServiceError::Cancelled),
                    permit = semaphore.acquire_owned() => {
                        permit.map_err(|_| ServiceError::Cancelled)?
                    }
                };
                ensure_active(&cancel)?;

                let record = until_cancelled(&cancel, client.get_by_id(id, &cancel)).await?;
                Ok(FetchOutcome {
                    index,
                    id,
                    view: record.map(|r| rank(relevance.as_ref(), r, true)),
                })
            });
        }

        let mut resolved = Vec::with_capacity(ids.len());
        loop {
            let joined = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tasks.abort_all();
                    return Err(ServiceError::Cancelled);
                }
                joined = tasks.join_next() => joined,
            };
            let Some(joined) = joined else { break };

            match joined {
                Ok(Ok(FetchOutcome {
                    index,
                    view: Some(view),
                    ..
                })) => resolved.push((index, view)),
                Ok(Ok(FetchOutcome { id, view: None, .. })) => {
                    tracing::warn!("Favorite repository {id} not found upstream, skipping");
                }
                Ok(Err(ServiceError::Cancelled)) => {
                    tasks.abort_all();
                    return Err(ServiceError::Cancelled);
                }
                Ok(Err(e)) => tracing::error!("Favorite fetch failed: {e}"),
                Err(e) => tracing::error!("Favorite fetch task failed: {e}"),
            }
        }

        resolved.sort_by_key(|(index, _)| *index);
        Ok(resolved.into_iter().map(|(_, view)| view).collect())
    }

    /// Favorites (no query) or search results, by descending relevance. Equal
    /// scores keep their relative order.
    pub async fn list_by_relevance(
        &self,
        query: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Vec<RankedRepository>, ServiceError> {
        let mut ranked = match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => self.search(query, cancel).await?,
            None => self.list_favorites(cancel).await?,
        };
        ranked.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
        Ok(ranked)
    }

    /// Look up one repository. `Ok(None)` means upstream has no such repository.
    pub async fn get_by_id(
        &self,
        id: RepositoryId,
        cancel: &CancellationToken,
    ) -> Result<Option<RankedRepository>, ServiceError> {
        ensure_active(cancel)?;

        let Some(record) = until_cancelled(cancel, self.client.get_by_id(id, cancel)).await?
        else {
            return Ok(None);
        };
        let is_favorite = self.favorites.exists(record.id);
        Ok(Some(rank(self.relevance.as_ref(), record, is_favorite)))
    }
}

struct FetchOutcome {
    index: usize,
    id: RepositoryId,
    view: Option<RankedRepository>,
}

fn rank(
    relevance: &dyn RelevanceStrategy,
    record: RepositoryRecord,
    is_favorite: bool,
) -> RankedRepository {
    let score = relevance.score(
        record.stargazers_count,
        record.forks_count,
        record.watchers_count,
    );
    RankedRepository::assemble(record, score, is_favorite)
}

fn ensure_active(cancel: &CancellationToken) -> Result<(), ServiceError> {
    if cancel.is_cancelled() {
        Err(ServiceError::Cancelled)
    } else {
        Ok(())
    }
}

/// Race `fut` against cancellation. A result that lands after cancellation
/// is discarded so callers never mistake an aborted fetch for an empty one.
async fn until_cancelled<F: Future>(
    cancel: &CancellationToken,
    fut: F,
) -> Result<F::Output, ServiceError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ServiceError::Cancelled),
        output = fut => {
            ensure_active(cancel)?;
            Ok(output)
        }
    }
}
