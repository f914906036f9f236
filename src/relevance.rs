//! Relevance scoring from popularity metrics.
//!
//! Each metric is dampened with `log10(1 + n)` so very popular repositories
//! don't crowd the top of the range, then combined with fixed weights and
//! normalized to an integer in `0..=100`.

const STARS_WEIGHT: f64 = 0.6;
const FORKS_WEIGHT: f64 = 0.3;
const WATCHERS_WEIGHT: f64 = 0.1;

/// Expected maximum raw score: `log10(200_000) ≈ 5.3`, roughly the star count
/// of the most-starred public repositories. Inputs above it clamp to 100.
const MAX_RAW_SCORE: f64 = 5.3;

/// Pluggable scoring policy used by the repository service.
pub trait RelevanceStrategy: Send + Sync {
    fn score(&self, stars: u64, forks: u64, watchers: u64) -> u8;
}

/// Weighted log-scale scoring (see [`relevance_score`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRelevance;

impl RelevanceStrategy for DefaultRelevance {
    fn score(&self, stars: u64, forks: u64, watchers: u64) -> u8 {
        relevance_score(stars, forks, watchers)
    }
}

/// Score a repository from its star, fork and watcher counts. Always in `0..=100`.
pub fn relevance_score(stars: u64, forks: u64, watchers: u64) -> u8 {
    let raw = STARS_WEIGHT * dampen(stars)
        + FORKS_WEIGHT * dampen(forks)
        + WATCHERS_WEIGHT * dampen(watchers);

    let normalized = (raw / MAX_RAW_SCORE * 100.0).round();
    normalized.clamp(0.0, 100.0) as u8
}

fn dampen(count: u64) -> f64 {
    (1.0 + count as f64).log10()
}
