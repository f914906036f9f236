use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::RepositoryClient;
use crate::config::GitHubConfig;
use crate::models::{RepositoryId, RepositoryRecord, SearchEnvelope};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// HTTP client for the public GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid GitHub user agent")?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build GitHub HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let url = format!("{}/{path}", self.base_url);

        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to call GitHub {path}"))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("GitHub {path} returned {status}: {body}");
        }

        let body = resp
            .json()
            .await
            .with_context(|| format!("Failed to parse GitHub {path} response"))?;
        Ok(Some(body))
    }
}

#[async_trait]
impl RepositoryClient for GitHubClient {
    async fn search_by_name(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Vec<RepositoryRecord> {
        let params = [("q", query)];
        let request = self.get_json::<SearchEnvelope>("search/repositories", &params);
        tokio::select! {
            () = cancel.cancelled() => Vec::new(),
            result = request => match result {
                Ok(envelope) => envelope.map(|e| e.items).unwrap_or_default(),
                Err(e) => {
                    tracing::warn!("GitHub search for {query:?} failed: {e:#}");
                    Vec::new()
                }
            },
        }
    }

    async fn get_by_id(
        &self,
        id: RepositoryId,
        cancel: &CancellationToken,
    ) -> Option<RepositoryRecord> {
        let path = format!("repositories/{id}");
        let request = self.get_json::<RepositoryRecord>(&path, &[]);
        tokio::select! {
            () = cancel.cancelled() => None,
            result = request => match result {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("GitHub lookup of repository {id} failed: {e:#}");
                    None
                }
            },
        }
    }
}
