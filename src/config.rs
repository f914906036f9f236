use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Upstream GitHub API settings
    pub github: GitHubConfig,
    /// Maximum simultaneous repository fetches when listing favorites
    pub max_concurrent_fetches: usize,
    /// Deadline for a single inbound request, in seconds
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Base URL of the REST API, without a trailing slash
    pub base_url: String,
    /// GitHub rejects requests without a User-Agent
    pub user_agent: String,
    /// Per-request HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:9000".to_string(),
            github: GitHubConfig::default(),
            max_concurrent_fetches: 8,
            request_timeout_secs: 30,
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            user_agent: concat!("repo-favorites/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unparseable numbers
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("REPO_FAVORITES_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(url) = lookup("GITHUB_API_BASE_URL") {
            config.github.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(agent) = lookup("GITHUB_USER_AGENT") {
            config.github.user_agent = agent;
        }
        if let Some(val) = lookup("GITHUB_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.github.timeout_secs = v;
            }
        }
        if let Some(val) = lookup("REPO_FAVORITES_MAX_CONCURRENT_FETCHES") {
            if let Ok(v) = val.parse::<usize>() {
                config.max_concurrent_fetches = v.max(1);
            }
        }
        if let Some(val) = lookup("REPO_FAVORITES_REQUEST_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.request_timeout_secs = v;
            }
        }

        config
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}
