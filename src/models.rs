use serde::{Deserialize, Serialize};

/// Numeric repository identifier assigned by GitHub.
pub type RepositoryId = u64;

/// A repository as returned by the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub id: RepositoryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
}

/// Envelope of `GET /search/repositories`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub items: Vec<RepositoryRecord>,
}

/// A repository as presented to callers: the record's fields plus a relevance
/// score and whether it is currently a favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRepository {
    pub id: RepositoryId,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub relevance_score: u8,
    pub is_favorite: bool,
}

impl RankedRepository {
    /// Build a view from a record. The score must come from this record's own counts.
    pub fn assemble(record: RepositoryRecord, relevance_score: u8, is_favorite: bool) -> Self {
        Self {
            id: record.id,
            name: record.name,
            full_name: record.full_name,
            html_url: record.html_url,
            description: record.description,
            stars: record.stargazers_count,
            forks: record.forks_count,
            watchers: record.watchers_count,
            relevance_score,
            is_favorite,
        }
    }
}

/// Query string for the search and relevance endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryQuery {
    #[serde(rename = "repositoryName")]
    pub repository_name: Option<String>,
}

/// Response of the favorite toggle endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub id: RepositoryId,
    pub is_favorite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_parses_github_payload() {
        let json = r#"{
            "id": 724712,
            "name": "rust",
            "full_name": "rust-lang/rust",
            "html_url": "https://github.com/rust-lang/rust",
            "description": "Empowering everyone to build reliable and efficient software.",
            "stargazers_count": 100000,
            "forks_count": 12000,
            "watchers_count": 100000,
            "private": false
        }"#;
        let record: RepositoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 724712);
        assert_eq!(record.full_name, "rust-lang/rust");
        assert_eq!(record.forks_count, 12000);
    }

    #[test]
    fn test_record_null_description() {
        let json = r#"{"id": 1, "name": "a", "full_name": "o/a", "html_url": "u", "description": null}"#;
        let record: RepositoryRecord = serde_json::from_str(json).unwrap();
        assert!(record.description.is_none());
        assert_eq!(record.stargazers_count, 0);
    }

    #[test]
    fn test_ranked_repository_serializes_camel_case() {
        let record = RepositoryRecord {
            id: 7,
            name: "tokio".to_string(),
            full_name: "tokio-rs/tokio".to_string(),
            html_url: "https://github.com/tokio-rs/tokio".to_string(),
            description: None,
            stargazers_count: 3,
            forks_count: 2,
            watchers_count: 1,
        };
        let json = serde_json::to_value(RankedRepository::assemble(record, 42, true)).unwrap();
        assert_eq!(json["fullName"], "tokio-rs/tokio");
        assert_eq!(json["htmlUrl"], "https://github.com/tokio-rs/tokio");
        assert_eq!(json["relevanceScore"], 42);
        assert_eq!(json["isFavorite"], true);
        assert_eq!(json["stars"], 3);
    }
}
