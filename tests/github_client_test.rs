//! GitHub client tests against a local mock server.

use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use repo_favorites::config::GitHubConfig;
use repo_favorites::github::{GitHubClient, RepositoryClient};

fn client_for(server: &MockServer) -> GitHubClient {
    let config = GitHubConfig {
        base_url: server.uri(),
        user_agent: "repo-favorites-tests".to_string(),
        timeout_secs: 5,
    };
    GitHubClient::new(&config).unwrap()
}

fn repo_json(id: u64, name: &str, stars: u64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "full_name": format!("owner/{name}"),
        "html_url": format!("https://github.com/owner/{name}"),
        "description": null,
        "stargazers_count": stars,
        "forks_count": 2,
        "watchers_count": stars,
        "private": false
    })
}

#[tokio::test]
async fn test_search_parses_items_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "tokio runtime"))
        .and(header("user-agent", "repo-favorites-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 2,
            "incomplete_results": false,
            "items": [repo_json(2, "tokio", 25000), repo_json(1, "mini-tokio", 40)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let results = client
        .search_by_name("tokio runtime", &CancellationToken::new())
        .await;

    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["tokio", "mini-tokio"]);
    assert_eq!(results[0].stargazers_count, 25000);
    assert_eq!(results[0].full_name, "owner/tokio");
}

#[tokio::test]
async fn test_search_failure_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let results = client.search_by_name("rust", &CancellationToken::new()).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_malformed_body_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client
        .search_by_name("rust", &CancellationToken::new())
        .await
        .is_empty());
}

#[tokio::test]
async fn test_get_by_id_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repositories/724712"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_json(724712, "rust", 100)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let record = client
        .get_by_id(724712, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(record.id, 724712);
    assert_eq!(record.forks_count, 2);
}

#[tokio::test]
async fn test_get_by_id_not_found_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repositories/1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.get_by_id(1, &CancellationToken::new()).await.is_none());
}

#[tokio::test]
async fn test_get_by_id_cancelled_mid_flight() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repositories/9"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(repo_json(9, "slow", 1))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    assert!(client.get_by_id(9, &cancel).await.is_none());
    assert!(started.elapsed() < Duration::from_secs(2));
}
