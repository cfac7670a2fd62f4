//! HTTP scenarios: a real server on an ephemeral port, wiremock standing in
//! for the upstream fetch API.

mod common;

use std::time::Duration;

use serde_json::{json, Value};
use serp_proxy::server::ProxyServer;
use serp_proxy::{Options, ProxyConfig};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn config_for(upstream: &MockServer, token: Option<&str>) -> ProxyConfig {
    ProxyConfig {
        api_token: token.map(str::to_string),
        endpoint: format!("{}/request", upstream.uri()),
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ProxyConfig::default()
    }
}

async fn start(config: ProxyConfig) -> (ProxyServer, String) {
    let server = match ProxyServer::start(config, Options::default()).await {
        Ok(server) => server,
        Err(err) => panic!("server failed to start: {err:?}"),
    };
    let base = format!("http://{}", server.addr());
    (server, base)
}

async fn json_of(response: reqwest::Response) -> Value {
    match response.json::<Value>().await {
        Ok(value) => value,
        Err(err) => panic!("response was not JSON: {err}"),
    }
}

async fn post_json(url: &str, body: Value) -> reqwest::Response {
    match reqwest::Client::new().post(url).json(&body).send().await {
        Ok(response) => response,
        Err(err) => panic!("request failed: {err}"),
    }
}

async fn get(url: &str) -> reqwest::Response {
    match reqwest::get(url).await {
        Ok(response) => response,
        Err(err) => panic!("request failed: {err}"),
    }
}

#[tokio::test]
async fn health_reports_config_without_token() {
    let upstream = MockServer::start().await;
    let (_server, base) = start(config_for(&upstream, Some(TOKEN))).await;

    let response = get(&format!("{base}/health")).await;
    assert_eq!(response.status(), 200);
    let body = json_of(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["config"]["hasToken"], true);
    assert_eq!(body["config"]["zone"], "serp_api1");
    assert!(body["timestamp"].as_str().is_some());
    assert!(!body.to_string().contains(TOKEN));
}

#[tokio::test]
async fn post_search_returns_organic_results() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/request"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({"zone": "serp_api1", "format": "raw"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(common::rust_programming_page()),
        )
        .expect(1)
        .mount(&upstream)
        .await;
    let (_server, base) = start(config_for(&upstream, Some(TOKEN))).await;

    let response = post_json(&format!("{base}/api/brightdata"), json!({"query": "rust programming"})).await;
    assert_eq!(response.status(), 200);
    let body = json_of(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["query"], "rust programming");
    assert_eq!(body["totalResults"], 2);
    assert_eq!(body["source"], "brightdata");
    assert_eq!(body["results"][0]["url"], "https://www.rust-lang.org/");
    assert_eq!(body["results"][1]["source"], "brightdata");
}

#[tokio::test]
async fn get_search_uses_query_string() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/request"))
        .and(body_partial_json(json!({
            "url": "https://www.google.com/search?q=rust+programming&num=5&hl=en&gl=gb"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(common::rust_programming_page()))
        .expect(1)
        .mount(&upstream)
        .await;
    let (_server, base) = start(config_for(&upstream, Some(TOKEN))).await;

    let response = get(&format!("{base}/api/brightdataget?query=rust%20programming&num=5&gl=gb")).await;
    assert_eq!(response.status(), 200);
    let body = json_of(response).await;
    assert_eq!(body["totalResults"], 2);
}

#[tokio::test]
async fn invalid_queries_rejected_before_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;
    let (_server, base) = start(config_for(&upstream, Some(TOKEN))).await;
    let url = format!("{base}/api/brightdata");

    for body in [json!({}), json!({"query": ""}), json!({"query": "   "}), json!({"query": 7})] {
        let response = post_json(&url, body).await;
        assert_eq!(response.status(), 400);
        let envelope = json_of(response).await;
        assert_eq!(envelope["success"], false);
        assert!(envelope["error"].as_str().is_some_and(|e| e.contains("query")));
    }

    let response = get(&format!("{base}/api/brightdataget?query=%20")).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn malformed_json_body_is_bad_request() {
    let upstream = MockServer::start().await;
    let (_server, base) = start(config_for(&upstream, Some(TOKEN))).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/brightdata"))
        .header("content-type", "application/json")
        .body("{\"query\": ")
        .send()
        .await;
    let response = match response {
        Ok(response) => response,
        Err(err) => panic!("request failed: {err}"),
    };
    assert_eq!(response.status(), 400);
    assert_eq!(json_of(response).await["success"], false);
}

#[tokio::test]
async fn missing_credential_is_500_without_upstream_call() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;
    let (_server, base) = start(config_for(&upstream, None)).await;

    let response = post_json(&format!("{base}/api/brightdata"), json!({"query": "rust"})).await;
    assert_eq!(response.status(), 500);
    let body = json_of(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("token")));
}

#[tokio::test]
async fn upstream_failure_is_502_with_truncated_details() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable ".repeat(50)))
        .expect(1)
        .mount(&upstream)
        .await;
    let (_server, base) = start(config_for(&upstream, Some(TOKEN))).await;

    let response = post_json(&format!("{base}/api/brightdata"), json!({"query": "rust"})).await;
    assert_eq!(response.status(), 502);
    let body = json_of(response).await;
    let details = body["details"].as_str().unwrap_or_default();
    assert!(details.starts_with("Service Unavailable"));
    assert!(details.chars().count() <= 203);
    assert!(body.get("results").is_none());
}

#[tokio::test]
async fn upstream_timeout_is_504() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&upstream)
        .await;
    let config = ProxyConfig {
        timeout: Duration::from_millis(300),
        ..config_for(&upstream, Some(TOKEN))
    };
    let (_server, base) = start(config).await;

    let response = post_json(&format!("{base}/api/brightdata"), json!({"query": "rust"})).await;
    assert_eq!(response.status(), 504);
}

#[tokio::test]
async fn empty_upstream_page_gives_placeholder_200() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&upstream)
        .await;
    let (_server, base) = start(config_for(&upstream, Some(TOKEN))).await;

    let response = post_json(&format!("{base}/api/brightdata"), json!({"query": "rust"})).await;
    assert_eq!(response.status(), 200);
    let body = json_of(response).await;
    assert_eq!(body["totalResults"], 1);
    assert_eq!(body["source"], "fallback");
    assert!(body["results"][0]["title"].as_str().is_some_and(|t| t.contains("rust")));
}

#[tokio::test]
async fn unknown_route_lists_endpoints() {
    let upstream = MockServer::start().await;
    let (_server, base) = start(config_for(&upstream, Some(TOKEN))).await;

    let response = get(&format!("{base}/api/nope")).await;
    assert_eq!(response.status(), 404);
    let body = json_of(response).await;
    let endpoints = body["availableEndpoints"].as_array().cloned().unwrap_or_default();
    assert_eq!(endpoints.len(), 3);
    assert!(endpoints.iter().any(|e| e == "POST /api/brightdata"));
}
