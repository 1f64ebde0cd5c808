//! Pipeline tests against mocked upstream endpoints.

use drivegate_graph::{
    Credentials, DriveLocation, FetchOutcome, GraphClient, GraphConfig, GraphError, ItemSource,
    encode_share_token,
};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/tenant-a/oauth2/v2.0/token";
const ITEM_PATH: &str = "/sites/site-1/drives/drive-1/items/item-1";

fn by_item_id() -> ItemSource {
    ItemSource::new(Some("item-1".to_string()), None, None)
}

fn client(server: &MockServer, source: ItemSource) -> GraphClient {
    let config = GraphConfig::new(
        Credentials {
            tenant_id: "tenant-a".to_string(),
            client_id: "client-a".to_string(),
            client_secret: "secret".to_string(),
        },
        DriveLocation {
            site_id: "site-1".to_string(),
            drive_id: "drive-1".to_string(),
        },
        source,
    )
    .with_login_base_url(server.uri())
    .with_graph_base_url(server.uri());

    GraphClient::new(config).expect("failed to build client")
}

async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "expires_in": 3599,
            "access_token": "tok-123",
        })))
        .mount(server)
        .await;
}

async fn mount_item_endpoint(server: &MockServer, download_url: &str) {
    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@microsoft.graph.downloadUrl": download_url,
            "eTag": "\"item-v1\"",
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn pipeline_returns_body_unchanged() {
    let server = MockServer::start().await;
    let body = r#"{"jobs":[{"id":1,"title":"Mechanic"}]}"#;

    mount_token_endpoint(&server).await;
    mount_item_endpoint(&server, &format!("{}/files/job-data.json", server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/files/job-data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("ETag", "\"content-v1\""),
        )
        .mount(&server)
        .await;

    let outcome = client(&server, by_item_id()).fetch(None).await.unwrap();

    match outcome {
        FetchOutcome::Fetched(content) => {
            assert_eq!(content.body, body);
            assert_eq!(content.etag.as_deref(), Some("\"content-v1\""));
        }
        FetchOutcome::NotModified => panic!("expected fresh content"),
    }
}

#[tokio::test]
async fn download_etag_falls_back_to_item_etag() {
    let server = MockServer::start().await;

    mount_token_endpoint(&server).await;
    mount_item_endpoint(&server, &format!("{}/files/job-data.json", server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/files/job-data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let outcome = client(&server, by_item_id()).fetch(None).await.unwrap();

    match outcome {
        FetchOutcome::Fetched(content) => {
            assert_eq!(content.etag.as_deref(), Some("\"item-v1\""));
        }
        FetchOutcome::NotModified => panic!("expected fresh content"),
    }
}

#[tokio::test]
async fn matching_validator_short_circuits_with_not_modified() {
    let server = MockServer::start().await;

    mount_token_endpoint(&server).await;
    mount_item_endpoint(&server, &format!("{}/files/job-data.json", server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/files/job-data.json"))
        .and(header("If-None-Match", "\"content-v1\""))
        .respond_with(ResponseTemplate::new(304))
        .mount(&server)
        .await;

    let outcome = client(&server, by_item_id())
        .fetch(Some("\"content-v1\""))
        .await
        .unwrap();

    assert!(matches!(outcome, FetchOutcome::NotModified));
}

#[tokio::test]
async fn misconfiguration_fails_before_any_network_call() {
    let server = MockServer::start().await;

    // Any request reaching the mock server is a failure.
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server, ItemSource::default())
        .fetch(None)
        .await
        .unwrap_err();
    assert!(matches!(err, GraphError::Config(_)));

    let both = ItemSource::new(Some("item-1".to_string()), Some("/x.json".to_string()), None);
    let err = client(&server, both).fetch(None).await.unwrap_err();
    assert!(matches!(err, GraphError::Config(_)));
}

#[tokio::test]
async fn token_failure_skips_item_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_client",
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server, by_item_id()).fetch(None).await.unwrap_err();
    assert!(matches!(err, GraphError::Auth(_)));
}

#[tokio::test]
async fn lookup_failure_skips_download() {
    let server = MockServer::start().await;

    mount_token_endpoint(&server).await;
    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "itemNotFound"},
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/job-data.json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server, by_item_id()).fetch(None).await.unwrap_err();
    assert!(matches!(err, GraphError::Lookup(_)));
}

#[tokio::test]
async fn missing_download_url_is_a_lookup_error() {
    let server = MockServer::start().await;

    mount_token_endpoint(&server).await;
    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "eTag": "\"item-v1\"",
        })))
        .mount(&server)
        .await;

    let err = client(&server, by_item_id()).fetch(None).await.unwrap_err();
    assert!(matches!(err, GraphError::Lookup(_)));
}

#[tokio::test]
async fn download_failure_is_a_content_error() {
    let server = MockServer::start().await;

    mount_token_endpoint(&server).await;
    mount_item_endpoint(&server, &format!("{}/files/job-data.json", server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/files/job-data.json"))
        .respond_with(ResponseTemplate::new(403).set_body_string("expired"))
        .mount(&server)
        .await;

    let err = client(&server, by_item_id()).fetch(None).await.unwrap_err();
    assert!(matches!(err, GraphError::Content(_)));
}

#[tokio::test]
async fn non_json_body_is_a_content_error() {
    let server = MockServer::start().await;

    mount_token_endpoint(&server).await;
    mount_item_endpoint(&server, &format!("{}/files/job-data.json", server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/files/job-data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>moved</html>"))
        .mount(&server)
        .await;

    let err = client(&server, by_item_id()).fetch(None).await.unwrap_err();
    assert!(matches!(err, GraphError::Content(_)));
}

#[tokio::test]
async fn file_path_mode_queries_the_path_endpoint() {
    let server = MockServer::start().await;

    mount_token_endpoint(&server).await;
    Mock::given(method("GET"))
        .and(path("/sites/site-1/drives/drive-1/root:/reports/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@microsoft.graph.downloadUrl": format!("{}/files/job-data.json", server.uri()),
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/job-data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
        .mount(&server)
        .await;

    let source = ItemSource::new(None, Some("/reports/data.json".to_string()), None);
    let outcome = client(&server, source).fetch(None).await.unwrap();
    assert!(matches!(outcome, FetchOutcome::Fetched(_)));
}

#[tokio::test]
async fn share_url_mode_queries_the_shares_endpoint() {
    let server = MockServer::start().await;
    let share_url = "https://contoso.sharepoint.com/:x:/s/abc";

    mount_token_endpoint(&server).await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/shares/{}/driveItem",
            encode_share_token(share_url)
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@microsoft.graph.downloadUrl": format!("{}/files/job-data.json", server.uri()),
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/job-data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
        .mount(&server)
        .await;

    let source = ItemSource::new(None, None, Some(share_url.to_string()));
    let outcome = client(&server, source).fetch(None).await.unwrap();
    assert!(matches!(outcome, FetchOutcome::Fetched(_)));
}
