mod common;

use serde_json::Value;

#[tokio::test]
async fn test_health_in_memory_is_healthy() {
    let server = common::create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(json["checks"]["storage"]["message"], "memory reachable");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let server = common::create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );

    let body = response.text();
    for endpoint in ["/register", "/login", "/shorten", "/redirect/{code}", "/urls"] {
        assert!(body.contains(endpoint), "missing {endpoint}");
    }
}
