mod common;

use serde_json::Value;

#[tokio::test]
async fn test_redirect_success() {
    let server = common::create_test_server();
    let token = common::register(&server, "alice", "secret123").await;
    let code = common::shorten(&server, &token, "https://example.com/target").await;

    let response = server.get(&format!("/redirect/{code}")).await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_does_not_require_auth() {
    let server = common::create_test_server();
    let token = common::register(&server, "alice", "secret123").await;
    let code = common::shorten(&server, &token, "http://example.com").await;

    let response = server
        .get(&format!("/redirect/{code}"))
        .add_header("Authorization", "Bearer garbage")
        .await;

    assert_eq!(response.status_code(), 302);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let server = common::create_test_server();

    let response = server.get("/redirect/doesnotexist").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(common::error_code(&response.json::<Value>()), "not_found");
}

#[tokio::test]
async fn test_redirect_unknown_well_formed_code_not_found() {
    let server = common::create_test_server();

    let response = server.get("/redirect/0badc0de").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_redirect_without_code_is_bad_request() {
    let server = common::create_test_server();

    for path in ["/redirect", "/redirect/"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), 400, "path {path}");
        assert_eq!(
            common::error_code(&response.json::<Value>()),
            "validation_error"
        );
    }
}
