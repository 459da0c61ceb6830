use crate::e2e::helpers::TestContext;

use hyper::StatusCode;

#[tokio::test]
async fn it_should_report_healthy() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.client.get("/health").await.unwrap();
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn it_should_be_ready_with_memory_ledger() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.client.get("/health/ready").await.unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ready"));
    assert_eq!(body.get("ledger").and_then(|v| v.as_str()), Some("memory"));
}

#[tokio::test]
async fn it_should_attach_a_request_id_header() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.client.get("/health").await.unwrap();
    assert!(response.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn it_should_echo_a_supplied_request_id() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .client
        .get_with_header("/health", "x-request-id", "trace-42")
        .await
        .unwrap();
    assert_eq!(
        response.headers.get("x-request-id").map(String::as_str),
        Some("trace-42")
    );
}
