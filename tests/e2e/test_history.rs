use crate::e2e::helpers;

use helpers::assertions::assert_history_entry;
use helpers::mock_generation::MOCK_IMPRESSION;
use helpers::{Identity, TestContext};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn it_should_return_empty_history_for_a_new_user() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .client
        .get_with_identity("/history", &Identity::user("fresh"))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.json();
    let history = body.get("history").and_then(|v| v.as_array()).unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn it_should_record_generations_in_history() {
    let ctx = TestContext::new().await.unwrap();
    let user = Identity::user("u1");

    ctx.client
        .post_with_identity(
            "/generate",
            &json!({ "findings": "No acute findings." }),
            &user,
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx.client.get_with_identity("/history", &user).await.unwrap();
    let body = response.json();
    let history = body.get("history").and_then(|v| v.as_array()).unwrap();
    assert_eq!(history.len(), 1);
    assert_history_entry(&history[0]);
    assert_eq!(
        history[0].get("findings").and_then(|v| v.as_str()),
        Some("No acute findings.")
    );
    assert_eq!(
        history[0].get("impression").and_then(|v| v.as_str()),
        Some(MOCK_IMPRESSION)
    );
}

#[tokio::test]
async fn it_should_order_history_newest_first() {
    let ctx = TestContext::new().await.unwrap();
    let user = Identity::user("u1");

    for findings in ["first study", "second study"] {
        ctx.client
            .post_with_identity("/generate", &json!({ "findings": findings }), &user)
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
    }

    let response = ctx.client.get_with_identity("/history", &user).await.unwrap();
    let body = response.json();
    let history = body.get("history").and_then(|v| v.as_array()).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(
        history[0].get("findings").and_then(|v| v.as_str()),
        Some("second study")
    );
    assert_eq!(
        history[1].get("findings").and_then(|v| v.as_str()),
        Some("first study")
    );
}

#[tokio::test]
async fn it_should_scope_history_to_the_caller() {
    let ctx = TestContext::new().await.unwrap();

    ctx.client
        .post_with_identity(
            "/generate",
            &json!({ "findings": "Findings." }),
            &Identity::user("u1"),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx
        .client
        .get_with_identity("/history", &Identity::user("u2"))
        .await
        .unwrap();
    let body = response.json();
    let history = body.get("history").and_then(|v| v.as_array()).unwrap();
    assert!(history.is_empty());
}
