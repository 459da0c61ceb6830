use crate::e2e::helpers;

use helpers::{Identity, TestContext};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use radimpression_backend::domain::plan::Plan;
use serde_json::json;

#[tokio::test]
async fn it_should_report_zero_usage_for_a_new_user() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .client
        .get_with_identity("/usage", &Identity::user("fresh"))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.json();
    assert_eq!(body.get("tokensUsed").and_then(|v| v.as_i64()), Some(0));
    assert_eq!(body.get("tokensLimit").and_then(|v| v.as_i64()), Some(10_000));
    assert_eq!(body.get("impressionsGenerated").and_then(|v| v.as_i64()), Some(0));
    assert_eq!(body.get("plan").and_then(|v| v.as_str()), Some("free"));
    assert_eq!(body.get("blocked").and_then(|v| v.as_bool()), Some(false));
    assert!(body.get("resetsAt").is_some());
}

#[tokio::test]
async fn it_should_reflect_usage_after_a_generation() {
    let ctx = TestContext::new().await.unwrap();
    let user = Identity::user("u1");

    ctx.client
        .post_with_identity("/generate", &json!({ "findings": "Findings." }), &user)
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx.client.get_with_identity("/usage", &user).await.unwrap();
    let body = response.json();
    assert_eq!(body.get("tokensUsed").and_then(|v| v.as_i64()), Some(1234));
    assert_eq!(body.get("impressionsGenerated").and_then(|v| v.as_i64()), Some(1));
}

#[tokio::test]
async fn it_should_reflect_plan_changes_in_the_limit() {
    let ctx = TestContext::new().await.unwrap();
    ctx.ledger.ensure("u1", "u1@clinic.org", "Dr. Test").await.unwrap();
    ctx.ledger.set_plan("u1", Plan::RadPlus).await.unwrap();

    let response = ctx
        .client
        .get_with_identity("/usage", &Identity::user("u1"))
        .await
        .unwrap();

    let body = response.json();
    assert_eq!(body.get("plan").and_then(|v| v.as_str()), Some("rad-plus"));
    assert_eq!(
        body.get("tokensLimit").and_then(|v| v.as_i64()),
        Some(1_000_000)
    );
}

#[tokio::test]
async fn it_should_require_identity_for_usage() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.client.get("/usage").await.unwrap();
    response.assert_status(StatusCode::UNAUTHORIZED);
}
