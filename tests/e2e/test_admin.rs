use crate::e2e::helpers;

use helpers::assertions::assert_usage_record;
use helpers::{Identity, TestContext};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn it_should_list_users_for_an_admin() {
    let ctx = TestContext::new().await.unwrap();
    ctx.ledger.ensure("u1", "u1@clinic.org", "Dr. One").await.unwrap();
    ctx.ledger.ensure("u2", "u2@clinic.org", "Dr. Two").await.unwrap();

    let response = ctx
        .client
        .get_with_identity("/admin/users", &Identity::admin())
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.json();
    let users = body.get("users").and_then(|v| v.as_array()).unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert_usage_record(user);
    }
}

#[tokio::test]
async fn it_should_hide_seed_users_unless_asked() {
    let ctx = TestContext::new().await.unwrap();
    ctx.ledger.ensure("u1", "u1@clinic.org", "Dr. One").await.unwrap();
    ctx.ledger
        .ensure("demo-user", "demo@example.com", "Demo User")
        .await
        .unwrap();

    let admin = Identity::admin();

    let response = ctx.client.get_with_identity("/admin/users", &admin).await.unwrap();
    let body = response.json();
    let users = body.get("users").and_then(|v| v.as_array()).unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(
        users[0].get("userId").and_then(|v| v.as_str()),
        Some("u1")
    );

    let response = ctx
        .client
        .get_with_identity("/admin/users?includeSeed=true", &admin)
        .await
        .unwrap();
    let body = response.json();
    let users = body.get("users").and_then(|v| v.as_array()).unwrap();
    assert_eq!(users.len(), 2);
}

#[tokio::test]
async fn it_should_reject_non_admin_callers() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .client
        .get_with_identity("/admin/users", &Identity::user("u1"))
        .await
        .unwrap();
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn it_should_block_and_unblock_a_user() {
    let ctx = TestContext::new().await.unwrap();
    ctx.ledger.ensure("u1", "u1@clinic.org", "Dr. One").await.unwrap();
    let admin = Identity::admin();

    let response = ctx
        .client
        .post_with_identity(
            "/admin/users/u1/block",
            &json!({ "action": "block" }),
            &admin,
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert!(ctx.ledger.get("u1").await.unwrap().unwrap().is_blocked);

    let response = ctx
        .client
        .post_with_identity(
            "/admin/users/u1/block",
            &json!({ "action": "unblock" }),
            &admin,
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert!(!ctx.ledger.get("u1").await.unwrap().unwrap().is_blocked);
}

#[tokio::test]
async fn it_should_reset_usage_counters() {
    let ctx = TestContext::new().await.unwrap();
    ctx.ledger.ensure("u1", "u1@clinic.org", "Dr. One").await.unwrap();
    ctx.ledger.record_usage("u1", 4_200, 0.02).await.unwrap();

    let response = ctx
        .client
        .post_with_identity(
            "/admin/users/u1/reset-usage",
            &json!({}),
            &Identity::admin(),
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let record = ctx.ledger.get("u1").await.unwrap().unwrap();
    assert_eq!(record.total_tokens_used, 0);
    assert_eq!(record.total_impressions, 0);
    assert_eq!(record.tokens_today, 0);
}

#[tokio::test]
async fn it_should_change_a_plan_without_touching_counters() {
    let ctx = TestContext::new().await.unwrap();
    ctx.ledger.ensure("u1", "u1@clinic.org", "Dr. One").await.unwrap();
    ctx.ledger.record_usage("u1", 4_200, 0.02).await.unwrap();

    let response = ctx
        .client
        .post_with_identity(
            "/admin/users/u1/plan",
            &json!({ "plan": "pro" }),
            &Identity::admin(),
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let record = ctx.ledger.get("u1").await.unwrap().unwrap();
    assert_eq!(record.plan.to_string(), "pro");
    assert_eq!(record.total_tokens_used, 4_200);
}

#[tokio::test]
async fn it_should_leave_records_untouched_when_a_non_admin_mutates() {
    let ctx = TestContext::new().await.unwrap();
    ctx.ledger.ensure("u1", "u1@clinic.org", "Dr. One").await.unwrap();
    ctx.ledger.record_usage("u1", 4_200, 0.02).await.unwrap();
    let before = ctx.ledger.get("u1").await.unwrap().unwrap();

    let intruder = Identity::user("intruder");
    for (path, body) in [
        ("/admin/users/u1/block", json!({ "action": "block" })),
        ("/admin/users/u1/reset-usage", json!({})),
        ("/admin/users/u1/plan", json!({ "plan": "rad-plus" })),
    ] {
        let response = ctx
            .client
            .post_with_identity(path, &body, &intruder)
            .await
            .unwrap();
        response.assert_status(StatusCode::FORBIDDEN);
    }

    let after = ctx.ledger.get("u1").await.unwrap().unwrap();
    assert_eq!(before, after);
}
