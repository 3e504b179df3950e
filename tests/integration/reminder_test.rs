//! Integration tests for reminder creation, sweep, and recurrence.

mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};

use docqflow_entity::user::Role;
use helpers::{Fixture, TestApp, seed_fixture};

fn create_body(fx: &Fixture, send_option: &str, extra: serde_json::Value) -> serde_json::Value {
    let mut body = serde_json::json!({
        "recipient_kind": "client",
        "recipient_id": fx.client_id,
        "recipient_user_id": fx.client_user,
        "title": "Quarterly filing",
        "body": "Please upload your receipts.",
        "send_option": send_option,
    });
    body.as_object_mut()
        .unwrap()
        .extend(extra.as_object().unwrap().clone());
    body
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_client_cannot_create_reminders() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;
    let token = app.token(fx.client_user, Role::Client, None);

    let response = app
        .request(
            "POST",
            "/api/reminders",
            Some(create_body(&fx, "now", serde_json::json!({}))),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.count("reminders").await, 0);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_schedule_in_past_is_rejected() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;
    let token = app.token(fx.firm_owner, Role::Firm, Some(fx.firm_id));

    let past = Utc::now() - Duration::hours(1);
    let response = app
        .request(
            "POST",
            "/api/reminders",
            Some(create_body(
                &fx,
                "schedule",
                serde_json::json!({ "scheduled_at": past }),
            )),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST, "{:?}", response.body);
    assert_eq!(response.body["error"], "VALIDATION");
    assert_eq!(app.count("reminders").await, 0);
    assert_eq!(app.count("notifications").await, 0);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_immediate_delivery_notifies_and_chains() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;
    let token = app.token(fx.firm_owner, Role::Firm, Some(fx.firm_id));

    let response = app
        .request(
            "POST",
            "/api/reminders",
            Some(create_body(
                &fx,
                "now",
                serde_json::json!({ "recurrence": "daily" }),
            )),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["status"], "sent");
    assert!(!response.body["sent_at"].is_null());

    // delivered row + chained pending sibling
    assert_eq!(app.count("reminders").await, 2);
    let pending: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM reminders WHERE status = 'pending'")
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(pending, 1);

    // one notification, for the recipient user
    let user_id: uuid::Uuid = sqlx::query_scalar("SELECT user_id FROM notifications")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(user_id, fx.client_user);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_scheduled_reminder_round_trip_through_sweep() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;
    let token = app.token(fx.firm_owner, Role::Firm, Some(fx.firm_id));

    let future = Utc::now() + Duration::hours(1);
    let response = app
        .request(
            "POST",
            "/api/reminders",
            Some(create_body(
                &fx,
                "schedule",
                serde_json::json!({ "scheduled_at": future, "recurrence": "weekly" }),
            )),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["status"], "pending");
    assert!(response.body["sent_at"].is_null());
    assert_eq!(app.count("notifications").await, 0);

    // nothing is due yet
    let swept = app
        .request(
            "POST",
            "/api/reminders/sweep?secret=test-sweep-secret",
            None,
            None,
        )
        .await;
    assert_eq!(swept.status, StatusCode::OK, "{:?}", swept.body);
    assert_eq!(swept.body["processed"], 0);

    // pretend the hour has passed
    sqlx::query("UPDATE reminders SET scheduled_at = NOW() - INTERVAL '1 minute'")
        .execute(&app.db_pool)
        .await
        .unwrap();

    let swept = app
        .request(
            "POST",
            "/api/reminders/sweep?secret=test-sweep-secret",
            None,
            None,
        )
        .await;
    assert_eq!(swept.body["processed"], 1);

    // delivered, notified, and chained exactly one weekly sibling
    let sent: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reminders WHERE status = 'sent' AND sent_at IS NOT NULL",
    )
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(sent, 1);
    assert_eq!(app.count("notifications").await, 1);
    let pending: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM reminders WHERE status = 'pending'")
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(pending, 1);

    // idempotence: the already-delivered reminder is not reprocessed
    let swept = app
        .request(
            "POST",
            "/api/reminders/sweep?secret=test-sweep-secret",
            None,
            None,
        )
        .await;
    assert_eq!(swept.body["processed"], 0);
    assert_eq!(app.count("notifications").await, 1);

    // the firm's management view lists both occurrences
    let listed = app.request("GET", "/api/reminders", None, Some(&token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["total_items"], 2);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_sweep_requires_secret_or_firm_identity() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;

    let anonymous = app.request("POST", "/api/reminders/sweep", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let wrong_secret = app
        .request("POST", "/api/reminders/sweep?secret=wrong", None, None)
        .await;
    assert_eq!(wrong_secret.status, StatusCode::UNAUTHORIZED);

    let client_token = app.token(fx.client_user, Role::Client, None);
    let as_client = app
        .request("POST", "/api/reminders/sweep", None, Some(&client_token))
        .await;
    assert_eq!(as_client.status, StatusCode::FORBIDDEN);

    let firm_token = app.token(fx.firm_owner, Role::Firm, Some(fx.firm_id));
    let as_firm = app
        .request("POST", "/api/reminders/sweep", None, Some(&firm_token))
        .await;
    assert_eq!(as_firm.status, StatusCode::OK);
    assert_eq!(as_firm.body["processed"], 0);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_scoped_sweep_only_touches_own_firm() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;

    // a second firm with its own due reminder
    let other_owner = app.seed_user("owner2@firm.test", Role::Firm).await;
    let other_firm = app.seed_firm("Other Firm", other_owner).await;
    let other_client_user = app.seed_user("client2@firm.test", Role::Client).await;
    let other_client = app.seed_client(other_firm, other_client_user, None).await;

    for (firm, owner, client, client_user) in [
        (fx.firm_id, fx.firm_owner, fx.client_id, fx.client_user),
        (other_firm, other_owner, other_client, other_client_user),
    ] {
        sqlx::query(
            "INSERT INTO reminders (firm_id, created_by, recipient_kind, recipient_id, \
             recipient_user_id, title, body, scheduled_at, status) \
             VALUES ($1, $2, 'client', $3, $4, 'due', 'due now', NOW() - INTERVAL '1 minute', 'pending')",
        )
        .bind(firm)
        .bind(owner)
        .bind(client)
        .bind(client_user)
        .execute(&app.db_pool)
        .await
        .unwrap();
    }

    let firm_token = app.token(fx.firm_owner, Role::Firm, Some(fx.firm_id));
    let swept = app
        .request("POST", "/api/reminders/sweep", None, Some(&firm_token))
        .await;
    assert_eq!(swept.body["processed"], 1);

    // the other firm's reminder is still pending
    let pending_firms: Vec<uuid::Uuid> =
        sqlx::query_scalar("SELECT firm_id FROM reminders WHERE status = 'pending'")
            .fetch_all(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(pending_firms, vec![other_firm]);
}
