//! Integration tests for message send, list, and fan-out.

mod helpers;

use axum::http::StatusCode;

use docqflow_entity::user::Role;
use helpers::{TestApp, seed_fixture};

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_rejected_role_pair_creates_nothing() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;
    let token = app.token(fx.client_user, Role::Client, None);

    // client -> accountant is not in the chat matrix
    let response = app
        .request(
            "POST",
            "/api/messages",
            Some(serde_json::json!({
                "document_id": fx.document_id,
                "channel": "chat",
                "message": "hello",
                "recipient_role": "accountant",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN, "{:?}", response.body);
    assert_eq!(response.body["error"], "FORBIDDEN");
    assert_eq!(app.count("messages").await, 0);
    assert_eq!(app.count("notifications").await, 0);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_send_commits_message_with_notification() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;
    let token = app.token(fx.client_user, Role::Client, None);

    let response = app
        .request(
            "POST",
            "/api/messages",
            Some(serde_json::json!({
                "document_id": fx.document_id,
                "message": "receipts attached",
                "recipient_role": "firm",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["message"], "receipts attached");
    assert_eq!(response.body["sender_role"], "client");

    assert_eq!(app.count("messages").await, 1);
    assert_eq!(app.count("notifications").await, 1);

    // notification targets the firm owner and links back to the document
    let (user_id, document_id): (uuid::Uuid, Option<uuid::Uuid>) =
        sqlx::query_as("SELECT user_id, document_id FROM notifications")
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(user_id, fx.firm_owner);
    assert_eq!(document_id, Some(fx.document_id));

    // the addressed role got its participant row
    assert_eq!(app.count("message_participants").await, 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_send_without_document_access_is_forbidden() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;

    // a client of a different firm
    let outsider = app.seed_user("other@firm.test", Role::Client).await;
    let token = app.token(outsider, Role::Client, None);

    let response = app
        .request(
            "POST",
            "/api/messages",
            Some(serde_json::json!({
                "document_id": fx.document_id,
                "channel": "clarification",
                "message": "please clarify",
                "recipient_role": "accountant",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN, "{:?}", response.body);
    assert_eq!(app.count("messages").await, 0);
    assert_eq!(app.count("notifications").await, 0);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_empty_body_is_rejected() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;
    let token = app.token(fx.client_user, Role::Client, None);

    let response = app
        .request(
            "POST",
            "/api/messages",
            Some(serde_json::json!({
                "document_id": fx.document_id,
                "message": "   ",
                "recipient_role": "firm",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.count("messages").await, 0);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_initial_accountant_clarification_flips_document_status() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;
    let token = app.token(fx.accountant_user, Role::Accountant, Some(fx.firm_id));

    let response = app
        .request(
            "POST",
            "/api/messages",
            Some(serde_json::json!({
                "document_id": fx.document_id,
                "channel": "clarification",
                "message": "missing page 2",
                "recipient_role": "client",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    // the notification goes to the client user, not the firm owner
    let user_id: uuid::Uuid = sqlx::query_scalar("SELECT user_id FROM notifications")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(user_id, fx.client_user);

    let status: String = sqlx::query_scalar("SELECT status FROM documents WHERE id = $1")
        .bind(fx.document_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(status, "in_clarification");

    // a reply does not flip the status back or re-flip it
    sqlx::query("UPDATE documents SET status = 'uploaded' WHERE id = $1")
        .bind(fx.document_id)
        .execute(&app.db_pool)
        .await
        .unwrap();
    let token = app.token(fx.client_user, Role::Client, None);
    app.request(
        "POST",
        "/api/messages",
        Some(serde_json::json!({
            "document_id": fx.document_id,
            "channel": "clarification",
            "message": "uploaded it now",
            "recipient_role": "accountant",
        })),
        Some(&token),
    )
    .await;
    let status: String = sqlx::query_scalar("SELECT status FROM documents WHERE id = $1")
        .bind(fx.document_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(status, "uploaded");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_listing_marks_addressed_messages_read() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;

    // client -> firm message
    let client_token = app.token(fx.client_user, Role::Client, None);
    app.request(
        "POST",
        "/api/messages",
        Some(serde_json::json!({
            "document_id": fx.document_id,
            "message": "receipts attached",
            "recipient_role": "firm",
        })),
        Some(&client_token),
    )
    .await;

    let firm_token = app.token(fx.firm_owner, Role::Firm, Some(fx.firm_id));

    let unread = app
        .request(
            "GET",
            &format!("/api/messages/unread-count?document_id={}", fx.document_id),
            None,
            Some(&firm_token),
        )
        .await;
    assert_eq!(unread.body["count"], 1);

    // listing the thread stamps the read flag
    let listed = app
        .request(
            "GET",
            &format!("/api/messages?document_id={}", fx.document_id),
            None,
            Some(&firm_token),
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
    assert_eq!(listed.body[0]["is_read"], true);

    let unread = app
        .request(
            "GET",
            &format!("/api/messages/unread-count?document_id={}", fx.document_id),
            None,
            Some(&firm_token),
        )
        .await;
    assert_eq!(unread.body["count"], 0);

    // the sender's own view never marks their outgoing message
    let listed = app
        .request(
            "GET",
            &format!("/api/messages?document_id={}", fx.document_id),
            None,
            Some(&client_token),
        )
        .await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    // the accountant mediates and therefore sees the thread unfiltered,
    // even though no message names their role
    let accountant_token = app.token(fx.accountant_user, Role::Accountant, Some(fx.firm_id));
    let listed = app
        .request(
            "GET",
            &format!("/api/messages?document_id={}", fx.document_id),
            None,
            Some(&accountant_token),
        )
        .await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_document_replacement_repoints_thread() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;
    let token = app.token(fx.client_user, Role::Client, None);

    app.request(
        "POST",
        "/api/messages",
        Some(serde_json::json!({
            "document_id": fx.document_id,
            "message": "first draft attached",
            "recipient_role": "firm",
        })),
        Some(&token),
    )
    .await;

    let replacement = app.seed_document(fx.client_id, "2025 returns v2").await;

    let state = docqflow_api::app::build_state(app.config.clone(), app.db_pool.clone());
    let moved = state
        .messaging_service
        .reassign_document(fx.document_id, replacement)
        .await
        .unwrap();
    assert_eq!(moved, 1);

    // the old document keeps nothing; the thread follows the replacement
    let listed = app
        .request(
            "GET",
            &format!("/api/messages?document_id={}", fx.document_id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(listed.body.as_array().unwrap().len(), 0);

    let listed = app
        .request(
            "GET",
            &format!("/api/messages?document_id={}", replacement),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
    assert_eq!(listed.body[0]["document_id"], replacement.to_string());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_health_reports_database_status() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "up");
}
