//! Shared test helpers for integration tests.
//!
//! These tests drive the full router against a live PostgreSQL instance
//! (see `tests/fixtures/test_config.toml`) and are `#[ignore]`d by
//! default; run them with `cargo test -- --ignored` once the database is
//! up.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use docqflow_auth::Claims;
use docqflow_core::config::AppConfig;
use docqflow_entity::user::Role;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let config = AppConfig::load("tests/fixtures/test_config")
            .expect("Failed to load test config");

        let db_pool = docqflow_database::connection::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");

        docqflow_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let state = docqflow_api::app::build_state(config.clone(), db_pool.clone());
        let router = docqflow_api::app::build_app(state);

        Self {
            router,
            db_pool,
            config,
        }
    }

    /// Clean all test data from the database
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "notifications",
            "reminders",
            "message_participants",
            "messages",
            "documents",
            "clients",
            "firms",
            "users",
        ];

        for table in &tables {
            let query = format!("DELETE FROM {}", table);
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Create a user row and return its ID
    pub async fn seed_user(&self, email: &str, role: Role) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO users (id, email, display_name, role) VALUES ($1, $2, $3, $4::user_role)",
        )
        .bind(id)
        .bind(email)
        .bind(email)
        .bind(role.as_str())
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test user");
        id
    }

    /// Create a firm owned by the given user
    pub async fn seed_firm(&self, name: &str, owner_user_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO firms (id, name, owner_user_id) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(name)
            .bind(owner_user_id)
            .execute(&self.db_pool)
            .await
            .expect("Failed to create test firm");
        id
    }

    /// Create a client record
    pub async fn seed_client(
        &self,
        firm_id: Uuid,
        user_id: Uuid,
        accountant_user_id: Option<Uuid>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO clients (id, firm_id, user_id, accountant_user_id, name) \
             VALUES ($1, $2, $3, $4, 'Test Client')",
        )
        .bind(id)
        .bind(firm_id)
        .bind(user_id)
        .bind(accountant_user_id)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test client");
        id
    }

    /// Create a document for a client
    pub async fn seed_document(&self, client_id: Uuid, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO documents (id, client_id, name) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(client_id)
            .bind(name)
            .execute(&self.db_pool)
            .await
            .expect("Failed to create test document");
        id
    }

    /// Mint a signed bearer token for a seeded user
    pub fn token(&self, user_id: Uuid, role: Role, firm_id: Option<Uuid>) -> String {
        let claims = Claims {
            sub: user_id,
            role,
            firm_id,
            username: "tester".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.auth.jwt_secret.as_bytes()),
        )
        .expect("Failed to sign test token")
    }

    /// Count rows in a table
    pub async fn count(&self, table: &str) -> i64 {
        let query = format!("SELECT COUNT(*) FROM {}", table);
        sqlx::query_scalar(&query)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to count rows")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// A firm with one client, an assigned accountant, and one document.
pub struct Fixture {
    pub firm_id: Uuid,
    pub firm_owner: Uuid,
    pub client_user: Uuid,
    pub accountant_user: Uuid,
    pub client_id: Uuid,
    pub document_id: Uuid,
}

/// Seed the standard firm/client/accountant/document graph.
pub async fn seed_fixture(app: &TestApp) -> Fixture {
    let firm_owner = app.seed_user("owner@firm.test", Role::Firm).await;
    let client_user = app.seed_user("client@firm.test", Role::Client).await;
    let accountant_user = app.seed_user("accountant@firm.test", Role::Accountant).await;
    let firm_id = app.seed_firm("Test Firm", firm_owner).await;
    let client_id = app
        .seed_client(firm_id, client_user, Some(accountant_user))
        .await;
    let document_id = app.seed_document(client_id, "2025 returns").await;

    Fixture {
        firm_id,
        firm_owner,
        client_user,
        accountant_user,
        client_id,
        document_id,
    }
}
