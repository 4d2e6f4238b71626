/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup (migrations run on first connect)
/// - Router construction with real application state
/// - JSON request helpers driving the router as a tower Service

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::PgPool;
use storefront_api::app::{build_router, AppState};
use storefront_api::config::Config;
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context against the configured database
    pub async fn new() -> anyhow::Result<Self> {
        // Provide a secret when the environment has none, so Config::from_env
        // does not fail in bare test environments.
        if std::env::var("JWT_SECRET").is_err() {
            std::env::set_var(
                "JWT_SECRET",
                "integration-test-secret-0123456789abcdef",
            );
        }

        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Migrations are embedded relative to the crate manifest
        sqlx::migrate!("../migrations").run(&db).await?;

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(Self { db, app })
    }

    /// Sends a JSON request and returns status plus parsed body
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }

        let request = builder
            .body(match body {
                Some(json) => Body::from(json.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Promotes an account to admin directly in the database
    pub async fn promote_to_admin(&self, email: &str) {
        sqlx::query("UPDATE accounts SET role = 'admin' WHERE email = $1")
            .bind(email)
            .execute(&self.db)
            .await
            .expect("Failed to promote account");
    }
}

/// Generates an email no other test run has used
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4())
}

/// A full card payload in wire format
pub fn card_body(email: &str) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "number": "4111111111111111",
        "expiryDate": "12/26",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "check": "123",
        "billingAddress": "1 Analytical Way"
    })
}
