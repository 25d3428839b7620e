use axum::body::Body;
use axum::Router;
use fabtrack_api as api;
use http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

/// In-process application against an in-memory SQLite database.
pub struct TestApp {
    pub router: Router,
}

pub async fn spawn_app() -> TestApp {
    let db_config = api::db::DbConfig {
        url: "sqlite::memory:".to_string(),
        // A single connection keeps every query on the same in-memory db
        max_connections: 1,
        min_connections: 1,
        connect_timeout: Duration::from_secs(5),
        idle_timeout: Duration::from_secs(600),
        acquire_timeout: Duration::from_secs(5),
    };
    let db = api::db::establish_connection_with_config(&db_config)
        .await
        .expect("connect to in-memory sqlite");
    api::db::run_migrations(&db).await.expect("run migrations");
    let db = Arc::new(db);

    let (event_tx, event_rx) = mpsc::channel(64);
    let event_sender = Arc::new(api::events::EventSender::new(event_tx));
    tokio::spawn(api::events::process_events(event_rx));

    let services = api::handlers::AppServices::new(db.clone(), event_sender.clone());

    let config = api::config::AppConfig {
        database_url: db_config.url.clone(),
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        log_level: "debug".to_string(),
        log_json: false,
        auto_migrate: false,
        cors_allowed_origins: None,
        cors_allow_any_origin: true,
        cors_allow_credentials: false,
        db_max_connections: 1,
        db_min_connections: 1,
        db_connect_timeout_secs: 5,
        db_idle_timeout_secs: 600,
        db_acquire_timeout_secs: 5,
        event_channel_capacity: 64,
    };

    let state = api::AppState {
        db,
        config,
        event_sender,
        services,
    };

    TestApp {
        router: api::build_router(state, CorsLayer::permissive()),
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                builder.body(Body::from(value.to_string())).unwrap()
            }
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request handled");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Seeds a sales order and returns its id.
    pub async fn create_order(&self, order_number: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/v1/orders",
                json!({
                    "orderNumber": order_number,
                    "customerName": "Acme Industries",
                    "customerEmail": "buyer@acme.example"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create order failed: {body}");
        body["data"]["id"].as_i64().expect("order id")
    }
}
