// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use eventhub::{
    config::{AdminSeed, Config},
    db,
    fetcher::{CachedPostSource, HttpPostSource},
    routes, seed,
    state::AppState,
};
use serde_json::{Value, json};
use sqlx::SqlitePool;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin123";

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub client: reqwest::Client,
}

fn test_config(posts_api_url: &str) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
        port: 0,
        admin: None,
        seed_sample_events: false,
        posts_api_url: posts_api_url.to_string(),
        posts_cache_ttl: 3600,
        cors_origins: vec!["http://localhost:5173".to_string()],
    }
}

/// Binds `app` to a random local port and returns its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

/// Spawns the app against a fresh in-memory database.
/// The blog API points at `posts_api_url`.
pub async fn spawn_app_with_posts_api(posts_api_url: &str) -> TestApp {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");

    db::migrate(&pool).await.expect("Failed to migrate database");

    let config = test_config(posts_api_url);
    let posts = CachedPostSource::new(
        HttpPostSource::new(&config.posts_api_url).expect("Failed to build HTTP client"),
        Duration::from_secs(config.posts_cache_ttl),
    );

    let state = AppState {
        pool: pool.clone(),
        config,
        posts: Arc::new(posts),
    };

    let address = serve(routes::create_router(state)).await;

    TestApp {
        address,
        pool,
        client: reqwest::Client::new(),
    }
}

/// Spawns the app with an unreachable blog API; for tests that only touch events.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_posts_api("http://127.0.0.1:9").await
}

// ── Fake remote blog API ─────────────────────────────────────────────────────

/// `count` posts; author `userId` changes every five posts.
pub fn sample_posts(count: i64) -> Vec<Value> {
    (1..=count)
        .map(|i| {
            json!({
                "userId": (i - 1) / 5 + 1,
                "id": i,
                "title": format!("post number {}", i),
                "body": format!("body text for post {}", i),
            })
        })
        .collect()
}

async fn all_posts(State(posts): State<Arc<Vec<Value>>>) -> Json<Vec<Value>> {
    Json(posts.as_ref().clone())
}

async fn one_post(State(posts): State<Arc<Vec<Value>>>, Path(id): Path<i64>) -> Response {
    match posts.iter().find(|post| post["id"] == id) {
        Some(post) => Json(post.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

async fn unavailable() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

/// Serves `posts` under `/posts`; `/down/posts` always answers 503.
pub async fn spawn_posts_api(posts: Vec<Value>) -> String {
    let app = Router::new()
        .route("/posts", get(all_posts))
        .route("/posts/{id}", get(one_post))
        .route("/down/posts", get(unavailable))
        .route("/down/posts/{id}", get(unavailable))
        .with_state(Arc::new(posts));

    serve(app).await
}

// ── Request helpers ──────────────────────────────────────────────────────────

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/auth/register"))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Registers a fresh user and returns its token.
    pub async fn user_token(&self, email: &str) -> String {
        let body: Value = self
            .register("Test User", email, "password123")
            .await
            .json()
            .await
            .expect("Failed to parse register json");

        body["token"].as_str().expect("Token not found").to_string()
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Seeds the admin account and returns an admin token.
    pub async fn admin_token(&self) -> String {
        seed::seed_admin_user(
            &self.pool,
            &AdminSeed {
                name: "Admin User".to_string(),
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
            },
        )
        .await
        .expect("Failed to seed admin");

        let body: Value = self
            .login(ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .json()
            .await
            .expect("Failed to parse login json");

        body["token"].as_str().expect("Token not found").to_string()
    }

    pub async fn create_event(&self, token: &str, event: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/events"))
            .bearer_auth(token)
            .json(event)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn book(&self, token: &str, event_id: i64) -> reqwest::Response {
        self.client
            .post(self.url("/api/bookings"))
            .bearer_auth(token)
            .json(&json!({ "eventId": event_id }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn booking_count(&self) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

pub fn event_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "An evening of live music by the river.",
        "category": "Concert",
        "date": "2025-07-15T18:00",
        "venue": "Riverside Stage",
        "price": 25.5,
        "image": ""
    })
}
