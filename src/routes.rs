// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, booking, events, posts},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, events, bookings, posts).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let require_auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(
            Router::new()
                .route("/user", get(auth::current_user))
                .layer(require_auth.clone()),
        );

    let event_routes = Router::new()
        .route("/", get(events::list_events))
        .route("/browse", get(events::browse_events))
        .route("/categories", get(events::list_categories))
        .route("/{id}", get(events::get_event))
        // Admin event management: Auth first, then Admin check
        .merge(
            Router::new()
                .route("/", post(events::create_event))
                .route(
                    "/{id}",
                    put(events::update_event).delete(events::delete_event),
                )
                .layer(middleware::from_fn(admin_middleware))
                .layer(require_auth.clone()),
        );

    let booking_routes = Router::new()
        .route(
            "/",
            get(booking::list_bookings).post(booking::create_booking),
        )
        .layer(require_auth);

    let post_routes = Router::new()
        .route("/", get(posts::list_posts))
        .route("/authors", get(posts::list_authors))
        .route("/{id}", get(posts::get_post));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/events", event_routes)
        .nest("/api/bookings", booking_routes)
        .nest("/api/posts", post_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::{config::Config, db, fetcher::HttpPostSource};

    async fn app() -> Router {
        let pool = db::connect_in_memory().await.unwrap();
        db::migrate(&pool).await.unwrap();

        let config = Config {
            database_url: "sqlite::memory:".into(),
            jwt_secret: "router_test_secret".into(),
            jwt_expiration: 60,
            rust_log: "error".into(),
            port: 0,
            admin: None,
            seed_sample_events: false,
            posts_api_url: "http://127.0.0.1:9".into(),
            posts_cache_ttl: 0,
            cors_origins: vec!["http://localhost:5173".into(), "not a header\n".into()],
        };

        create_router(AppState {
            pool,
            posts: Arc::new(HttpPostSource::new(&config.posts_api_url).unwrap()),
            config,
        })
    }

    #[tokio::test]
    async fn preflight_allows_configured_origin_only() {
        let app = app().await;

        let preflight = |origin: &'static str| {
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/bookings")
                .header(header::ORIGIN, origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap()
        };

        let allowed = app
            .clone()
            .oneshot(preflight("http://localhost:5173"))
            .await
            .unwrap();
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );

        let other = app.oneshot(preflight("http://evil.test")).await.unwrap();
        assert!(
            other
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn protected_routes_reject_missing_token() {
        let app = app().await;

        for (method, uri) in [
            (Method::GET, "/api/auth/user"),
            (Method::GET, "/api/bookings"),
            (Method::POST, "/api/events"),
            (Method::DELETE, "/api/events/1"),
        ] {
            let response = app
                .clone()
                .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        }

        let public = app
            .oneshot(Request::builder().uri("/api/events").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(public.status(), StatusCode::OK);
    }
}
