// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use eventhub::config::Config;
use eventhub::fetcher::{CachedPostSource, HttpPostSource};
use eventhub::state::AppState;
use eventhub::{db, routes, seed};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment (.env included)
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize Database Pool with Retry
    let mut retry_count = 0;
    let pool = loop {
        match db::connect(&config.database_url).await {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    tracing::error!("Failed to open database after 5 retries: {}", e);
                    return Err(e.into());
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };
    tracing::info!("Database connected...");

    tracing::info!("Running migrations...");
    db::migrate(&pool).await?;
    tracing::info!("Migrations applied successfully.");

    if let Some(admin) = &config.admin {
        if let Err(e) = seed::seed_admin_user(&pool, admin).await {
            tracing::error!("Failed to seed admin user: {:?}", e);
        }
    }

    if config.seed_sample_events {
        if let Err(e) = seed::seed_sample_events(&pool).await {
            tracing::error!("Failed to seed sample events: {:?}", e);
        }
    }

    let posts = CachedPostSource::new(
        HttpPostSource::new(&config.posts_api_url)?,
        Duration::from_secs(config.posts_cache_ttl),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let state = AppState {
        pool,
        config,
        posts: Arc::new(posts),
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
