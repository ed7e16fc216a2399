// src/fetcher.rs

//! Remote blog API client.
//!
//! [`HttpPostSource`] talks to a JSONPlaceholder-style API (`/posts`,
//! `/posts/{id}`). [`CachedPostSource`] wraps any source and serves the last
//! collection for a fixed TTL; staleness within the TTL is acceptable.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::post::Post;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("post {0} not found")]
    NotFound(i64),

    /// Connection failures, timeouts, non-2xx statuses and undecodable bodies.
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

/// Where posts come from.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// The full collection, in the order the source returns it.
    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchError>;

    async fn fetch_post(&self, id: i64) -> Result<Post, FetchError>;
}

pub struct HttpPostSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPostSource {
    const TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(Self::TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchError> {
        let response = self
            .client
            .get(format!("{}/posts", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Transport(format!(
                "GET /posts returned {}",
                response.status()
            )));
        }

        Ok(response.json::<Vec<Post>>().await?)
    }

    async fn fetch_post(&self, id: i64) -> Result<Post, FetchError> {
        let response = self
            .client
            .get(format!("{}/posts/{}", self.base_url, id))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(FetchError::NotFound(id)),
            status if !status.is_success() => Err(FetchError::Transport(format!(
                "GET /posts/{} returned {}",
                id, status
            ))),
            _ => Ok(response.json::<Post>().await?),
        }
    }
}

/// Serves the last fetched collection until it is `ttl` old.
pub struct CachedPostSource<S> {
    inner: S,
    ttl: Duration,
    cache: RwLock<Option<(Instant, Arc<Vec<Post>>)>>,
}

impl<S: PostSource> CachedPostSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cache: RwLock::new(None),
        }
    }

    async fn fresh(&self) -> Option<Arc<Vec<Post>>> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|(fetched_at, _)| fetched_at.elapsed() < self.ttl)
            .map(|(_, posts)| Arc::clone(posts))
    }
}

#[async_trait]
impl<S: PostSource> PostSource for CachedPostSource<S> {
    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchError> {
        if let Some(posts) = self.fresh().await {
            return Ok(posts.as_ref().clone());
        }

        let posts = Arc::new(self.inner.fetch_posts().await?);
        tracing::debug!("Fetched {} posts from remote API", posts.len());
        *self.cache.write().await = Some((Instant::now(), Arc::clone(&posts)));

        Ok(posts.as_ref().clone())
    }

    async fn fetch_post(&self, id: i64) -> Result<Post, FetchError> {
        if let Some(post) = self
            .fresh()
            .await
            .and_then(|posts| posts.iter().find(|post| post.id == id).cloned())
        {
            return Ok(post);
        }

        self.inner.fetch_post(id).await
    }
}
