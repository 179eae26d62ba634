//! Posts API client.
//!
//! Reads the posts list, a single post and its author from a
//! JSONPlaceholder-compatible REST API. Every call is a single attempt: a
//! failure is logged once and returned to the caller, never retried.
//!
//! ```rust,ignore
//! use roster::feed::FeedClient;
//!
//! let client = FeedClient::new("https://jsonplaceholder.typicode.com")?;
//! let detail = client.post_with_author(1).await?;
//! println!("{} by @{}", detail.post.title, detail.author.username);
//! ```

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::api::logs::log_error;
use crate::config::{Settings, DEFAULT_HTTP_TIMEOUT_SECS};
use crate::error::{FeedError, FeedResult};
use crate::models::{Post, PostWithAuthor, User};

/// HTTP client for the posts API.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    /// Client with the default timeout.
    pub fn new(base_url: impl Into<String>) -> FeedResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> FeedResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(FeedError::Config(format!(
                "base URL must be http(s), got '{}'",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("roster/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn from_settings(settings: &Settings) -> FeedResult<Self> {
        Self::with_timeout(&settings.feed_url, settings.http_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /posts`
    pub async fn list_posts(&self) -> FeedResult<Vec<Post>> {
        self.get_json("/posts", "Failed to fetch posts").await
    }

    /// `GET /posts/{id}`
    pub async fn get_post(&self, id: u64) -> FeedResult<Post> {
        self.get_json(&format!("/posts/{}", id), "Failed to fetch post details")
            .await
    }

    /// `GET /users/{id}`
    pub async fn get_user(&self, id: u64) -> FeedResult<User> {
        self.get_json(&format!("/users/{}", id), "Failed to fetch post details")
            .await
    }

    /// A post followed by its author, looked up through `userId`.
    pub async fn post_with_author(&self, id: u64) -> FeedResult<PostWithAuthor> {
        let post = self.get_post(id).await?;
        let author = self.get_user(post.user_id).await?;
        Ok(PostWithAuthor { post, author })
    }

    /// Full URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, notice: &str) -> FeedResult<T> {
        let url = self.url(path);
        let result = self.fetch(&url).await;
        if let Err(ref e) = result {
            log_error(format!("{}: {}", notice, e));
        }
        result
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> FeedResult<T> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

/// Local stand-in for the posts API, counting the requests it serves.
#[cfg(test)]
pub(crate) mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::{IntoResponse, Json, Response},
        routing::get,
        Router,
    };
    use serde_json::{json, Value};

    use crate::models::post::fixtures::{post_json, user_json};

    pub(crate) struct MockFeed {
        pub base_url: String,
        hits: Arc<AtomicUsize>,
    }

    impl MockFeed {
        /// Start serving on an ephemeral port. Only post 1 and user 1 exist.
        pub(crate) async fn start() -> Self {
            let hits = Arc::new(AtomicUsize::new(0));
            let app = Router::new()
                .route("/posts", get(posts))
                .route("/posts/{id}", get(post))
                .route("/users/{id}", get(user))
                .with_state(hits.clone());

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                base_url: format!("http://{}", addr),
                hits,
            }
        }

        pub(crate) fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }
    }

    async fn posts(State(hits): State<Arc<AtomicUsize>>) -> Json<Value> {
        hits.fetch_add(1, Ordering::SeqCst);
        Json(json!([post_json()]))
    }

    async fn post(State(hits): State<Arc<AtomicUsize>>, Path(id): Path<u64>) -> Response {
        hits.fetch_add(1, Ordering::SeqCst);
        match id {
            1 => Json(post_json()).into_response(),
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }

    async fn user(State(hits): State<Arc<AtomicUsize>>, Path(id): Path<u64>) -> Response {
        hits.fetch_add(1, Ordering::SeqCst);
        match id {
            1 => Json(user_json()).into_response(),
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }
}
