//! HTTP Server for the Roster API.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                              |
//! |--------|-------------------|------------------------------------------|
//! | GET    | `/health`         | Health check                             |
//! | GET    | `/api/records`    | Transform the embedded sample dataset    |
//! | POST   | `/api/transform`  | Transform a JSON array of raw records    |
//! | POST   | `/api/upload`     | Transform an uploaded CSV or JSON file   |
//! | GET    | `/api/posts`      | Posts list                               |
//! | GET    | `/api/posts/{id}` | Post with its author                     |
//! | GET    | `/api/logs`       | SSE stream for real-time logs            |
//!
//! `/api/records`, `/api/transform` and `/api/upload` accept `?strict=` and
//! `?validate=` query flags.

use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::{Multipart, Path, Query, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, log_info, LOG_BROADCASTER};
use super::types::{
    error_response, PostDetailResponse, PostsResponse, TransformQuery, TransformResponse,
};
use crate::config::Settings;
use crate::dataset::sample_records;
use crate::error::{FeedError, PipelineError, ServerError, ServerResult, SourceError};
use crate::feed::FeedClient;
use crate::parser::parse_records_json;
use crate::transform::pipeline::{transform_bytes, transform_records};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub feed: FeedClient,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, FeedError> {
        let feed = FeedClient::from_settings(&settings)?;
        Ok(Self { settings, feed })
    }
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Pipeline(PipelineError::Source(SourceError::Io(_))) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServerError::Pipeline(_) | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Feed(FeedError::Status { status: 404, .. }) => StatusCode::NOT_FOUND,
            ServerError::Feed(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Feed errors were already logged by the client.
        if !matches!(self, ServerError::Feed(_)) {
            log_error(self.to_string());
        }
        (status, Json(error_response(&self.to_string()))).into_response()
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/records", get(sample_report))
        .route("/api/transform", post(transform_json))
        .route("/api/upload", post(upload_file))
        .route("/api/posts", get(list_posts))
        .route("/api/posts/{id}", get(post_detail))
        .route("/api/logs", get(sse_logs))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let port = settings.port;
    let state = Arc::new(AppState::new(settings)?);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Roster server running on http://localhost:{}", port);
    println!("   GET  /api/records     - Sample dataset report");
    println!("   POST /api/transform   - Transform JSON records");
    println!("   POST /api/upload      - Upload CSV or JSON file");
    println!("   GET  /api/posts       - Posts list");
    println!("   GET  /api/posts/{{id}}  - Post with author");
    println!("   GET  /api/logs        - SSE log stream");
    println!("   GET  /health          - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "roster",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    // Lagged receivers skip the entries they missed.
    let stream = BroadcastStream::new(rx).filter_map(|result| {
        let entry = result.ok()?;
        let json = serde_json::to_string(&entry).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Report over the embedded dataset.
async fn sample_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TransformQuery>,
) -> ServerResult<Json<TransformResponse>> {
    let options = query.options(state.settings.strict);
    let report = transform_records(sample_records(), &options)?;
    Ok(Json(report.into()))
}

/// Transform a JSON array of raw records sent as the request body.
async fn transform_json(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TransformQuery>,
    body: Bytes,
) -> ServerResult<Json<TransformResponse>> {
    let content = std::str::from_utf8(&body)
        .map_err(|e| ServerError::BadRequest(format!("Body is not UTF-8: {}", e)))?;
    let records = parse_records_json(content).map_err(PipelineError::from)?;

    let options = query.options(state.settings.strict);
    let report = transform_records(records, &options)?;
    Ok(Json(report.into()))
}

/// Transform an uploaded file (multipart field `file`).
async fn upload_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TransformQuery>,
    mut multipart: Multipart,
) -> ServerResult<Json<TransformResponse>> {
    let mut file_data: Option<Bytes> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(str::to_string);
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?,
            );
        }
    }

    let bytes = file_data.ok_or_else(|| ServerError::BadRequest("No file provided".into()))?;
    log_info(format!(
        "📄 Upload: {} ({} bytes)",
        file_name.as_deref().unwrap_or("unknown"),
        bytes.len()
    ));

    let options = query.options(state.settings.strict);
    let report = transform_bytes(&bytes, &options)?;
    Ok(Json(report.into()))
}

async fn list_posts(State(state): State<Arc<AppState>>) -> ServerResult<Json<PostsResponse>> {
    let posts = state.feed.list_posts().await?;
    Ok(Json(posts.into()))
}

async fn post_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ServerResult<Json<PostDetailResponse>> {
    let detail = state.feed.post_with_author(id).await?;
    Ok(Json(detail.into()))
}
