// http server mode - the analysis service the client talks to

use axum::{
    Json, Router,
    body::Bytes,
    extract::{ConnectInfo, DefaultBodyLimit, Multipart, State, rejection::BytesRejection},
    extract::multipart::MultipartRejection,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::core::{Analysis, MAX_UPLOAD_BYTES, RateLimit, RateLimiter, analyze_contract, pdf_text};
use crate::Error;

const TOO_LARGE: &str = "Request payload too large. Maximum size is 10MB.";
const RATE_LIMITED: &str = "Rate limit exceeded. Please try again later.";
const UNEXPECTED: &str = "An unexpected error occurred";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub max_body_bytes: usize,
    pub upload_limit: RateLimit,
    pub analyze_limit: RateLimit,
    pub hourly_limit: RateLimit,
    pub daily_limit: RateLimit,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: MAX_UPLOAD_BYTES as usize,
            upload_limit: RateLimit::per_minute(10),
            analyze_limit: RateLimit::per_minute(20),
            hourly_limit: RateLimit::per_hour(50),
            daily_limit: RateLimit::per_day(200),
        }
    }
}

struct AppState {
    upload: RateLimiter,
    analyze: RateLimiter,
    hourly: RateLimiter,
    daily: RateLimiter,
}

#[derive(Clone, Copy)]
enum Route {
    Upload,
    Analyze,
    Health,
}

impl AppState {
    fn new(config: &ServerConfig) -> Self {
        Self {
            upload: RateLimiter::new(config.upload_limit),
            analyze: RateLimiter::new(config.analyze_limit),
            hourly: RateLimiter::new(config.hourly_limit),
            daily: RateLimiter::new(config.daily_limit),
        }
    }

    // a route with its own limit is not bound by the shared hourly/daily ones
    async fn allow(&self, route: Route, client: &SocketAddr) -> bool {
        let key = client.ip().to_string();
        match route {
            Route::Upload => self.upload.allow(&key).await,
            Route::Analyze => self.analyze.allow(&key).await,
            Route::Health => RateLimiter::allow_all(&[&self.hourly, &self.daily], &key).await,
        }
    }
}

#[derive(Serialize)]
struct UploadResponse {
    text: String,
    analysis: Analysis,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    analysis: Analysis,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

type Reply = (StatusCode, Json<Value>);

fn error_reply(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "error": message })))
}

pub struct Server;

impl Server {
    pub fn router(config: &ServerConfig) -> Router {
        let state = Arc::new(AppState::new(config));

        Router::new()
            .route("/health", get(health))
            .route("/upload", post(upload))
            .route("/analyze", post(analyze))
            .layer(DefaultBodyLimit::max(config.max_body_bytes))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Serves on an already bound listener.
    pub async fn serve(listener: TcpListener, config: ServerConfig) -> Result<(), Error> {
        let app = Self::router(&config);

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(|e| Error::Server(e.to_string()))
    }

    pub async fn run(host: &str, port: u16, config: ServerConfig) -> Result<(), Error> {
        let addr = format!("{host}:{port}");

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        tracing::info!("server running at http://{addr}");
        Self::serve(listener, config).await
    }
}

async fn health(
    State(state): State<Arc<AppState>>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
) -> Reply {
    if !state.allow(Route::Health, &client).await {
        tracing::warn!(%client, "rate limit exceeded on /health");
        return error_reply(StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED);
    }

    reply(StatusCode::OK, &HealthResponse { status: "ok" })
}

async fn upload(
    State(state): State<Arc<AppState>>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Reply {
    if !state.allow(Route::Upload, &client).await {
        tracing::warn!(%client, "rate limit exceeded on /upload");
        return error_reply(StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED);
    }

    let Ok(mut multipart) = multipart else {
        tracing::error!("no file part in the request");
        return error_reply(StatusCode::BAD_REQUEST, "No file part");
    };

    // find the `file` field
    let (file_name, bytes) = loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                tracing::error!("no file part in the request");
                return error_reply(StatusCode::BAD_REQUEST, "No file part");
            }
            Err(e) => return multipart_failure(e.status(), &e.body_text()),
        };

        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        match field.bytes().await {
            Ok(bytes) => break (file_name, bytes),
            Err(e) => return multipart_failure(e.status(), &e.body_text()),
        }
    };

    if file_name.is_empty() {
        tracing::error!("no file selected");
        return error_reply(StatusCode::BAD_REQUEST, "No selected file");
    }

    if !allowed_file(&file_name) {
        tracing::error!(file = %file_name, "invalid file type");
        return error_reply(
            StatusCode::BAD_REQUEST,
            "Invalid file type. Only PDF files are allowed.",
        );
    }

    let text = match pdf_text(bytes.to_vec()).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(file = %file_name, "error extracting text from pdf: {e}");
            return error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to extract text from PDF",
            );
        }
    };

    let analysis = analyze_contract(&text);
    tracing::info!(file = %file_name, risk = %analysis.risk_score, "analyzed upload");

    reply(StatusCode::OK, &UploadResponse { text, analysis })
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
    body: Result<Bytes, BytesRejection>,
) -> Reply {
    if !state.allow(Route::Analyze, &client).await {
        tracing::warn!(%client, "rate limit exceeded on /analyze");
        return error_reply(StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED);
    }

    let body = match body {
        Ok(body) => body,
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::warn!("request payload too large");
            return error_reply(StatusCode::PAYLOAD_TOO_LARGE, TOO_LARGE);
        }
        Err(e) => {
            tracing::error!("unreadable body: {e}");
            return error_reply(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED);
        }
    };

    // `{}` carries no data either
    let data = match serde_json::from_slice::<Map<String, Value>>(&body) {
        Ok(data) if !data.is_empty() => data,
        _ => {
            tracing::error!("no json data in the request");
            return error_reply(StatusCode::BAD_REQUEST, "No JSON data");
        }
    };

    let text = data.get("text").and_then(Value::as_str).unwrap_or_default();
    if text.is_empty() {
        tracing::error!("empty contract text");
        return error_reply(StatusCode::BAD_REQUEST, "Empty contract text");
    }

    let analysis = analyze_contract(text);
    tracing::info!(chars = text.len(), risk = %analysis.risk_score, "analyzed text");

    reply(StatusCode::OK, &AnalyzeResponse { analysis })
}

fn reply<T: Serialize>(status: StatusCode, body: &T) -> Reply {
    match serde_json::to_value(body) {
        Ok(value) => (status, Json(value)),
        Err(e) => {
            tracing::error!("unexpected error: {e}");
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED)
        }
    }
}

fn multipart_failure(status: StatusCode, detail: &str) -> Reply {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("request payload too large");
        return error_reply(StatusCode::PAYLOAD_TOO_LARGE, TOO_LARGE);
    }
    tracing::error!("unexpected error: {detail}");
    error_reply(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED)
}

fn allowed_file(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
}
