//! HTTP server and route handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use parley_knowledge::normalize;

use crate::chat::chat_exchange;
use crate::state::AppState;

/// File extensions accepted by `/upload`.
const ALLOWED_EXTENSIONS: [&str; 3] = ["txt", "py", "pdf"];

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Chat reply envelope; `from` is fixed for the web client.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub from: &'static str,
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct LearnUrlRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Run the HTTP server
pub async fn run(state: Arc<AppState>, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .route("/upload", post(upload_handler))
        .route("/learn-url", post(learn_url_handler))
        .route("/session", get(session_handler))
        .route("/save-session", post(save_session_handler))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn message_response(message: impl Into<String>) -> Response {
    Json(MessageResponse {
        message: message.into(),
    })
    .into_response()
}

/// Embedded chat client - GET /
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("../assets/index.html"))
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Chat handler - POST /chat
///
/// An empty or whitespace-only message gets a canned prompt back and is
/// not recorded.
async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let message = request.message.trim();
    if message.is_empty() {
        return Json(ChatReply {
            from: "IA",
            reply: "Say something...".to_string(),
        });
    }

    let reply = chat_exchange(&state, message).await;
    Json(ChatReply { from: "IA", reply })
}

/// Upload handler - POST /upload
///
/// Accepts one multipart `file` field, persists it to the uploads dir, and
/// ingests its text into the knowledge corpus. The file content is read as
/// lossy UTF-8, so binary bytes degrade to replacement characters instead
/// of failing the request.
async fn upload_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_lowercase();
        match field.bytes().await {
            Ok(bytes) => upload = Some((filename, bytes.to_vec())),
            Err(e) => return error_response(StatusCode::BAD_REQUEST, format!("Bad upload: {}", e)),
        }
        break;
    }

    let Some((filename, bytes)) = upload else {
        return error_response(StatusCode::BAD_REQUEST, "No file.");
    };

    let extension = std::path::Path::new(&filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension) {
        return error_response(
            StatusCode::FORBIDDEN,
            format!("Unsupported file type '.{}'.", extension),
        );
    }

    let save_path = state.uploads_dir.join(&filename);
    if let Err(e) = tokio::fs::write(&save_path, &bytes).await {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to save file: {}", e),
        );
    }

    let content = String::from_utf8_lossy(&bytes);
    let clean = normalize::extract_file_text(&content, &filename);
    match state.knowledge.learn(&clean).await {
        Ok(added) => {
            info!(added, filename = %filename, "learned from upload");
            message_response(format!(
                "Learned {} new sentences from '{}'.",
                added, filename
            ))
        }
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to process file: {}", e),
        ),
    }
}

/// URL learning handler - POST /learn-url
async fn learn_url_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LearnUrlRequest>,
) -> Response {
    let url = request.url.trim();
    if url.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No URL provided.");
    }

    let timeout = Duration::from_secs(state.settings.learning.fetch_timeout_secs);
    let html = match parley_knowledge::fetch::fetch_url(url, timeout).await {
        Ok(html) => html,
        Err(e) => {
            warn!(url = %url, error = %e, "URL fetch failed");
            return error_response(StatusCode::BAD_REQUEST, format!("Failed to fetch URL: {}", e));
        }
    };

    let clean_text = normalize::extract_page_text(&html);
    if clean_text.chars().count() < state.settings.learning.min_extracted_chars {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Extracted content too short to learn from.",
        );
    }

    match state.knowledge.learn(&clean_text).await {
        Ok(added) => {
            info!(added, url = %url, "learned from URL");
            message_response(format!("Learned {} new sentences from URL.", added))
        }
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to learn from URL: {}", e),
        ),
    }
}

/// Session log handler - GET /session
async fn session_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.sessions.load_current().await {
        Ok(turns) => Json(turns).into_response(),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load session: {}", e),
        ),
    }
}

/// Session archive handler - POST /save-session
async fn save_session_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.sessions.archive_snapshot().await {
        Ok(path) => message_response(format!("Session saved as {}.", path.display())),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to save session: {}", e),
        ),
    }
}
