use std::sync::Arc;
use std::time::Instant;

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

use doctext::Document;
use lexlookup::WordLookup;
use wordscan::DEFAULT_CONTEXT_LINES;

use crate::session::SessionStore;

/// Shown instead of failing the upload when a PDF yields no text.
const EXTRACTION_NOTE: &str = "no text could be extracted";

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub lookup: Arc<WordLookup>,
    pub max_upload_bytes: usize,
    pub disable_cache: bool,
}

#[derive(Deserialize)]
pub struct LookupQuery {
    pub word: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    document_id: String,
    filename: String,
    pages: usize,
    chars: usize,
    words: Vec<String>,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'static str>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;
    Router::new()
        .route("/", get(frontend))
        .route("/robots.txt", get(robots))
        .route("/healthz", get(healthz))
        .route("/v1/documents", post(upload))
        .route("/v1/documents/{id}/lookup", get(lookup))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn robots(State(state): State<AppState>) -> Response {
    let headers = axum::http::HeaderMap::from_iter([
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        ),
        (
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=86400, immutable"),
        ),
    ]);
    if state.disable_cache {
        return "User-agent: *\nDisallow: /".into_response();
    }
    (headers, "User-agent: *\nDisallow: /").into_response()
}

async fn frontend(State(state): State<AppState>) -> Response {
    let html = Html(reader_html());
    if state.disable_cache {
        return html.into_response();
    }
    (
        [(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600, immutable"),
        )],
        html,
    )
        .into_response()
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload.pdf").to_string();
        let content_type = field.content_type().map(str::to_string);
        if !is_pdf(content_type.as_deref(), &filename) {
            return Err(ApiError::UnsupportedMedia);
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;
        upload = Some((filename, bytes.to_vec()));
        break;
    }
    let Some((filename, bytes)) = upload else {
        return Err(ApiError::bad_request("multipart field 'file' is required"));
    };

    let start = Instant::now();
    let (document, pages) = match doctext::extract(&bytes) {
        Ok(extraction) => {
            info!(
                "{filename}: extracted {} bytes of text from {} pages in {} ms ({} empty)",
                extraction.document.len(),
                extraction.pages,
                start.elapsed().as_millis(),
                extraction.empty_pages,
            );
            (extraction.document, extraction.pages)
        }
        // A broken upload still gets a session so the reader UI can say so.
        Err(err) => {
            warn!("{filename}: extraction failed: {err}");
            (Document::new(String::new()), 0)
        }
    };
    let note = document.text().trim().is_empty().then_some(EXTRACTION_NOTE);
    let chars = document.text().chars().count();
    let words = wordscan::word_index(document.text());
    let session = state.sessions.insert(filename, document, words);

    Ok(Json(UploadResponse {
        document_id: session.id.clone(),
        filename: session.filename.clone(),
        pages,
        chars,
        words: session.words.clone(),
        text: session.document.text().to_string(),
        note,
    })
    .into_response())
}

/// The declared content type wins; a filename extension check covers clients
/// that send the part without one.
fn is_pdf(content_type: Option<&str>, filename: &str) -> bool {
    match content_type {
        Some(ct) => ct.eq_ignore_ascii_case("application/pdf"),
        None => std::path::Path::new(filename)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf")),
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("document not found")]
    NotFound,
    #[error("unsupported media type: only application/pdf uploads are accepted")]
    UnsupportedMedia,
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

async fn lookup(
    State(state): State<AppState>,
    Path(id): Path<String>,
    axum::extract::Query(params): axum::extract::Query<LookupQuery>,
) -> Result<Response, ApiError> {
    let word = params.word.trim();
    if word.is_empty() {
        return Err(ApiError::bad_request("word is required"));
    }
    let Some(session) = state.sessions.get(&id) else {
        return Err(ApiError::NotFound);
    };

    let Some(mut result) = state.lookup.lookup(word).await else {
        return Err(ApiError::bad_request("word is required"));
    };
    result.context = wordscan::context_window(session.document.text(), word, DEFAULT_CONTEXT_LINES);

    // Lookup answers depend on live providers and per-session text.
    Ok((
        [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
        Json(result),
    )
        .into_response())
}

const BASE_HTML: &str = include_str!("../templates/base.html");
const STYLE_HTML: &str = include_str!("../templates/style.html");
const HEADER_HTML: &str = include_str!("../templates/header.html");
const FOOTER_HTML: &str = include_str!("../templates/footer.html");
const READER_BODY_HTML: &str = include_str!("../templates/reader_body.html");
const READER_SCRIPT: &str = include_str!("../templates/reader_script.js");

fn render_page(title: &str, body: &str, script: &str) -> String {
    let header = HEADER_HTML.replace("{{title}}", title);
    BASE_HTML
        .replace("{{title}}", title)
        .replace("{{style}}", STYLE_HTML)
        .replace("{{header}}", &header)
        .replace("{{body}}", body)
        .replace("{{footer}}", FOOTER_HTML)
        .replace("{{scripts}}", &format!(r#"<script>{}</script>"#, script))
}

fn reader_html() -> String {
    render_page("Pagelex", READER_BODY_HTML, READER_SCRIPT)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::NotFound => {
                let body = Json(ErrorResponse {
                    error: "document not found".to_string(),
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::UnsupportedMedia => {
                let body = Json(ErrorResponse {
                    error: "unsupported media type: only application/pdf uploads are accepted"
                        .to_string(),
                });
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, body).into_response()
            }
            ApiError::Internal => {
                let body = Json(json!({ "error": "internal server error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
