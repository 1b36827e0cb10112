//! Demo web server.
//!
//! Routes:
//! - `GET /api/v1/demo` - localized greeting as plain text
//! - `GET /api/v1/languages` - available and default languages
//! - `GET /api/v1/translate?key=...&lang=...&Name=...` - one translation
//! - everything else is served from the static UI directory
//!
//! The request language comes from `?lang=`, then `Accept-Language`, then
//! the server default. Each request resolves its own [`Localizer`], so the
//! shared translator is never mutated.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use lingo_core::{I18nError, LocaleIdentifier, Localizer, Translator, negotiate_accept_language};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
struct AppState {
    translator: Arc<Translator>,
}

/// Build the application router.
pub fn router(translator: Translator, static_dir: &Path) -> Router {
    let state = AppState {
        translator: Arc::new(translator),
    };

    Router::new()
        .route("/api/v1/demo", get(demo))
        .route("/api/v1/languages", get(languages))
        .route("/api/v1/translate", get(translate))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn run(translator: Translator, addr: &str, static_dir: &Path) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        addr = %listener.local_addr()?,
        static_dir = %static_dir.display(),
        "listening"
    );

    axum::serve(listener, router(translator, static_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    NotFound(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::BadRequest(error) => (StatusCode::BAD_REQUEST, error),
            Self::NotFound(error) => (StatusCode::NOT_FOUND, error),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<I18nError> for ApiError {
    fn from(err: I18nError) -> Self {
        if err.is_invalid_tag() {
            Self::BadRequest(err.to_string())
        } else {
            Self::NotFound(err.to_string())
        }
    }
}

/// Pick the localizer for a request.
fn request_localizer<'a>(
    translator: &'a Translator,
    lang: Option<&str>,
    headers: &HeaderMap,
) -> Result<Localizer<'a>, ApiError> {
    if let Some(lang) = lang {
        return Ok(translator.localizer(lang)?);
    }

    let negotiated = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| negotiate_accept_language(value, translator.available_languages()));

    match negotiated {
        Some(locale) => Ok(translator.localizer(&locale.to_string())?),
        None => Ok(translator.current()),
    }
}

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

async fn demo(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    headers: HeaderMap,
) -> Result<String, ApiError> {
    let localizer = request_localizer(&state.translator, query.lang.as_deref(), &headers)?;
    Ok(localizer.translate("server.demo"))
}

#[derive(Serialize)]
struct LanguagesBody<'a> {
    default: &'a LocaleIdentifier,
    available: &'a [LocaleIdentifier],
}

async fn languages(State(state): State<AppState>) -> Response {
    Json(LanguagesBody {
        default: state.translator.language(),
        available: state.translator.available_languages(),
    })
    .into_response()
}

#[derive(Serialize)]
struct TranslationBody {
    locale: LocaleIdentifier,
    key: String,
    text: String,
}

async fn translate(
    State(state): State<AppState>,
    Query(mut params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<TranslationBody>, ApiError> {
    let key = params
        .remove("key")
        .ok_or_else(|| ApiError::BadRequest("missing 'key' query parameter".to_string()))?;
    let lang = params.remove("lang");

    let localizer = request_localizer(&state.translator, lang.as_deref(), &headers)?;

    let mut args: Vec<(&str, &str)> = params
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    args.sort_unstable();

    let text = localizer.translate_with(&key, &args);
    Ok(Json(TranslationBody {
        locale: localizer.locale().clone(),
        key,
        text,
    }))
}
