//! HTTP API backing the browser UI.
//!
//! Runs on port 2004 by default. CORS-permissive so a page served from any
//! local dev server can call it.

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use universalia_core::types::{RuleDescriptor, TranslationResult};

use crate::client::LanguageService;
use crate::error::{SPEECH_FAILED_MESSAGE, SessionError};
use crate::playback::AudioOutput;
use crate::session::{SessionState, TranslatorSession};

/// Build the axum router around a shared [`TranslatorSession`].
pub fn router<S: LanguageService + 'static, O: AudioOutput>(
    session: TranslatorSession<S, O>,
) -> Router {
    Router::new()
        .route("/state", get(state::<S, O>))
        .route("/input", put(set_input::<S, O>))
        .route("/swap", post(swap::<S, O>))
        .route("/translate", post(translate::<S, O>))
        .route("/speak", post(speak::<S, O>))
        .route("/speech.wav", post(speech_wav::<S, O>))
        .route("/rules", get(rules::<S, O>))
        .layer(CorsLayer::permissive())
        .with_state(session)
}

#[derive(serde::Deserialize)]
struct TextRequest {
    text: String,
}

#[derive(serde::Serialize)]
struct OkResponse {
    ok: bool,
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    ok: bool,
    error: String,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            SessionError::EmptyInput => (StatusCode::BAD_REQUEST, self.to_string()),
            SessionError::Busy | SessionError::Stale | SessionError::NoResult => {
                (StatusCode::CONFLICT, self.to_string())
            }
            // Detail was logged where it happened; the user gets the fixed text.
            SessionError::Service(e) => (StatusCode::BAD_GATEWAY, e.user_message().to_string()),
            SessionError::Speech(_) | SessionError::Audio(_) => {
                (StatusCode::BAD_GATEWAY, SPEECH_FAILED_MESSAGE.to_string())
            }
        };
        (status, Json(ErrorResponse { ok: false, error })).into_response()
    }
}

async fn state<S: LanguageService + 'static, O: AudioOutput>(
    State(session): State<TranslatorSession<S, O>>,
) -> Json<SessionState> {
    Json(session.state())
}

async fn set_input<S: LanguageService + 'static, O: AudioOutput>(
    State(session): State<TranslatorSession<S, O>>,
    Json(req): Json<TextRequest>,
) -> Json<SessionState> {
    session.set_input(req.text);
    Json(session.state())
}

async fn swap<S: LanguageService + 'static, O: AudioOutput>(
    State(session): State<TranslatorSession<S, O>>,
) -> Json<SessionState> {
    session.swap_direction();
    Json(session.state())
}

async fn translate<S: LanguageService + 'static, O: AudioOutput>(
    State(session): State<TranslatorSession<S, O>>,
) -> Result<Json<TranslationResult>, SessionError> {
    session.translate().await.map(Json)
}

async fn speak<S: LanguageService + 'static, O: AudioOutput>(
    State(session): State<TranslatorSession<S, O>>,
) -> Result<Json<OkResponse>, SessionError> {
    session.speak().await?;
    Ok(Json(OkResponse { ok: true }))
}

async fn speech_wav<S: LanguageService + 'static, O: AudioOutput>(
    State(session): State<TranslatorSession<S, O>>,
    Json(req): Json<TextRequest>,
) -> Result<Response, SessionError> {
    let wav = session.speech_wav(&req.text).await?;
    Ok(([(header::CONTENT_TYPE, "audio/wav")], wav).into_response())
}

async fn rules<S: LanguageService + 'static, O: AudioOutput>(
    State(session): State<TranslatorSession<S, O>>,
) -> Json<&'static [RuleDescriptor]> {
    Json(session.rules())
}
