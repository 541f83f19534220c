//! `POST /api/chat` — run the message pipeline for one transcript.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Json, Response};
use tracing::Instrument;

use crate::runtime::run_chat;
use crate::state::AppState;

/// The body is taken as raw bytes so that malformed JSON is reported with
/// the same `{ error, details }` shape as every other failure.
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id);

    async move {
        match run_chat(state.orchestrator.as_deref(), &state.settings, &body).await {
            Ok(result) => Json(result).into_response(),
            Err(e) => {
                tracing::warn!(error = %e, "chat request failed");
                e.into_response()
            }
        }
    }
    .instrument(span)
    .await
}
