use axum::extract::State;
use axum::response::{IntoResponse, Json};

use crate::state::AppState;

/// `GET /api/health` — liveness plus a summary of how the pipeline is wired.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let nag_variant = state
        .orchestrator
        .as_ref()
        .map(|o| o.nag_variant())
        .unwrap_or_else(|| state.config.nag.variant());

    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "upstream_configured": state.orchestrator.is_some(),
        "model": state.config.llm.model,
        "nag_variant": nag_variant,
    }))
}
