//! Untrusted input → typed transcript.

use np_domain::turn::{coerce_text, Role, Turn};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanitizeError {
    #[error("messages is required and must be an array")]
    NotAnArray,
    #[error("no valid turns")]
    NoValidTurns,
}

/// Filter and coerce a raw JSON value into a transcript.
///
/// Elements that are not objects carrying both `role` and `content` are
/// skipped. Both fields are coerced to text with [`coerce_text`]; turns
/// whose role is outside `system|user|assistant` or whose content ends up
/// empty are dropped.
pub fn sanitize(raw: &Value) -> Result<Vec<Turn>, SanitizeError> {
    let items = raw.as_array().ok_or(SanitizeError::NotAnArray)?;

    let turns: Vec<Turn> = items.iter().filter_map(coerce_turn).collect();

    if turns.len() < items.len() {
        tracing::debug!(
            received = items.len(),
            kept = turns.len(),
            "dropped invalid turns"
        );
    }

    if turns.is_empty() {
        return Err(SanitizeError::NoValidTurns);
    }
    Ok(turns)
}

fn coerce_turn(item: &Value) -> Option<Turn> {
    let obj = item.as_object()?;
    let role = coerce_text(obj.get("role")?);
    let content = coerce_text(obj.get("content")?);
    Turn::new(Role::from_wire(&role)?, content)
}
