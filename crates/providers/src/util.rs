//! Shared utility functions for provider adapters.

use np_domain::config::AuthConfig;
use np_domain::error::{Error, Result};

/// Convert a [`reqwest::Error`] into the domain [`Error`] type.
///
/// Timeout errors map to [`Error::Timeout`]; everything else maps to
/// [`Error::Http`].
pub(crate) fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

/// Resolve the API key from an [`AuthConfig`].
///
/// Precedence:
/// 1. `key` field (plaintext, logs a warning)
/// 2. `env` field (reads environment variable, must be non-empty)
/// 3. Error
pub fn resolve_api_key(auth: &AuthConfig) -> Result<String> {
    resolve_api_key_with(auth, |name| std::env::var(name).ok())
}

/// [`resolve_api_key`] with an explicit environment lookup.
pub fn resolve_api_key_with(
    auth: &AuthConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String> {
    if let Some(ref key) = auth.key {
        if !key.is_empty() {
            tracing::warn!(
                "API key loaded from plaintext config field 'key'; \
                 prefer 'env' instead"
            );
            return Ok(key.clone());
        }
    }

    if auth.env.is_empty() {
        return Err(Error::Auth(
            "no API key configured: set 'key' or 'env' in [llm.auth]".into(),
        ));
    }

    match lookup(&auth.env) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Auth(format!(
            "environment variable '{}' not set or empty",
            auth.env
        ))),
    }
}
