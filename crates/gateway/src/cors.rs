//! CORS for the two proxy endpoints.
//!
//! Browsers only ever need `GET /api/health` and `POST /api/chat` with a JSON
//! body, so nothing else is allowed. Origins come from
//! `[server.cors] allowed_origins`; a `host:*` entry matches any numeric port
//! on that host and a lone `"*"` allows every origin.

use axum::http::{header, HeaderValue, Method};
use np_domain::config::CorsConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub fn layer(cors: &CorsConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if is_wildcard(&cors.allowed_origins) {
        tracing::warn!("CORS configured with wildcard \"*\"; all origins allowed");
        return base.allow_origin(Any);
    }

    for origin in &cors.allowed_origins {
        if !origin.ends_with(":*") && origin.parse::<HeaderValue>().is_err() {
            tracing::warn!(origin = %origin, "invalid CORS origin, skipping");
        }
    }

    let patterns = cors.allowed_origins.clone();
    base.allow_origin(AllowOrigin::predicate(move |origin, _| {
        origin
            .to_str()
            .is_ok_and(|origin| origin_allowed(&patterns, origin))
    }))
}

fn is_wildcard(patterns: &[String]) -> bool {
    patterns.len() == 1 && patterns[0] == "*"
}

/// Whether `origin` matches one of `patterns`, either exactly or through a
/// `scheme://host:*` port wildcard.
pub fn origin_allowed(patterns: &[String], origin: &str) -> bool {
    patterns.iter().any(|pattern| match pattern.strip_suffix('*') {
        Some(prefix) if prefix.ends_with(':') => origin
            .strip_prefix(prefix)
            .is_some_and(|port| !port.is_empty() && port.chars().all(|c| c.is_ascii_digit())),
        _ => pattern == origin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Vec<String> {
        CorsConfig::default().allowed_origins
    }

    #[test]
    fn default_origins_accept_any_local_port() {
        assert!(origin_allowed(&defaults(), "http://localhost:3000"));
        assert!(origin_allowed(&defaults(), "http://127.0.0.1:5173"));
    }

    #[test]
    fn port_wildcard_needs_a_numeric_port() {
        assert!(!origin_allowed(&defaults(), "http://localhost:"));
        assert!(!origin_allowed(&defaults(), "http://localhost:80abc"));
        assert!(!origin_allowed(&defaults(), "http://localhost.evil.com:80"));
        assert!(!origin_allowed(&defaults(), "https://example.com"));
    }

    #[test]
    fn exact_origins_match_exactly() {
        let patterns = vec!["https://chat.example.com".to_string()];
        assert!(origin_allowed(&patterns, "https://chat.example.com"));
        assert!(!origin_allowed(&patterns, "https://chat.example.com:8443"));
    }

    #[test]
    fn lone_star_is_the_wildcard() {
        assert!(is_wildcard(&["*".to_string()]));
        assert!(!is_wildcard(&["*".to_string(), "http://a".to_string()]));
    }
}
