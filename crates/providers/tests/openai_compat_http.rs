//! Drives [`OpenAiCompatProvider`] against a throwaway local HTTP server that
//! mimics the chat completions endpoint.

use std::net::SocketAddr;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use np_domain::config::LlmConfig;
use np_domain::error::Error;
use np_domain::turn::Turn;
use np_providers::{ChatRequest, LlmProvider, OpenAiCompatProvider};
use serde_json::{json, Value};

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn provider_for(addr: SocketAddr) -> OpenAiCompatProvider {
    let cfg = LlmConfig {
        base_url: format!("http://{addr}/v1"),
        ..Default::default()
    };
    OpenAiCompatProvider::from_config(&cfg, "sk-local".into()).unwrap()
}

fn hello() -> ChatRequest {
    ChatRequest {
        messages: vec![Turn::user("hello").unwrap()],
        temperature: Some(0.7),
        ..Default::default()
    }
}

#[tokio::test]
async fn successful_completion_returns_first_choice() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            assert_eq!(
                headers.get("authorization").unwrap().to_str().unwrap(),
                "Bearer sk-local"
            );
            assert_eq!(body["model"], "gpt-4o-mini");
            assert_eq!(body["messages"][0]["content"], "hello");
            Json(json!({
                "model": "gpt-4o-mini",
                "choices": [{"message": {"role": "assistant", "content": "hi there"}}]
            }))
        }),
    );
    let addr = spawn(app).await;

    let resp = provider_for(addr).chat(&hello()).await.unwrap();
    assert_eq!(resp.content, "hi there");
}

#[tokio::test]
async fn upstream_status_is_carried_on_the_error() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({"error": {"message": "Rate limit reached"}})),
            )
        }),
    );
    let addr = spawn(app).await;

    let err = provider_for(addr).chat(&hello()).await.unwrap_err();
    match err {
        Error::Upstream { status, message, .. } => {
            assert_eq!(status, Some(429));
            assert!(message.contains("Rate limit reached"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_failure_has_no_status() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = provider_for(addr).chat(&hello()).await.unwrap_err();
    assert!(matches!(err, Error::Http(_) | Error::Timeout(_)));
}
