use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde_json::{Value, json};
use sqirvy_web::{AppState, QueryResponse, ServeHandle, WEB_SYSTEM, serve};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Provider {
    status: u16,
    delay: Duration,
    last: Arc<Mutex<Option<Value>>>,
}

async fn completions(
    State(provider): State<Provider>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    *provider.last.lock().unwrap() = Some(body);
    tokio::time::sleep(provider.delay).await;
    let status = StatusCode::from_u16(provider.status).unwrap();
    let reply = json!({ "choices": [{ "message": { "role": "assistant", "content": "42" } }] });
    (status, Json(reply))
}

/// Start a fake OpenAI endpoint and a server whose credentials point at it.
async fn start(status: u16, delay: Duration, timeout: Option<Duration>) -> (ServeHandle, Provider) {
    let provider = Provider {
        status,
        delay,
        ..Provider::default()
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(provider.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    let vars: HashMap<&str, String> =
        [("OPENAI_API_KEY", "sk-test".to_owned()), ("OPENAI_BASE_URL", base)].into();
    let state = AppState::new(
        Arc::new(move |var: &'static str| vars.get(var).cloned()),
        timeout,
    );
    (serve("127.0.0.1:0", state).await.unwrap(), provider)
}

async fn post_query(handle: &ServeHandle, body: Value) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(format!("http://{}/query", handle.addr))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn lists_models() {
    let (handle, _) = start(200, Duration::ZERO, None).await;
    let body: Value = reqwest::get(format!("http://{}/models", handle.addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let models = body["models"].as_array().unwrap();
    assert_eq!(models.len(), model::models().len());
    assert_eq!(
        models[0],
        json!({ "name": "claude-3-5-haiku-latest", "provider": "anthropic" })
    );
    let names: Vec<_> = models.iter().map(|m| m["name"].as_str().unwrap()).collect();
    assert!(names.windows(2).all(|w| w[0] < w[1]));
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn answers_query_with_system_line() {
    let (handle, provider) = start(200, Duration::ZERO, None).await;
    let (status, body) = post_query(
        &handle,
        json!({ "model": "gpt-4o", "prompt": "meaning of life?", "temperature": 25 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let answer: QueryResponse = serde_json::from_value(body).unwrap();
    assert_eq!(answer.result, "42");

    let sent = provider.last.lock().unwrap().clone().unwrap();
    assert_eq!(
        sent["messages"][0]["content"],
        format!("{WEB_SYSTEM}\n\nmeaning of life?")
    );
    assert_eq!(sent["temperature"].as_f64(), Some(0.5));
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn bad_requests() {
    let (handle, provider) = start(200, Duration::ZERO, None).await;

    let (status, body) = post_query(&handle, json!({ "model": "foo-bar", "prompt": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("unrecognized model"));

    let (status, _) = post_query(&handle, json!({ "model": "gpt-4o", "prompt": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_query(
        &handle,
        json!({ "model": "gpt-4o", "prompt": "x", "temperature": 150 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("temperature"));

    let (status, body) = post_query(&handle, json!({ "prompt": "missing model" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    assert!(provider.last.lock().unwrap().is_none());
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn missing_credentials_are_server_errors() {
    let (handle, _) = start(200, Duration::ZERO, None).await;
    let (status, body) = post_query(
        &handle,
        json!({ "model": "claude-3-5-sonnet-latest", "prompt": "hi" }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("ANTHROPIC_API_KEY"));
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn provider_failure_is_a_server_error() {
    let (handle, _) = start(503, Duration::ZERO, None).await;
    let (status, body) = post_query(&handle, json!({ "model": "gpt-4o", "prompt": "hi" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("503"));
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn slow_provider_times_out() {
    let (handle, _) = start(
        200,
        Duration::from_secs(5),
        Some(Duration::from_millis(100)),
    )
    .await;
    let (status, body) = post_query(&handle, json!({ "model": "gpt-4o", "prompt": "hi" })).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert!(body["error"].as_str().unwrap().contains("deadline"));
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn cors_headers() {
    let (handle, _) = start(200, Duration::ZERO, None).await;
    let client = reqwest::Client::new();
    let response = client
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{}/query", handle.addr),
        )
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let methods = response.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .to_owned();
    assert!(methods.contains("POST"));

    let response = client
        .get(format!("http://{}/models", handle.addr))
        .header("origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    drop(client);
    handle.shutdown().await.unwrap();
}
