use crate::{app, app_with_state, state::AppState};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use ds_core::config::DocsmithConfig;
use ds_core::{DocStyle, DsError};
use ds_generator::{BatchConfig, DocGenerator, DocRequest};
use ds_history::{FileHistoryStore, HistoryStore, MemoryHistoryStore};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Fails every request; the document endpoint must still succeed.
struct FailingGenerator;

#[async_trait]
impl DocGenerator for FailingGenerator {
    async fn generate(&self, _request: &DocRequest, _style: DocStyle) -> ds_core::Result<String> {
        Err(DsError::Generator("offline".into()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

const PY_SOURCE: &str = "def add(a, b):\n    return a + b\n\n\nclass Greeter:\n    def hello(self):\n        return 'hi'\n";

fn test_state() -> (AppState, Arc<MemoryHistoryStore>) {
    let history = Arc::new(MemoryHistoryStore::new());
    let state = AppState::new()
        .with_history(history.clone())
        .with_batch(BatchConfig { concurrency: 4, delay: Duration::ZERO });
    (state, history)
}

async fn send(state: &AppState, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app_with_state(state.clone()).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

// ---- health ----

#[tokio::test]
async fn test_health() {
    let resp = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptimeSecs"].is_u64());
}

#[tokio::test]
async fn test_unknown_route_404() {
    let (state, _) = test_state();
    let resp = app_with_state(state).oneshot(get("/api/v1/nothing")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ---- parse ----

#[tokio::test]
async fn test_parse_python() {
    let (state, _) = test_state();
    let (status, body) =
        send(&state, post_json("/api/v1/parse", json!({ "content": PY_SOURCE, "language": "python" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["functions"][0]["name"], "add");
    assert_eq!(body["functions"][0]["kind"], "function");
    assert_eq!(body["functions"][0]["startLine"], 1);
    assert_eq!(body["functions"][0]["parameters"][1]["name"], "b");
    assert_eq!(body["functions"][1]["name"], "Greeter");
    assert_eq!(body["functions"][1]["kind"], "class");
}

#[tokio::test]
async fn test_parse_javascript_alias() {
    let (state, _) = test_state();
    let src = "/** Sum. */\nfunction sum(a, b) { return a + b; }\n";
    let (status, body) = send(&state, post_json("/api/v1/parse", json!({ "content": src, "language": "ts" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["functions"][0]["existingDocumentation"], "Sum.");
    assert_eq!(body["functions"][0]["endLine"], 2);
}

#[tokio::test]
async fn test_parse_empty_content() {
    let (state, _) = test_state();
    let (status, body) = send(&state, post_json("/api/v1/parse", json!({ "content": "", "language": "py" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["functions"], json!([]));
}

#[tokio::test]
async fn test_parse_unsupported_language() {
    let (state, _) = test_state();
    let (status, body) = send(&state, post_json("/api/v1/parse", json!({ "content": "x", "language": "cobol" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
    assert!(body["error"]["message"].as_str().unwrap().contains("cobol"));
}

// ---- insert ----

#[tokio::test]
async fn test_insert_python() {
    let (state, _) = test_state();
    let (status, body) = send(
        &state,
        post_json(
            "/api/v1/insert",
            json!({
                "content": "def add(a, b):\n    return a + b\n",
                "language": "python",
                "documentation": { "add": "Add two numbers.", "missing": "Ignored." }
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 1);
    assert_eq!(
        body["content"],
        "def add(a, b):\n    \"\"\"\n    Add two numbers.\n    \"\"\"\n    return a + b\n"
    );
}

#[tokio::test]
async fn test_insert_javascript() {
    let (state, _) = test_state();
    let (status, body) = send(
        &state,
        post_json(
            "/api/v1/insert",
            json!({
                "content": "function sum(a, b) {\n  return a + b;\n}\n",
                "language": "javascript",
                "documentation": { "sum": "Sum two numbers." }
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "  /**\n   * Sum two numbers.\n   */\nfunction sum(a, b) {\n  return a + b;\n}\n");
}

#[tokio::test]
async fn test_insert_without_documentation_is_noop() {
    let (state, _) = test_state();
    let (status, body) = send(
        &state,
        post_json("/api/v1/insert", json!({ "content": PY_SOURCE, "language": "python" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 0);
    assert_eq!(body["content"], PY_SOURCE);
}

// ---- document ----

#[tokio::test]
async fn test_document_end_to_end() {
    let (state, history) = test_state();
    let (status, body) = send(
        &state,
        post_json("/api/v1/document", json!({ "filename": "math_utils.py", "content": PY_SOURCE })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 2);
    let content = body["content"].as_str().unwrap();
    assert!(content.starts_with("def add(a, b):\n    \"\"\"\n    Add.\n\n    Args:\n"));
    assert!(content.contains("class Greeter:\n    \"\"\"\n    Greeter.\n    \"\"\"\n"));
    assert_eq!(body["functions"][0]["generatedDocumentation"].as_str().unwrap().lines().next(), Some("Add."));

    let id = body["historyId"].as_str().unwrap();
    let saved = history.get(id).await.unwrap();
    assert_eq!(saved.filename, "math_utils.py");
    assert_eq!(saved.content_before, PY_SOURCE);
    assert_eq!(saved.content_after, content);
}

#[tokio::test]
async fn test_document_style_override() {
    let (state, _) = test_state();
    let (status, body) = send(
        &state,
        post_json(
            "/api/v1/document",
            json!({
                "filename": "a.py",
                "content": "def add(a, b):\n    return a + b\n",
                "style": "sphinx"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["content"].as_str().unwrap().contains("    :param a: Description of a.\n"));
}

#[tokio::test]
async fn test_document_javascript_from_extension() {
    let (state, _) = test_state();
    let src = "export function fetchUser(id) {\n  return db.get(id);\n}\n";
    let (status, body) =
        send(&state, post_json("/api/v1/document", json!({ "filename": "user.mjs", "content": src }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["content"],
        "  /**\n   * Fetch user.\n   * @param {*} id - Description of id.\n   */\nexport function fetchUser(id) {\n  return db.get(id);\n}\n"
    );
}

#[tokio::test]
async fn test_document_unknown_extension() {
    let (state, history) = test_state();
    let (status, body) =
        send(&state, post_json("/api/v1/document", json!({ "filename": "notes.txt", "content": "hi" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("notes.txt"));
    assert_eq!(history.count().await, 0);
}

#[tokio::test]
async fn test_document_bad_style() {
    let (state, _) = test_state();
    let (status, body) = send(
        &state,
        post_json("/api/v1/document", json!({ "filename": "a.py", "content": "", "style": "haiku" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_document_generator_failures_leave_source() {
    let (state, history) = test_state();
    let state = state.with_generator(Arc::new(FailingGenerator));
    let (status, body) = send(
        &state,
        post_json("/api/v1/document", json!({ "filename": "a.py", "content": PY_SOURCE })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 0);
    assert_eq!(body["content"], PY_SOURCE);
    assert_eq!(history.count().await, 1);
}

// ---- history ----

#[tokio::test]
async fn test_history_list_get_delete() {
    let (state, _) = test_state();
    for name in ["one.py", "two.py", "three.py"] {
        let (status, _) = send(
            &state,
            post_json("/api/v1/document", json!({ "filename": name, "content": PY_SOURCE })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&state, get("/api/v1/history")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);

    let (_, body) = send(&state, get("/api/v1/history?limit=2")).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["history"].as_array().unwrap().len(), 2);

    let id = body["history"][0]["id"].as_str().unwrap().to_string();
    let (status, record) = send(&state, get(&format!("/api/v1/history/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["id"], id.as_str());
    assert_eq!(record["contentBefore"], PY_SOURCE);

    let (status, _) = send(&state, delete(&format!("/api/v1/history/{id}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&state, get(&format!("/api/v1/history/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");

    let (status, _) = send(&state, delete(&format!("/api/v1/history/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_empty() {
    let (state, _) = test_state();
    let (status, body) = send(&state, get("/api/v1/history")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "count": 0, "history": [] }));
}

#[tokio::test]
async fn test_history_with_file_store() {
    let tmp = tempfile::tempdir().unwrap();
    let store = Arc::new(FileHistoryStore::new(tmp.path()));
    let (state, _) = test_state();
    let state = state.with_history(store.clone());

    let (status, body) = send(
        &state,
        post_json("/api/v1/document", json!({ "filename": "a.py", "content": PY_SOURCE })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let id = body["historyId"].as_str().unwrap();
    assert!(tmp.path().join(format!("{id}.json")).exists());
    assert_eq!(store.list(10).await.unwrap().len(), 1);
}

// ---- state wiring ----

#[tokio::test]
async fn test_state_from_config_without_key_uses_template() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = DocsmithConfig::default();
    config.history.dir = tmp.path().to_path_buf();

    let state = AppState::from_config(config).unwrap();
    assert_eq!(state.generator.name(), "template");
    assert_eq!(state.batch.concurrency, 5);
}

#[tokio::test]
async fn test_state_from_config_with_key_uses_http() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = DocsmithConfig::default();
    config.history.dir = tmp.path().to_path_buf();
    config.generator.api_key = Some("sk-test".into());

    let state = AppState::from_config(config).unwrap();
    assert_eq!(state.generator.name(), "http");
}
