use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use ds_core::{attach_documentation, DocStyle, FunctionRecord, Language};
use ds_generator::{generate_all, to_doc_map, DocRequest};
use ds_history::HistoryRecord;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::info;

const DEFAULT_HISTORY_LIMIT: usize = 20;
const MAX_HISTORY_LIMIT: usize = 200;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn parser_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/parse", post(parse))
        .route("/api/v1/insert", post(insert))
        .route("/api/v1/document", post(document))
}

pub fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/history", get(list_history))
        .route("/api/v1/history/{id}", get(get_history).delete(delete_history))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptimeSecs": state.start_time.elapsed().as_secs(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub content: String,
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub functions: Vec<FunctionRecord>,
    pub count: usize,
}

async fn parse(Json(req): Json<ParseRequest>) -> Result<Json<ParseResponse>, ApiError> {
    let language: Language = req.language.parse()?;
    let functions = ds_parser::extract(&req.content, language);
    Ok(Json(ParseResponse { count: functions.len(), functions }))
}

#[derive(Debug, Deserialize)]
pub struct InsertRequest {
    pub content: String,
    pub language: String,
    #[serde(default)]
    pub documentation: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct InsertResponse {
    pub content: String,
    pub updated: usize,
}

async fn insert(Json(req): Json<InsertRequest>) -> Result<Json<InsertResponse>, ApiError> {
    let language: Language = req.language.parse()?;
    let out = ds_parser::document(&req.content, language, &req.documentation);
    Ok(Json(InsertResponse { content: out.content, updated: out.updated }))
}

#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    pub filename: String,
    pub content: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub content: String,
    pub functions: Vec<FunctionRecord>,
    pub updated: usize,
    pub history_id: String,
}

/// Extract, generate, re-insert and record the run.
async fn document(
    State(state): State<AppState>,
    Json(req): Json<DocumentRequest>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let language = match &req.language {
        Some(lang) => lang.parse::<Language>()?,
        None => Language::from_path(&req.filename).ok_or_else(|| {
            ApiError::bad_request(format!("cannot infer language from filename: {}", req.filename))
        })?,
    };
    let style = match &req.style {
        Some(style) => style.parse::<DocStyle>()?,
        None => state.config.generator.default_style.unwrap_or_else(|| language.default_style()),
    };

    let mut functions = ds_parser::extract(&req.content, language);
    let requests = functions
        .iter()
        .map(|record| DocRequest::from_record(record, language))
        .collect();
    let generated = generate_all(state.generator.clone(), requests, style, state.batch).await;
    let docs = to_doc_map(&generated);
    attach_documentation(&mut functions, &docs);

    let out = ds_parser::document(&req.content, language, &docs);
    let record = HistoryRecord::new(&req.filename, language, &req.content, &out.content);
    state.history.save(&record).await?;
    info!(
        id = %record.id,
        filename = %req.filename,
        functions = functions.len(),
        updated = out.updated,
        "documented file"
    );

    Ok(Json(DocumentResponse {
        content: out.content,
        functions,
        updated: out.updated,
        history_id: record.id,
    }))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

async fn list_history(
    State(state): State<AppState>,
    Query(q): Query<HistoryQuery>,
) -> Result<Json<Value>, ApiError> {
    let limit = q.limit.unwrap_or(DEFAULT_HISTORY_LIMIT).min(MAX_HISTORY_LIMIT);
    let records = state.history.list(limit).await?;
    Ok(Json(json!({ "count": records.len(), "history": records })))
}

async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HistoryRecord>, ApiError> {
    Ok(Json(state.history.get(&id).await?))
}

async fn delete_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.history.delete(&id).await?;
    info!(id = %id, "history record deleted");
    Ok(StatusCode::NO_CONTENT)
}
