use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use super::application::EntryService;
use super::domain::EntryUpdate;
use crate::http::extract::{ApiJson, ApiPath};
use crate::shared::errors::AppResult;

pub async fn get_entry(
    State(entries): State<Arc<EntryService>>,
    ApiPath(entry_id): ApiPath<Uuid>,
) -> AppResult<impl IntoResponse> {
    let entry = entries.get_entry(&entry_id).await?;
    Ok(Json(json!({ "status": true, "entry": entry })))
}

pub async fn update_entry(
    State(entries): State<Arc<EntryService>>,
    ApiPath(entry_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<EntryUpdate>,
) -> AppResult<impl IntoResponse> {
    let entry = entries.update_entry(&entry_id, body).await?;
    Ok(Json(json!({ "status": true, "entry": entry })))
}

pub async fn delete_entry(
    State(entries): State<Arc<EntryService>>,
    ApiPath(entry_id): ApiPath<Uuid>,
) -> AppResult<impl IntoResponse> {
    let entry = entries.delete_entry(&entry_id).await?;
    Ok(Json(json!({ "status": true, "entry": entry })))
}
