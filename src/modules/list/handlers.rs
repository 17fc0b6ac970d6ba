use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use super::application::ListService;
use super::domain::{EntryFilter, ListUpdate, NewList};
use crate::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::modules::entry::domain::NewEntry;
use crate::shared::errors::AppResult;
use crate::shared::utils::tag_color;

#[derive(Debug, Default, Deserialize)]
pub struct ListsQuery {
    pub order: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveListRequest {
    #[serde(default)]
    pub collection_id: Option<Uuid>,
}

fn pin_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct PinListRequest {
    #[serde(default = "pin_by_default")]
    pub pinned: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct EntriesQuery {
    pub filter: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RandomQuery {
    pub incomplete: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TagRequest {
    pub tag: String,
}

#[derive(Debug, Serialize)]
pub struct TagView {
    pub name: String,
    pub color: &'static str,
}

pub async fn create_list(
    State(lists): State<Arc<ListService>>,
    ApiJson(body): ApiJson<NewList>,
) -> AppResult<impl IntoResponse> {
    let list = lists.create_list(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": true, "list": list })),
    ))
}

pub async fn get_all_lists(
    State(lists): State<Arc<ListService>>,
    ApiQuery(query): ApiQuery<ListsQuery>,
) -> AppResult<impl IntoResponse> {
    let lists = match query.order.as_deref() {
        Some("home") => lists.get_home_lists().await?,
        _ => lists.get_all_lists().await?,
    };
    Ok(Json(json!({ "status": true, "lists": lists })))
}

pub async fn get_list(
    State(lists): State<Arc<ListService>>,
    ApiPath(list_id): ApiPath<Uuid>,
) -> AppResult<impl IntoResponse> {
    let list = lists.get_list(&list_id).await?;
    Ok(Json(json!({ "status": true, "list": list })))
}

pub async fn update_list(
    State(lists): State<Arc<ListService>>,
    ApiPath(list_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<ListUpdate>,
) -> AppResult<impl IntoResponse> {
    let list = lists.update_list(&list_id, body).await?;
    Ok(Json(json!({ "status": true, "success": list })))
}

pub async fn delete_list(
    State(lists): State<Arc<ListService>>,
    ApiPath(list_id): ApiPath<Uuid>,
) -> AppResult<impl IntoResponse> {
    let (list, deleted_entries) = lists.delete_list(&list_id).await?;
    Ok(Json(json!({
        "status": true,
        "success": list,
        "deletedEntries": deleted_entries,
    })))
}

pub async fn move_list(
    State(lists): State<Arc<ListService>>,
    ApiPath(list_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<MoveListRequest>,
) -> AppResult<impl IntoResponse> {
    let list = lists.move_list(&list_id, body.collection_id).await?;
    Ok(Json(json!({ "status": true, "success": list })))
}

pub async fn pin_list(
    State(lists): State<Arc<ListService>>,
    ApiPath(list_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<PinListRequest>,
) -> AppResult<impl IntoResponse> {
    let list = lists.pin_list(&list_id, body.pinned).await?;
    Ok(Json(json!({ "status": true, "success": list })))
}

pub async fn reset_list(
    State(lists): State<Arc<ListService>>,
    ApiPath(list_id): ApiPath<Uuid>,
) -> AppResult<impl IntoResponse> {
    let summary = lists.reset_list_entries(&list_id).await?;
    Ok(Json(json!({
        "status": true,
        "list": summary.list,
        "resetCount": summary.reset_count,
    })))
}

pub async fn add_entry(
    State(lists): State<Arc<ListService>>,
    ApiPath(list_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<NewEntry>,
) -> AppResult<impl IntoResponse> {
    let entry = lists.add_entry_to_list(&list_id, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": true, "entry": entry })),
    ))
}

pub async fn get_entries(
    State(lists): State<Arc<ListService>>,
    ApiPath(list_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<EntriesQuery>,
) -> AppResult<impl IntoResponse> {
    let filter: EntryFilter = query.filter.as_deref().unwrap_or("all").parse()?;
    let entries = lists
        .get_filtered_entries(&list_id, filter, query.tag.as_deref())
        .await?;
    Ok(Json(json!({ "status": true, "entries": entries })))
}

pub async fn get_incomplete_entries(
    State(lists): State<Arc<ListService>>,
    ApiPath(list_id): ApiPath<Uuid>,
) -> AppResult<impl IntoResponse> {
    let entries = lists.get_incomplete_entries(&list_id).await?;
    Ok(Json(json!({ "status": true, "entries": entries })))
}

pub async fn get_random_entry(
    State(lists): State<Arc<ListService>>,
    ApiPath(list_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<RandomQuery>,
) -> AppResult<impl IntoResponse> {
    // Only the literal "true" restricts the pick
    let only_incomplete = query.incomplete.as_deref() == Some("true");
    let mut rng = StdRng::from_entropy();

    let entry = lists
        .get_random_entry(&list_id, only_incomplete, &mut rng)
        .await?;
    Ok(Json(json!({ "status": true, "entry": entry })))
}

pub async fn get_list_tags(
    State(lists): State<Arc<ListService>>,
    ApiPath(list_id): ApiPath<Uuid>,
) -> AppResult<impl IntoResponse> {
    let tags: Vec<TagView> = lists
        .get_list_tags(&list_id)
        .await?
        .into_iter()
        .map(|name| TagView {
            color: tag_color(&name),
            name,
        })
        .collect();
    Ok(Json(json!({ "status": true, "tags": tags })))
}

pub async fn add_list_tag(
    State(lists): State<Arc<ListService>>,
    ApiPath(list_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<TagRequest>,
) -> AppResult<impl IntoResponse> {
    let list = lists.add_tag(&list_id, &body.tag).await?;
    Ok(Json(json!({ "status": true, "list": list })))
}

pub async fn add_entry_tag(
    State(lists): State<Arc<ListService>>,
    ApiPath((list_id, entry_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(body): ApiJson<TagRequest>,
) -> AppResult<impl IntoResponse> {
    let entry = lists
        .add_tag_to_entry(&list_id, &entry_id, &body.tag)
        .await?;
    Ok(Json(json!({ "status": true, "entry": entry })))
}

pub async fn remove_entry_tag(
    State(lists): State<Arc<ListService>>,
    ApiPath((list_id, entry_id, tag)): ApiPath<(Uuid, Uuid, String)>,
) -> AppResult<impl IntoResponse> {
    let entry = lists
        .remove_tag_from_entry(&list_id, &entry_id, &tag)
        .await?;
    Ok(Json(json!({ "status": true, "entry": entry })))
}
