//! HTTP surface: router, shared state and middleware.
pub mod extract;
pub mod middleware;
pub mod response;

use axum::extract::{DefaultBodyLimit, FromRef, State};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;

use crate::config::StorageBackend;
use crate::modules::entry::{self, EntryService};
use crate::modules::list::{self, ListService};
use crate::shared::errors::AppError;
pub use middleware::CorsConfig;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub list_service: Arc<ListService>,
    pub entry_service: Arc<EntryService>,
    pub backend: StorageBackend,
    pub cors: Arc<CorsConfig>,
}

async fn healthz(State(backend): State<StorageBackend>) -> impl IntoResponse {
    Json(json!({ "status": true, "backend": backend }))
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            "/list",
            post(list::handlers::create_list).get(list::handlers::get_all_lists),
        )
        .route(
            "/list/:list_id",
            get(list::handlers::get_list)
                .patch(list::handlers::update_list)
                .delete(list::handlers::delete_list),
        )
        .route("/list/:list_id/collection", put(list::handlers::move_list))
        .route("/list/:list_id/pin", post(list::handlers::pin_list))
        .route("/list/:list_id/reset", post(list::handlers::reset_list))
        .route(
            "/list/:list_id/entries",
            post(list::handlers::add_entry).get(list::handlers::get_entries),
        )
        .route(
            "/list/:list_id/incomplete",
            get(list::handlers::get_incomplete_entries),
        )
        .route("/list/:list_id/random", get(list::handlers::get_random_entry))
        .route(
            "/list/:list_id/tags",
            get(list::handlers::get_list_tags).post(list::handlers::add_list_tag),
        )
        .route(
            "/list/:list_id/entries/:entry_id/tags",
            post(list::handlers::add_entry_tag),
        )
        .route(
            "/list/:list_id/entries/:entry_id/tags/:tag",
            delete(list::handlers::remove_entry_tag),
        )
        .route(
            "/entry/:entry_id",
            get(entry::handlers::get_entry)
                .patch(entry::handlers::update_entry)
                .delete(entry::handlers::delete_entry),
        )
        .fallback(route_not_found)
        .layer(from_fn_with_state(
            Arc::clone(&state.cors),
            middleware::cors_middleware,
        ))
        .layer(from_fn(middleware::request_log_middleware))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
