use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::log_error;
use crate::shared::errors::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log_error!("Request failed ({}): {}", status, self);
        }

        let body = Json(json!({
            "status": false,
            "message": self.message(),
        }));
        (status, body).into_response()
    }
}
