use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;

pub async fn page_not_found_handler(uri: Uri) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(format!("No route for {}", uri.path())))
}
