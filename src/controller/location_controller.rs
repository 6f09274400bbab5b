use std::sync::Arc;
use axum::{Extension, Json, Router};
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::routing::get;
use crate::controller::AppState;
use crate::helpers::api_error::{parse_id, ApiError};
use crate::service::dto::LocationDto;
use crate::service::{LocationReply, TravelService};

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/locations", get(get_locations).post(create_location).put(update_location))
        .route("/locations/:id", get(get_location).delete(delete_location))
        .route_layer(Extension(app_state.travel_service))
}

pub async fn get_locations(
    Extension(travel_service): Extension<Arc<TravelService>>,
) -> Result<LocationReply, ApiError> {
    Ok(travel_service.location_get_all().await?)
}

pub async fn get_location(
    Extension(travel_service): Extension<Arc<TravelService>>,
    Path(id): Path<String>,
) -> Result<LocationReply, ApiError> {
    let id = parse_id(&id)?;
    Ok(travel_service.location(id).await?)
}

pub async fn create_location(
    Extension(travel_service): Extension<Arc<TravelService>>,
    body: Result<Json<LocationDto>, JsonRejection>,
) -> Result<LocationReply, ApiError> {
    let Json(location) = body?;
    Ok(travel_service.insert_location(location).await?)
}

pub async fn update_location(
    Extension(travel_service): Extension<Arc<TravelService>>,
    body: Result<Json<LocationDto>, JsonRejection>,
) -> Result<LocationReply, ApiError> {
    let Json(location) = body?;
    Ok(travel_service.update_location(location).await?)
}

pub async fn delete_location(
    Extension(travel_service): Extension<Arc<TravelService>>,
    Path(id): Path<String>,
) -> Result<LocationReply, ApiError> {
    let id = parse_id(&id)?;
    Ok(travel_service.delete_location(id).await?)
}
