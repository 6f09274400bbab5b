use std::sync::Arc;
use axum::{Extension, Json, Router};
use axum::extract::{Path, Query};
use axum::extract::rejection::JsonRejection;
use axum::routing::get;
use serde::Deserialize;
use crate::controller::AppState;
use crate::helpers::api_error::{parse_id, ApiError};
use crate::models::holiday::HolidayFilter;
use crate::service::dto::{parse_date, HolidayDto};
use crate::service::{HolidayReply, TravelService};

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/holidays", get(get_holidays).post(create_holiday).put(update_holiday))
        .route("/holidays/:id", get(get_holiday).delete(delete_holiday))
        .route_layer(Extension(app_state.travel_service))
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct HolidayFilterQuery {
    pub location: Option<String>,
    pub duration: Option<String>,
    pub start_date: Option<String>,
}

impl HolidayFilterQuery {
    /// Blank parameters, and a duration of zero or less, are treated as absent.
    fn into_filter(self) -> Result<HolidayFilter, ApiError> {
        let location = self.location.filter(|value| !value.trim().is_empty());

        let duration = match self.duration.filter(|value| !value.trim().is_empty()) {
            Some(value) => Some(value.parse::<i32>().map_err(|e| {
                ApiError::BadRequest(format!("invalid duration '{}': {}", value, e))
            })?),
            None => None,
        }
        .filter(|duration| *duration > 0);

        let start_date = match self.start_date.filter(|value| !value.trim().is_empty()) {
            Some(value) => Some(parse_date(&value).map_err(|e| {
                ApiError::BadRequest(format!("invalid startDate '{}': {}", value, e))
            })?),
            None => None,
        };

        Ok(HolidayFilter {
            location,
            duration,
            start_date,
        })
    }
}

/// Creation body: `startDate` and `price` arrive as strings.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateHoliday {
    pub title: String,
    pub duration: i32,
    pub start_date: String,
    pub price: String,
    pub free_slots: i32,
    #[serde(rename = "location")]
    pub location_id: i32,
}

impl TryFrom<CreateHoliday> for HolidayDto {
    type Error = ApiError;

    fn try_from(body: CreateHoliday) -> Result<Self, Self::Error> {
        let start_date = parse_date(&body.start_date).map_err(|e| {
            ApiError::BadRequest(format!("invalid startDate '{}': {}", body.start_date, e))
        })?;

        let price = body
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite())
            .ok_or_else(|| ApiError::BadRequest(format!("invalid price '{}'", body.price)))?;

        Ok(HolidayDto {
            id: 0,
            title: body.title,
            start_date,
            duration: body.duration,
            price,
            free_slots: body.free_slots,
            location_id: body.location_id,
        })
    }
}

pub async fn get_holidays(
    Extension(travel_service): Extension<Arc<TravelService>>,
    Query(query): Query<HolidayFilterQuery>,
) -> Result<HolidayReply, ApiError> {
    let filter = query.into_filter()?;
    Ok(travel_service.holiday_get_all(filter).await?)
}

pub async fn get_holiday(
    Extension(travel_service): Extension<Arc<TravelService>>,
    Path(id): Path<String>,
) -> Result<HolidayReply, ApiError> {
    let id = parse_id(&id)?;
    Ok(travel_service.holiday(id).await?)
}

pub async fn create_holiday(
    Extension(travel_service): Extension<Arc<TravelService>>,
    body: Result<Json<CreateHoliday>, JsonRejection>,
) -> Result<HolidayReply, ApiError> {
    let Json(body) = body?;
    let holiday = HolidayDto::try_from(body)?;
    Ok(travel_service.insert_holiday(holiday).await?)
}

pub async fn update_holiday(
    Extension(travel_service): Extension<Arc<TravelService>>,
    body: Result<Json<HolidayDto>, JsonRejection>,
) -> Result<HolidayReply, ApiError> {
    let Json(holiday) = body?;
    Ok(travel_service.update_holiday(holiday).await?)
}

pub async fn delete_holiday(
    Extension(travel_service): Extension<Arc<TravelService>>,
    Path(id): Path<String>,
) -> Result<HolidayReply, ApiError> {
    let id = parse_id(&id)?;
    Ok(travel_service.delete_holiday(id).await?)
}
