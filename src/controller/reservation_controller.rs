use std::sync::Arc;
use axum::{Extension, Json, Router};
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::routing::get;
use crate::controller::AppState;
use crate::helpers::api_error::{parse_id, ApiError};
use crate::service::dto::ReservationDto;
use crate::service::{ReservationReply, TravelService};

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/reservations",
            get(get_reservations).post(create_reservation).put(update_reservation),
        )
        .route("/reservations/:id", get(get_reservation).delete(delete_reservation))
        .route_layer(Extension(app_state.travel_service))
}

pub async fn get_reservations(
    Extension(travel_service): Extension<Arc<TravelService>>,
) -> Result<ReservationReply, ApiError> {
    Ok(travel_service.reservation_get_all().await?)
}

pub async fn get_reservation(
    Extension(travel_service): Extension<Arc<TravelService>>,
    Path(id): Path<String>,
) -> Result<ReservationReply, ApiError> {
    let id = parse_id(&id)?;
    Ok(travel_service.reservation(id).await?)
}

pub async fn create_reservation(
    Extension(travel_service): Extension<Arc<TravelService>>,
    body: Result<Json<ReservationDto>, JsonRejection>,
) -> Result<ReservationReply, ApiError> {
    let Json(reservation) = body?;
    Ok(travel_service.insert_reservation(reservation).await?)
}

pub async fn update_reservation(
    Extension(travel_service): Extension<Arc<TravelService>>,
    body: Result<Json<ReservationDto>, JsonRejection>,
) -> Result<ReservationReply, ApiError> {
    let Json(reservation) = body?;
    Ok(travel_service.update_reservation(reservation).await?)
}

pub async fn delete_reservation(
    Extension(travel_service): Extension<Arc<TravelService>>,
    Path(id): Path<String>,
) -> Result<ReservationReply, ApiError> {
    let id = parse_id(&id)?;
    Ok(travel_service.delete_reservation(id).await?)
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};
    use crate::controller::test_support::{send, test_app};

    async fn holiday(app: &axum::Router) -> Value {
        let (_, location) = send(
            app,
            Method::POST,
            "/locations",
            Some(json!({"street": "Kalverstraat", "number": "92", "city": "Amsterdam", "country": "Netherlands"})),
        )
        .await;
        let (_, holiday) = send(
            app,
            Method::POST,
            "/holidays",
            Some(json!({
                "title": "Canals",
                "duration": 4,
                "startDate": "2025-04-27",
                "price": "320",
                "freeSlots": 12,
                "location": location
            })),
        )
        .await;
        holiday
    }

    #[tokio::test]
    async fn listing_embeds_holiday_and_location() {
        let app = test_app();
        let holiday = holiday(&app).await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/reservations",
            Some(json!({"contactName": "Joost", "phoneNumber": "+31 6 1234", "holiday": holiday})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, "/reservations", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["contactName"], json!("Joost"));
        assert_eq!(body[0]["holiday"]["title"], json!("Canals"));
        assert_eq!(body[0]["holiday"]["location"]["city"], json!("Amsterdam"));
    }

    #[tokio::test]
    async fn round_trip_reflects_the_update() {
        let app = test_app();
        let holiday = holiday(&app).await;
        let (_, id) = send(
            &app,
            Method::POST,
            "/reservations",
            Some(json!({"contactName": "Joost", "phoneNumber": "+31 6 1234", "holiday": holiday})),
        )
        .await;

        let (_, body) = send(&app, Method::GET, &format!("/reservations/{}", id), None).await;
        assert_eq!(
            body,
            json!({"id": id, "contactName": "Joost", "phoneNumber": "+31 6 1234", "holiday": holiday})
        );

        let changed = json!({"id": id, "contactName": "Sanne", "phoneNumber": "+31 6 9999", "holiday": holiday});
        let (status, _) = send(&app, Method::PUT, "/reservations", Some(changed.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, Method::GET, &format!("/reservations/{}", id), None).await;
        assert_eq!(body, changed);
    }

    #[tokio::test]
    async fn reservation_for_unknown_holiday_is_a_client_error() {
        let app = test_app();
        let (status, _) = send(
            &app,
            Method::POST,
            "/reservations",
            Some(json!({"contactName": "Joost", "phoneNumber": "1", "holiday": 31})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
