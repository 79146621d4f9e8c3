//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::application::ReservationService;
use crate::interfaces::http::common::{
    rejection_error, rejection_flag, ApiError, ApiResponse, ValidatedJson,
};
use crate::notifications::{
    Event, ReservationCancelledEvent, ReservationChangedEvent, SharedEventBus,
};

use super::dto::*;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub service: Arc<ReservationService>,
    pub event_bus: SharedEventBus,
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation stored", body = ApiResponse<bool>),
        (status = 404, description = "Room or client not found", body = ApiResponse<bool>),
        (status = 410, description = "Room disabled", body = ApiResponse<bool>),
        (status = 422, description = "Overlapping stay or invalid body", body = ApiResponse<bool>),
        (status = 400, description = "Invalid stay", body = ApiResponse<bool>)
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<bool>>), ApiError<bool>> {
    state
        .service
        .create(request.into())
        .await
        .map_err(rejection_flag)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(true))))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/full",
    tag = "Reservations",
    request_body = FullReservationRequest,
    responses(
        (status = 201, description = "Guest, payment and reservation stored", body = ApiResponse<FullReservationResponse>),
        (status = 400, description = "Guest or card rejected, or invalid stay"),
        (status = 404, description = "Room not found"),
        (status = 410, description = "Room disabled"),
        (status = 422, description = "Overlapping stay or invalid body")
    )
)]
pub async fn create_full_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<FullReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FullReservationResponse>>), ApiError<FullReservationResponse>>
{
    let created = state
        .service
        .create(request.into())
        .await
        .map_err(rejection_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(FullReservationResponse {
            reservation: created.reservation.into(),
            client: created.client.into(),
            document: created.document.map(|bytes| BASE64.encode(bytes)),
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    responses(
        (status = 200, description = "All reservations, newest first", body = ApiResponse<Vec<ReservationDto>>)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
) -> Result<Json<ApiResponse<Vec<ReservationDto>>>, ApiError<Vec<ReservationDto>>> {
    let reservations = state.service.list().await.map_err(rejection_error)?;
    Ok(Json(ApiResponse::success(
        reservations.into_iter().map(ReservationDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError<ReservationDto>> {
    let reservation = state.service.get(id).await.map_err(rejection_error)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Reservation updated", body = ApiResponse<bool>),
        (status = 404, description = "Reservation or room not found", body = ApiResponse<bool>),
        (status = 410, description = "Target room disabled", body = ApiResponse<bool>),
        (status = 422, description = "Overlapping stay", body = ApiResponse<bool>)
    )
)]
pub async fn update_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateReservationRequest>,
) -> Result<Json<ApiResponse<bool>>, ApiError<bool>> {
    let updated = state
        .service
        .update(id, request.into())
        .await
        .map_err(rejection_flag)?;

    if updated.changed {
        state
            .event_bus
            .publish(Event::ReservationUpdated(ReservationChangedEvent::from(
                &updated.reservation,
            )));
    }
    Ok(Json(ApiResponse::success(true)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "`data` is true when a reservation was deleted", body = ApiResponse<bool>)
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<i32>,
) -> Json<ApiResponse<bool>> {
    let deleted = state.service.cancel(id).await;
    if deleted {
        state
            .event_bus
            .publish(Event::ReservationCancelled(ReservationCancelledEvent {
                reservation_id: id,
            }));
    }
    Json(ApiResponse::success(deleted))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}/document",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Confirmation document", body = String, content_type = "text/plain"),
        (status = 404, description = "Reservation, client or room not found"),
        (status = 500, description = "Document could not be rendered")
    )
)]
pub async fn get_reservation_document(
    State(state): State<ReservationAppState>,
    Path(id): Path<i32>,
) -> Response {
    match state.service.fetch_document(id).await {
        Ok(doc) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, doc.content_type)],
            doc.bytes,
        )
            .into_response(),
        Err(rejection) => rejection_error::<()>(rejection).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::http::router::tests::{
        body_json, call, json_request, test_state, TestState,
    };
    use axum::body::{to_bytes, Body};
    use axum::http::Request;

    fn reference_body(room_id: i32, client_id: i32, arrival: &str, departure: &str) -> serde_json::Value {
        serde_json::json!({
            "client_id": client_id,
            "room_id": room_id,
            "arrival": arrival,
            "departure": departure,
        })
    }

    #[tokio::test]
    async fn reference_booking_and_overlap() {
        let TestState { router, room, client, .. } = test_state().await;

        let resp = call(
            &router,
            json_request("POST", "/api/v1/reservations", reference_body(room, client, "2025-06-01", "2025-06-05")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let json = body_json(resp).await;
        assert_eq!(json["data"], true);

        let resp = call(
            &router,
            json_request("POST", "/api/v1/reservations", reference_body(room, client, "2025-06-04", "2025-06-08")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["data"], false);

        let resp = call(
            &router,
            json_request("POST", "/api/v1/reservations", reference_body(room, client, "2025-06-05", "2025-06-06")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn disabled_room_is_gone() {
        let TestState { router, disabled_room, client, .. } = test_state().await;
        let resp = call(
            &router,
            json_request(
                "POST",
                "/api/v1/reservations",
                reference_body(disabled_room, client, "2025-06-01", "2025-06-02"),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::GONE);
    }

    #[tokio::test]
    async fn reversed_dates_are_bad_request() {
        let TestState { router, room, client, .. } = test_state().await;
        let resp = call(
            &router,
            json_request("POST", "/api/v1/reservations", reference_body(room, client, "2025-06-05", "2025-06-01")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn full_booking_returns_client_and_document() {
        let TestState { router, room, .. } = test_state().await;
        let body = serde_json::json!({
            "first_name": "Luis",
            "last_names": "Gómez",
            "email": "luis@example.com",
            "card_number": "4111 1111 1111 1111",
            "room_id": room,
            "arrival": "2025-07-01",
            "departure": "2025-07-03",
        });
        let resp = call(&router, json_request("POST", "/api/v1/reservations/full", body)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let json = body_json(resp).await;
        assert_eq!(json["data"]["client"]["email"], "luis@example.com");
        assert_eq!(json["data"]["reservation"]["nights"], 2);
        let encoded = json["data"]["document"].as_str().unwrap();
        let decoded = String::from_utf8(BASE64.decode(encoded).unwrap()).unwrap();
        assert!(decoded.contains("Luis Gómez"));
    }

    #[tokio::test]
    async fn full_booking_with_bad_email_is_422() {
        let TestState { router, room, .. } = test_state().await;
        let body = serde_json::json!({
            "first_name": "Luis",
            "email": "not-an-email",
            "card_number": "4111111111111111",
            "room_id": room,
            "arrival": "2025-07-01",
            "departure": "2025-07-03",
        });
        let resp = call(&router, json_request("POST", "/api/v1/reservations/full", body)).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn get_update_document_and_delete() {
        let TestState { router, room, client, .. } = test_state().await;
        call(
            &router,
            json_request("POST", "/api/v1/reservations", reference_body(room, client, "2025-06-01", "2025-06-05")),
        )
        .await;

        let list = body_json(call(&router, Request::get("/api/v1/reservations").body(Body::empty()).unwrap()).await).await;
        let id = list["data"][0]["id"].as_i64().unwrap();

        let resp = call(
            &router,
            json_request(
                "PUT",
                &format!("/api/v1/reservations/{}", id),
                serde_json::json!({ "departure": "2025-06-07" }),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let got = body_json(
            call(&router, Request::get(format!("/api/v1/reservations/{}", id)).body(Body::empty()).unwrap()).await,
        )
        .await;
        assert_eq!(got["data"]["departure"], "2025-06-07");
        assert_eq!(got["data"]["status"], "Modified");

        let resp = call(
            &router,
            Request::get(format!("/api/v1/reservations/{}/document", id)).body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Nights:     6"));

        let resp = call(
            &router,
            Request::delete(format!("/api/v1/reservations/{}", id)).body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(body_json(resp).await["data"], true);

        let resp = call(
            &router,
            Request::delete(format!("/api/v1/reservations/{}", id)).body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["data"], false);
    }

    #[tokio::test]
    async fn only_real_updates_are_announced() {
        let TestState { router, room, client, event_bus, .. } = test_state().await;
        call(
            &router,
            json_request("POST", "/api/v1/reservations", reference_body(room, client, "2025-07-01", "2025-07-04")),
        )
        .await;
        let list = body_json(call(&router, Request::get("/api/v1/reservations").body(Body::empty()).unwrap()).await).await;
        let id = list["data"][0]["id"].as_i64().unwrap() as i32;

        let mut events = event_bus.subscribe_to(id);
        let uri = format!("/api/v1/reservations/{}", id);

        let resp = call(
            &router,
            json_request("PUT", &uri, serde_json::json!({ "arrival": "2025-07-01", "departure": "2025-07-04" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["data"], true);
        assert!(events.try_recv().is_none());

        let resp = call(&router, json_request("PUT", &uri, serde_json::json!({ "departure": "2025-07-06" }))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let announced = events.try_recv().unwrap();
        assert_eq!(announced.event.event_type(), "reservation_updated");
        assert!(events.try_recv().is_none());
    }

    #[tokio::test]
    async fn missing_reservation_is_404() {
        let TestState { router, .. } = test_state().await;
        let resp = call(&router, Request::get("/api/v1/reservations/999").body(Body::empty()).unwrap()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = call(
            &router,
            Request::get("/api/v1/reservations/999/document").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
