//! Room HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::application::ReservationService;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{
    internal_error, not_found, rejection_error, ApiError, ApiResponse, ValidatedJson,
};

use super::dto::*;

#[derive(Clone)]
pub struct RoomAppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub service: Arc<ReservationService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    responses((status = 200, description = "All rooms", body = ApiResponse<Vec<RoomDto>>))
)]
pub async fn list_rooms(
    State(state): State<RoomAppState>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, ApiError<Vec<RoomDto>>> {
    let rooms = state.repos.rooms().find_all().await.map_err(internal_error)?;
    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(RoomDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    tag = "Rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = ApiResponse<RoomDto>),
        (status = 422, description = "Invalid body")
    )
)]
pub async fn create_room(
    State(state): State<RoomAppState>,
    ValidatedJson(request): ValidatedJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoomDto>>), ApiError<RoomDto>> {
    let room = state
        .repos
        .rooms()
        .save(request.into())
        .await
        .map_err(internal_error)?;
    info!(room_id = room.id, number = %room.number, "Room created");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(room.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room", body = ApiResponse<RoomDto>),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room(
    State(state): State<RoomAppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<RoomDto>>, ApiError<RoomDto>> {
    match state.repos.rooms().find_by_id(id).await.map_err(internal_error)? {
        Some(room) => Ok(Json(ApiResponse::success(room.into()))),
        None => Err(not_found(format!("Room {} not found", id))),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/rooms/{id}/enabled",
    tag = "Rooms",
    params(("id" = i32, Path, description = "Room ID")),
    request_body = SetRoomEnabledRequest,
    responses(
        (status = 200, description = "Room updated", body = ApiResponse<RoomDto>),
        (status = 404, description = "Room not found")
    )
)]
pub async fn set_room_enabled(
    State(state): State<RoomAppState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<SetRoomEnabledRequest>,
) -> Result<Json<ApiResponse<RoomDto>>, ApiError<RoomDto>> {
    let Some(mut room) = state.repos.rooms().find_by_id(id).await.map_err(internal_error)? else {
        return Err(not_found(format!("Room {} not found", id)));
    };

    if request.enabled {
        room.enable();
    } else {
        room.disable();
    }
    let room = state.repos.rooms().save(room).await.map_err(internal_error)?;
    info!(room_id = room.id, enabled = room.enabled, "Room availability switched");
    Ok(Json(ApiResponse::success(room.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/available",
    tag = "Rooms",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Enabled rooms free for the whole stay", body = ApiResponse<Vec<RoomDto>>),
        (status = 400, description = "Arrival is not before departure")
    )
)]
pub async fn available_rooms(
    State(state): State<RoomAppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, ApiError<Vec<RoomDto>>> {
    let rooms = state
        .service
        .available_rooms(query.arrival, query.departure, query.room_type.as_deref())
        .await
        .map_err(rejection_error)?;
    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(RoomDto::from).collect(),
    )))
}

#[cfg(test)]
mod tests {
    use crate::interfaces::http::router::tests::{body_json, call, json_request, test_state, TestState};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn create_and_fetch_room() {
        let TestState { router, .. } = test_state().await;
        let resp = call(
            &router,
            json_request(
                "POST",
                "/api/v1/rooms",
                serde_json::json!({ "number": "301", "room_type": "suite", "nightly_rate": 25000 }),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let id = body_json(resp).await["data"]["id"].as_i64().unwrap();

        let json = body_json(call(&router, get(&format!("/api/v1/rooms/{}", id))).await).await;
        assert_eq!(json["data"]["number"], "301");
        assert_eq!(json["data"]["enabled"], true);

        let resp = call(&router, get("/api/v1/rooms/9999")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn availability_excludes_booked_and_disabled_rooms() {
        let TestState { router, room, disabled_room, client, .. } = test_state().await;
        call(
            &router,
            json_request(
                "POST",
                "/api/v1/reservations",
                serde_json::json!({
                    "client_id": client, "room_id": room,
                    "arrival": "2025-06-01", "departure": "2025-06-05"
                }),
            ),
        )
        .await;

        let json = body_json(
            call(&router, get("/api/v1/rooms/available?arrival=2025-06-03&departure=2025-06-04")).await,
        )
        .await;
        let ids: Vec<i64> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert!(!ids.contains(&(room as i64)));
        assert!(!ids.contains(&(disabled_room as i64)));

        let json = body_json(
            call(&router, get("/api/v1/rooms/available?arrival=2025-06-05&departure=2025-06-06")).await,
        )
        .await;
        assert!(json["data"]
            .as_array()
            .unwrap()
            .iter()
            .any(|r| r["id"].as_i64() == Some(room as i64)));
    }

    #[tokio::test]
    async fn availability_rejects_reversed_stay() {
        let TestState { router, .. } = test_state().await;
        let resp = call(
            &router,
            get("/api/v1/rooms/available?arrival=2025-06-05&departure=2025-06-01"),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn re_enabling_room_allows_booking() {
        let TestState { router, disabled_room, client, .. } = test_state().await;
        let resp = call(
            &router,
            json_request(
                "PUT",
                &format!("/api/v1/rooms/{}/enabled", disabled_room),
                serde_json::json!({ "enabled": true }),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = call(
            &router,
            json_request(
                "POST",
                "/api/v1/reservations",
                serde_json::json!({
                    "client_id": client, "room_id": disabled_room,
                    "arrival": "2025-06-01", "departure": "2025-06-02"
                }),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
}
