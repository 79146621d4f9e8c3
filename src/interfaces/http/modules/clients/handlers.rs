//! Client HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::application::ReservationService;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{
    internal_error, not_found, rejection_error, ApiError, ApiResponse, ValidatedJson,
};
use crate::interfaces::http::modules::reservations::ReservationDto;

use super::dto::*;

#[derive(Clone)]
pub struct ClientAppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub service: Arc<ReservationService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/clients",
    tag = "Clients",
    responses((status = 200, description = "All clients", body = ApiResponse<Vec<ClientDto>>))
)]
pub async fn list_clients(
    State(state): State<ClientAppState>,
) -> Result<Json<ApiResponse<Vec<ClientDto>>>, ApiError<Vec<ClientDto>>> {
    let clients = state.repos.clients().find_all().await.map_err(internal_error)?;
    Ok(Json(ApiResponse::success(
        clients.into_iter().map(ClientDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/clients",
    tag = "Clients",
    request_body = CreateClientRequest,
    responses(
        (status = 201, description = "Client registered", body = ApiResponse<ClientDto>),
        (status = 422, description = "Invalid body")
    )
)]
pub async fn create_client(
    State(state): State<ClientAppState>,
    ValidatedJson(request): ValidatedJson<CreateClientRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ClientDto>>), ApiError<ClientDto>> {
    let client = state
        .repos
        .clients()
        .save(request.into())
        .await
        .map_err(internal_error)?;
    info!(client_id = client.id, "Client registered");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(client.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client", body = ApiResponse<ClientDto>),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client(
    State(state): State<ClientAppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ClientDto>>, ApiError<ClientDto>> {
    match state.repos.clients().find_by_id(id).await.map_err(internal_error)? {
        Some(client) => Ok(Json(ApiResponse::success(client.into()))),
        None => Err(not_found(format!("Client {} not found", id))),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/{id}/reservations",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Reservations owned by the client", body = ApiResponse<Vec<ReservationDto>>),
        (status = 404, description = "Client not found")
    )
)]
pub async fn list_client_reservations(
    State(state): State<ClientAppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<ReservationDto>>>, ApiError<Vec<ReservationDto>>> {
    let reservations = state
        .service
        .list_for_client(id)
        .await
        .map_err(rejection_error)?;
    Ok(Json(ApiResponse::success(
        reservations.into_iter().map(ReservationDto::from).collect(),
    )))
}
