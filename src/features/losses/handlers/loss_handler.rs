use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::losses::dtos::{LossFullResponseDto, LossResponseDto, UpsertLossDto};
use crate::features::losses::services::LossService;
use crate::shared::types::{ApiResponse, Meta};

/// Open a loss report for one of the caller's pets
#[utoipa::path(
    post,
    path = "/v1/pet/{pet_id}/loss",
    params(
        ("pet_id" = Uuid, Path, description = "Pet ID")
    ),
    request_body = UpsertLossDto,
    responses(
        (status = 200, description = "Loss report created", body = ApiResponse<LossResponseDto>),
        (status = 400, description = "Validation error (unknown pet, open report exists, bad payload)")
    ),
    security(("bearer_auth" = [])),
    tag = "losses"
)]
pub async fn create_loss(
    user: AuthenticatedUser,
    State(service): State<Arc<LossService>>,
    Path(pet_id): Path<Uuid>,
    AppJson(dto): AppJson<UpsertLossDto>,
) -> Result<Json<ApiResponse<LossResponseDto>>> {
    let loss = service.create(&user.sub, pet_id, dto).await?;
    Ok(Json(ApiResponse::success(Some(loss), None, None)))
}

/// List all loss reports for a pet
#[utoipa::path(
    get,
    path = "/v1/pet/{pet_id}/loss",
    params(
        ("pet_id" = Uuid, Path, description = "Pet ID")
    ),
    responses(
        (status = 200, description = "Loss reports for the pet", body = ApiResponse<Vec<LossResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "losses"
)]
pub async fn list_pet_losses(
    _user: AuthenticatedUser,
    State(service): State<Arc<LossService>>,
    Path(pet_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<LossResponseDto>>>> {
    let losses = service.find_by_pet(pet_id).await?;
    Ok(Json(ApiResponse::success(Some(losses), None, None)))
}

/// Get one loss report of a pet, with the pet summary embedded
#[utoipa::path(
    get,
    path = "/v1/pet/{pet_id}/loss/{loss_id}",
    params(
        ("pet_id" = Uuid, Path, description = "Pet ID"),
        ("loss_id" = Uuid, Path, description = "Loss report ID")
    ),
    responses(
        (status = 200, description = "Loss report found", body = ApiResponse<LossFullResponseDto>),
        (status = 404, description = "Loss report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "losses"
)]
pub async fn get_pet_loss(
    _user: AuthenticatedUser,
    State(service): State<Arc<LossService>>,
    Path((pet_id, loss_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<LossFullResponseDto>>> {
    let loss = service.find_by_pet_and_id(pet_id, loss_id).await?;
    Ok(Json(ApiResponse::success(Some(loss), None, None)))
}

/// Update a loss report (partial update; a FIND report is immutable)
#[utoipa::path(
    put,
    path = "/v1/pet/{pet_id}/loss/{loss_id}",
    params(
        ("pet_id" = Uuid, Path, description = "Pet ID"),
        ("loss_id" = Uuid, Path, description = "Loss report ID")
    ),
    request_body = UpsertLossDto,
    responses(
        (status = 200, description = "Loss report updated", body = ApiResponse<LossResponseDto>),
        (status = 404, description = "Loss report not found"),
        (status = 409, description = "Report already resolved as found")
    ),
    security(("bearer_auth" = [])),
    tag = "losses"
)]
pub async fn update_loss(
    user: AuthenticatedUser,
    State(service): State<Arc<LossService>>,
    Path((pet_id, loss_id)): Path<(Uuid, Uuid)>,
    AppJson(dto): AppJson<UpsertLossDto>,
) -> Result<Json<ApiResponse<LossResponseDto>>> {
    let loss = service.update(&user.sub, pet_id, loss_id, dto).await?;
    Ok(Json(ApiResponse::success(Some(loss), None, None)))
}

/// List every loss report, unscoped by pet or user
#[utoipa::path(
    get,
    path = "/v1/loss",
    responses(
        (status = 200, description = "All loss reports", body = ApiResponse<Vec<LossResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "losses"
)]
pub async fn list_losses(
    _user: AuthenticatedUser,
    State(service): State<Arc<LossService>>,
) -> Result<Json<ApiResponse<Vec<LossResponseDto>>>> {
    let losses = service.find_all().await?;
    let total = losses.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(losses),
        None,
        Some(Meta { total }),
    )))
}

/// Get a loss report by id alone, with the pet summary embedded
#[utoipa::path(
    get,
    path = "/v1/loss/{loss_id}",
    params(
        ("loss_id" = Uuid, Path, description = "Loss report ID")
    ),
    responses(
        (status = 200, description = "Loss report found", body = ApiResponse<LossFullResponseDto>),
        (status = 404, description = "Loss report or its pet not found")
    ),
    security(("bearer_auth" = [])),
    tag = "losses"
)]
pub async fn get_loss(
    _user: AuthenticatedUser,
    State(service): State<Arc<LossService>>,
    Path(loss_id): Path<Uuid>,
) -> Result<Json<ApiResponse<LossFullResponseDto>>> {
    let loss = service.find_by_id(loss_id).await?;
    Ok(Json(ApiResponse::success(Some(loss), None, None)))
}
