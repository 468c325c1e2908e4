use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::pets::dtos::{CreatePetDto, PetResponseDto};
use crate::features::pets::services::PetService;
use crate::shared::types::ApiResponse;

/// Register a pet for the caller
#[utoipa::path(
    post,
    path = "/v1/pet",
    request_body = CreatePetDto,
    responses(
        (status = 200, description = "Pet created", body = ApiResponse<PetResponseDto>),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "pets"
)]
pub async fn create_pet(
    user: AuthenticatedUser,
    State(service): State<Arc<PetService>>,
    AppJson(dto): AppJson<CreatePetDto>,
) -> Result<Json<ApiResponse<PetResponseDto>>> {
    let pet = service.create(&user.sub, dto).await?;
    Ok(Json(ApiResponse::success(Some(pet), None, None)))
}

/// List the caller's pets
#[utoipa::path(
    get,
    path = "/v1/pet",
    responses(
        (status = 200, description = "The caller's pets", body = ApiResponse<Vec<PetResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "pets"
)]
pub async fn list_pets(
    user: AuthenticatedUser,
    State(service): State<Arc<PetService>>,
) -> Result<Json<ApiResponse<Vec<PetResponseDto>>>> {
    let pets = service.list(&user.sub).await?;
    Ok(Json(ApiResponse::success(Some(pets), None, None)))
}

/// Get one of the caller's pets
#[utoipa::path(
    get,
    path = "/v1/pet/{pet_id}",
    params(
        ("pet_id" = Uuid, Path, description = "Pet ID")
    ),
    responses(
        (status = 200, description = "Pet found", body = ApiResponse<PetResponseDto>),
        (status = 404, description = "Pet not found or owned by another user")
    ),
    security(("bearer_auth" = [])),
    tag = "pets"
)]
pub async fn get_pet(
    user: AuthenticatedUser,
    State(service): State<Arc<PetService>>,
    Path(pet_id): Path<Uuid>,
) -> Result<Json<ApiResponse<PetResponseDto>>> {
    let pet = service.get(&user.sub, pet_id).await?;
    Ok(Json(ApiResponse::success(Some(pet), None, None)))
}
