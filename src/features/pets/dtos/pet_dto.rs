use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::pets::models::Pet;

/// Request DTO for registering a pet
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetDto {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,

    #[validate(length(max = 1024, message = "Up to 1024 characters only"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Response DTO for a pet
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetResponseDto {
    pub id: Uuid,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Pet> for PetResponseDto {
    fn from(p: Pet) -> Self {
        Self {
            id: p.id,
            name: p.name,
            birth_date: p.birth_date,
            description: p.description,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
