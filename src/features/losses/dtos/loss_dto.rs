use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::losses::models::{Loss, LossState};
use crate::features::pets::models::Pet;

/// Request body for creating or updating a loss report. Absent fields are
/// left untouched (create: schema defaults, update: previous values).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpsertLossDto {
    #[validate(length(max = 1024, message = "Up to 1024 characters only"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,

    /// Free-form contact string, stored as given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<LossState>,
}

/// Basic projection: the report's own fields, no embedded pet
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LossResponseDto {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub picture: Option<String>,
    pub phone: Option<String>,
    pub state: LossState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Loss> for LossResponseDto {
    fn from(l: Loss) -> Self {
        Self {
            id: l.id,
            pet_id: l.pet_id,
            description: l.description,
            date: l.date,
            picture: l.picture,
            phone: l.phone,
            state: l.state,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

/// Summary of the pet a report belongs to, embedded in the full projection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetSummaryDto {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// Full projection: report fields plus the owning pet's summary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LossFullResponseDto {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub picture: Option<String>,
    pub phone: Option<String>,
    pub state: LossState,
    pub pet: PetSummaryDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LossFullResponseDto {
    pub fn from_parts(loss: Loss, pet: Pet) -> Self {
        Self {
            id: loss.id,
            pet_id: loss.pet_id,
            description: loss.description,
            date: loss.date,
            picture: loss.picture,
            phone: loss.phone,
            state: loss.state,
            pet: PetSummaryDto {
                name: pet.name,
                birth_date: pet.birth_date,
                description: pet.description,
            },
            created_at: loss.created_at,
            updated_at: loss.updated_at,
        }
    }
}
