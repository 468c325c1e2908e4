use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::pets::models::{NewPet, Pet};

const PET_COLUMNS: &str =
    "id, user_id, name, birth_date, description, enabled, created_at, updated_at";

/// Persistence seam for pets
#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn insert(&self, new: NewPet) -> Result<Pet>;
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Pet>>;
    /// Ownership-scoped lookup
    async fn find_by_user_and_id(&self, user_id: &str, pet_id: Uuid) -> Result<Option<Pet>>;
    /// Unscoped lookup, used when joining pet data into report projections
    async fn find_by_id(&self, pet_id: Uuid) -> Result<Option<Pet>>;
}

pub struct PgPetRepository {
    pool: PgPool,
}

impl PgPetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetRepository for PgPetRepository {
    async fn insert(&self, new: NewPet) -> Result<Pet> {
        let sql = format!(
            "INSERT INTO pets (user_id, name, birth_date, description) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {PET_COLUMNS}"
        );

        sqlx::query_as::<_, Pet>(&sql)
            .bind(new.user_id)
            .bind(new.name)
            .bind(new.birth_date)
            .bind(new.description)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert pet: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Pet>> {
        let sql = format!("SELECT {PET_COLUMNS} FROM pets WHERE user_id = $1");

        sqlx::query_as::<_, Pet>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list pets by user: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_user_and_id(&self, user_id: &str, pet_id: Uuid) -> Result<Option<Pet>> {
        let sql = format!("SELECT {PET_COLUMNS} FROM pets WHERE id = $1 AND user_id = $2");

        sqlx::query_as::<_, Pet>(&sql)
            .bind(pet_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get pet by user and id: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, pet_id: Uuid) -> Result<Option<Pet>> {
        let sql = format!("SELECT {PET_COLUMNS} FROM pets WHERE id = $1");

        sqlx::query_as::<_, Pet>(&sql)
            .bind(pet_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get pet by id: {:?}", e);
                AppError::Database(e)
            })
    }
}
