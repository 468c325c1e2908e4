use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::losses::models::{Loss, LossState, NewLoss};

/// Partial unique index backing the one-open-report-per-pet invariant;
/// a violation means a concurrent create won the race.
const OPEN_REPORT_CONSTRAINT: &str = "losses_one_open_report_per_pet";

const LOSS_COLUMNS: &str =
    "id, pet_id, description, date, picture, phone, state, enabled, created_at, updated_at";

/// Persistence seam for loss reports, injected into the service so tests can
/// swap in an in-memory double.
#[async_trait]
pub trait LossRepository: Send + Sync {
    async fn insert(&self, new: NewLoss) -> Result<Loss>;
    async fn find_by_pet(&self, pet_id: Uuid) -> Result<Vec<Loss>>;
    async fn find_by_pet_and_id(&self, pet_id: Uuid, loss_id: Uuid) -> Result<Option<Loss>>;
    async fn find_all(&self) -> Result<Vec<Loss>>;
    async fn find_by_id(&self, loss_id: Uuid) -> Result<Option<Loss>>;
    async fn find_open_by_pet(&self, pet_id: Uuid) -> Result<Option<Loss>>;
    /// Persist the mutable fields of an already-loaded report and refresh
    /// `updated_at`.
    async fn update(&self, loss: &Loss) -> Result<Loss>;
}

pub struct PgLossRepository {
    pool: PgPool,
}

impl PgLossRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LossRepository for PgLossRepository {
    async fn insert(&self, new: NewLoss) -> Result<Loss> {
        let sql = format!(
            "INSERT INTO losses (pet_id, description, date, picture, phone, state) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {LOSS_COLUMNS}"
        );

        sqlx::query_as::<_, Loss>(&sql)
            .bind(new.pet_id)
            .bind(new.description)
            .bind(new.date)
            .bind(new.picture)
            .bind(new.phone)
            .bind(new.state)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db)
                    if db.constraint() == Some(OPEN_REPORT_CONSTRAINT) =>
                {
                    AppError::validation("pet", "Pet already has an open loss report")
                }
                _ => {
                    tracing::error!("Failed to insert loss report: {:?}", e);
                    AppError::Database(e)
                }
            })
    }

    async fn find_by_pet(&self, pet_id: Uuid) -> Result<Vec<Loss>> {
        let sql = format!("SELECT {LOSS_COLUMNS} FROM losses WHERE pet_id = $1");

        sqlx::query_as::<_, Loss>(&sql)
            .bind(pet_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list loss reports by pet: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_pet_and_id(&self, pet_id: Uuid, loss_id: Uuid) -> Result<Option<Loss>> {
        let sql = format!("SELECT {LOSS_COLUMNS} FROM losses WHERE id = $1 AND pet_id = $2");

        sqlx::query_as::<_, Loss>(&sql)
            .bind(loss_id)
            .bind(pet_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get loss report by pet and id: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_all(&self) -> Result<Vec<Loss>> {
        let sql = format!("SELECT {LOSS_COLUMNS} FROM losses");

        sqlx::query_as::<_, Loss>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list loss reports: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, loss_id: Uuid) -> Result<Option<Loss>> {
        let sql = format!("SELECT {LOSS_COLUMNS} FROM losses WHERE id = $1");

        sqlx::query_as::<_, Loss>(&sql)
            .bind(loss_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get loss report by id: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_open_by_pet(&self, pet_id: Uuid) -> Result<Option<Loss>> {
        let sql = format!("SELECT {LOSS_COLUMNS} FROM losses WHERE pet_id = $1 AND state = $2");

        sqlx::query_as::<_, Loss>(&sql)
            .bind(pet_id)
            .bind(LossState::Lost)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get open loss report for pet: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn update(&self, loss: &Loss) -> Result<Loss> {
        let sql = format!(
            "UPDATE losses \
             SET description = $3, date = $4, picture = $5, phone = $6, state = $7, \
                 updated_at = now() \
             WHERE id = $1 AND pet_id = $2 \
             RETURNING {LOSS_COLUMNS}"
        );

        sqlx::query_as::<_, Loss>(&sql)
            .bind(loss.id)
            .bind(loss.pet_id)
            .bind(&loss.description)
            .bind(loss.date)
            .bind(&loss.picture)
            .bind(&loss.phone)
            .bind(loss.state)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update loss report: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Loss report '{}' not found", loss.id)))
    }
}
