use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a pet
#[derive(Debug, Clone, FromRow)]
pub struct Pet {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPet {
    pub user_id: String,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub description: Option<String>,
}
