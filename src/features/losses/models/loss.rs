use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Loss report state matching the database enum.
///
/// The stored literal for a resolved report is `FIND` (legacy wire value);
/// prose and docs call it "found". `Lost` is the open state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "loss_state", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LossState {
    Lost,
    Find,
}

impl std::fmt::Display for LossState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LossState::Lost => write!(f, "LOST"),
            LossState::Find => write!(f, "FIND"),
        }
    }
}

/// Database model for a loss report
#[derive(Debug, Clone, FromRow)]
pub struct Loss {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub picture: Option<String>,
    pub phone: Option<String>,
    pub state: LossState,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields persisted when opening a new report. Optional fields left `None`
/// stay at their schema defaults rather than being written as nulls explicitly.
#[derive(Debug, Clone)]
pub struct NewLoss {
    pub pet_id: Uuid,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub picture: Option<String>,
    pub phone: Option<String>,
    pub state: LossState,
}
