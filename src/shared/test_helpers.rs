use std::sync::Mutex;

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, response::Response, Router};
use chrono::Utc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::losses::models::{Loss, LossState, NewLoss};
use crate::features::losses::repositories::LossRepository;
use crate::features::pets::models::{NewPet, Pet};
use crate::features::pets::repositories::PetRepository;

pub const TEST_USER: &str = "test-user";

/// Wraps a router with a middleware that injects an authenticated user,
/// standing in for the JWT gate.
pub fn with_user(router: Router, sub: &str) -> Router {
    let user = AuthenticatedUser {
        sub: sub.to_string(),
    };
    router.layer(axum::middleware::from_fn(
        move |mut req: Request, next: Next| {
            let user = user.clone();
            async move {
                req.extensions_mut().insert(user);
                let response: Response = next.run(req).await;
                response
            }
        },
    ))
}

/// In-memory stand-in for `PgLossRepository`. The insert path mirrors the
/// store's partial unique index: at most one LOST report per pet.
#[derive(Default)]
pub struct InMemoryLossRepository {
    rows: Mutex<Vec<Loss>>,
}

#[async_trait]
impl LossRepository for InMemoryLossRepository {
    async fn insert(&self, new: NewLoss) -> Result<Loss> {
        let mut rows = self.rows.lock().unwrap();

        if new.state == LossState::Lost
            && rows
                .iter()
                .any(|r| r.pet_id == new.pet_id && r.state == LossState::Lost)
        {
            return Err(AppError::validation(
                "pet",
                "Pet already has an open loss report",
            ));
        }

        let now = Utc::now();
        let loss = Loss {
            id: Uuid::new_v4(),
            pet_id: new.pet_id,
            description: new.description,
            date: new.date,
            picture: new.picture,
            phone: new.phone,
            state: new.state,
            enabled: true,
            created_at: now,
            updated_at: now,
        };
        rows.push(loss.clone());
        Ok(loss)
    }

    async fn find_by_pet(&self, pet_id: Uuid) -> Result<Vec<Loss>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|r| r.pet_id == pet_id).cloned().collect())
    }

    async fn find_by_pet_and_id(&self, pet_id: Uuid, loss_id: Uuid) -> Result<Option<Loss>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|r| r.id == loss_id && r.pet_id == pet_id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Loss>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.clone())
    }

    async fn find_by_id(&self, loss_id: Uuid) -> Result<Option<Loss>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.id == loss_id).cloned())
    }

    async fn find_open_by_pet(&self, pet_id: Uuid) -> Result<Option<Loss>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|r| r.pet_id == pet_id && r.state == LossState::Lost)
            .cloned())
    }

    async fn update(&self, loss: &Loss) -> Result<Loss> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == loss.id && r.pet_id == loss.pet_id)
            .ok_or_else(|| AppError::NotFound(format!("Loss report '{}' not found", loss.id)))?;

        row.description = loss.description.clone();
        row.date = loss.date;
        row.picture = loss.picture.clone();
        row.phone = loss.phone.clone();
        row.state = loss.state;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }
}

/// In-memory stand-in for `PgPetRepository`
#[derive(Default)]
pub struct InMemoryPetRepository {
    rows: Mutex<Vec<Pet>>,
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {
    async fn insert(&self, new: NewPet) -> Result<Pet> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let pet = Pet {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            name: new.name,
            birth_date: new.birth_date,
            description: new.description,
            enabled: true,
            created_at: now,
            updated_at: now,
        };
        rows.push(pet.clone());
        Ok(pet)
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Pet>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_user_and_id(&self, user_id: &str, pet_id: Uuid) -> Result<Option<Pet>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|r| r.id == pet_id && r.user_id == user_id)
            .cloned())
    }

    async fn find_by_id(&self, pet_id: Uuid) -> Result<Option<Pet>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.id == pet_id).cloned())
    }
}
