use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::pets::dtos::{CreatePetDto, PetResponseDto};
use crate::features::pets::models::{NewPet, Pet};
use crate::features::pets::repositories::PetRepository;

/// Service for pet operations. Doubles as the pet-lookup collaborator the
/// loss-report service consumes (`find_owned` / `find`).
pub struct PetService {
    pets: Arc<dyn PetRepository>,
}

impl PetService {
    pub fn new(pets: Arc<dyn PetRepository>) -> Self {
        Self { pets }
    }

    /// Register a pet for the acting user
    pub async fn create(&self, user_id: &str, dto: CreatePetDto) -> Result<PetResponseDto> {
        dto.validate()?;

        let pet = self
            .pets
            .insert(NewPet {
                user_id: user_id.to_string(),
                name: dto.name,
                birth_date: dto.birth_date,
                description: dto.description,
            })
            .await?;

        tracing::info!("Pet created: id={}, user={}", pet.id, user_id);

        Ok(pet.into())
    }

    /// List the acting user's pets
    pub async fn list(&self, user_id: &str) -> Result<Vec<PetResponseDto>> {
        let pets = self.pets.find_by_user(user_id).await?;
        Ok(pets.into_iter().map(|p| p.into()).collect())
    }

    /// Get one of the acting user's pets
    pub async fn get(&self, user_id: &str, pet_id: Uuid) -> Result<PetResponseDto> {
        let pet = self.find_owned(user_id, pet_id).await?;
        Ok(pet.into())
    }

    /// Ownership-scoped lookup: fails NotFound when the pet does not exist or
    /// belongs to another user.
    pub async fn find_owned(&self, user_id: &str, pet_id: Uuid) -> Result<Pet> {
        self.pets
            .find_by_user_and_id(user_id, pet_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Pet '{}' not found", pet_id)))
    }

    /// Unscoped lookup for joining pet data into report projections
    pub async fn find(&self, pet_id: Uuid) -> Result<Pet> {
        self.pets
            .find_by_id(pet_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Pet '{}' not found", pet_id)))
    }
}
