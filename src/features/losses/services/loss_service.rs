use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::losses::dtos::{LossFullResponseDto, LossResponseDto, UpsertLossDto};
use crate::features::losses::models::{LossState, NewLoss};
use crate::features::losses::repositories::LossRepository;
use crate::features::pets::services::PetService;

/// Service owning the loss-report business rules: ownership checks, the
/// one-open-report-per-pet invariant and the LOST -> FIND state machine.
pub struct LossService {
    losses: Arc<dyn LossRepository>,
    pets: Arc<PetService>,
}

impl LossService {
    pub fn new(losses: Arc<dyn LossRepository>, pets: Arc<PetService>) -> Self {
        Self { losses, pets }
    }

    /// Open a loss report for one of the acting user's pets
    pub async fn create(
        &self,
        user_id: &str,
        pet_id: Uuid,
        dto: UpsertLossDto,
    ) -> Result<LossResponseDto> {
        self.check_ownership(user_id, pet_id).await?;

        // The store's partial unique index backs this check against
        // concurrent creates; this read exists to cite the conflicting id.
        if let Some(open) = self.losses.find_open_by_pet(pet_id).await? {
            return Err(AppError::validation(
                "pet",
                format!("Pet already has an open loss report with id {}", open.id),
            ));
        }

        dto.validate()?;

        let loss = self
            .losses
            .insert(NewLoss {
                pet_id,
                description: dto.description,
                date: dto.date,
                picture: dto.picture,
                phone: dto.phone,
                state: dto.state.unwrap_or(LossState::Lost),
            })
            .await?;

        tracing::info!("Loss report created: id={}, pet={}", loss.id, pet_id);

        Ok(loss.into())
    }

    /// All reports for a pet, unfiltered by state, in storage order.
    /// Readable by any logged-in caller.
    pub async fn find_by_pet(&self, pet_id: Uuid) -> Result<Vec<LossResponseDto>> {
        let losses = self.losses.find_by_pet(pet_id).await?;
        Ok(losses.into_iter().map(|l| l.into()).collect())
    }

    /// One report scoped by pet, with the pet summary embedded
    pub async fn find_by_pet_and_id(
        &self,
        pet_id: Uuid,
        loss_id: Uuid,
    ) -> Result<LossFullResponseDto> {
        let loss = self
            .losses
            .find_by_pet_and_id(pet_id, loss_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loss report '{}' not found", loss_id)))?;

        let pet = self.pets.find(pet_id).await?;

        Ok(LossFullResponseDto::from_parts(loss, pet))
    }

    /// Global list, unscoped by pet or user
    pub async fn find_all(&self) -> Result<Vec<LossResponseDto>> {
        let losses = self.losses.find_all().await?;
        Ok(losses.into_iter().map(|l| l.into()).collect())
    }

    /// Global lookup by report id; the owning pet is resolved from the stored
    /// pet_id, so a dangling reference surfaces as NotFound on the pet lookup.
    pub async fn find_by_id(&self, loss_id: Uuid) -> Result<LossFullResponseDto> {
        let loss = self
            .losses
            .find_by_id(loss_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loss report '{}' not found", loss_id)))?;

        let pet = self.pets.find(loss.pet_id).await?;

        Ok(LossFullResponseDto::from_parts(loss, pet))
    }

    /// Partial update: only fields present in the payload are overwritten.
    /// A report resolved as FIND is terminal and rejects any further update.
    pub async fn update(
        &self,
        user_id: &str,
        pet_id: Uuid,
        loss_id: Uuid,
        dto: UpsertLossDto,
    ) -> Result<LossResponseDto> {
        self.check_ownership(user_id, pet_id).await?;

        let mut loss = self
            .losses
            .find_by_pet_and_id(pet_id, loss_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loss report '{}' not found", loss_id)))?;

        if loss.state == LossState::Find {
            return Err(AppError::Conflict(
                "Loss report is already resolved as found".to_string(),
            ));
        }

        dto.validate()?;

        if let Some(description) = dto.description {
            loss.description = Some(description);
        }
        if let Some(date) = dto.date {
            loss.date = Some(date);
        }
        if let Some(picture) = dto.picture {
            loss.picture = Some(picture);
        }
        if let Some(phone) = dto.phone {
            loss.phone = Some(phone);
        }
        if let Some(state) = dto.state {
            loss.state = state;
        }

        let updated = self.losses.update(&loss).await?;

        tracing::info!(
            "Loss report updated: id={}, pet={}, state={}",
            updated.id,
            pet_id,
            updated.state
        );

        Ok(updated.into())
    }

    /// The pet-ownership precondition shared by create and update. A pet the
    /// collaborator cannot resolve for this user is reported as a field-level
    /// validation failure, not a 404.
    async fn check_ownership(&self, user_id: &str, pet_id: Uuid) -> Result<()> {
        match self.pets.find_owned(user_id, pet_id).await {
            Ok(_) => Ok(()),
            Err(AppError::NotFound(_)) => Err(AppError::validation(
                "pet",
                "Pet not found or not owned by user",
            )),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::losses::models::Loss;
    use crate::shared::test_helpers::{InMemoryLossRepository, InMemoryPetRepository};
    use chrono::NaiveDate;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    struct Fixture {
        service: LossService,
        losses: Arc<InMemoryLossRepository>,
        pets: Arc<InMemoryPetRepository>,
    }

    fn fixture() -> Fixture {
        let losses = Arc::new(InMemoryLossRepository::default());
        let pets = Arc::new(InMemoryPetRepository::default());
        let pet_service = Arc::new(PetService::new(pets.clone()));
        let service = LossService::new(losses.clone(), pet_service);
        Fixture {
            service,
            losses,
            pets,
        }
    }

    async fn seed_pet(fx: &Fixture, user_id: &str, name: &str) -> Uuid {
        use crate::features::pets::models::NewPet;
        use crate::features::pets::repositories::PetRepository;

        let pet = fx
            .pets
            .insert(NewPet {
                user_id: user_id.to_string(),
                name: name.to_string(),
                birth_date: None,
                description: None,
            })
            .await
            .unwrap();
        pet.id
    }

    async fn open_count(fx: &Fixture, pet_id: Uuid) -> usize {
        use crate::features::losses::repositories::LossRepository;

        fx.losses
            .find_by_pet(pet_id)
            .await
            .unwrap()
            .iter()
            .filter(|l: &&Loss| l.state == LossState::Lost)
            .count()
    }

    #[tokio::test]
    async fn test_create_then_read_back_matches_input() {
        let fx = fixture();
        let pet_id = seed_pet(&fx, "user-1", "Rex").await;

        let created = fx
            .service
            .create(
                "user-1",
                pet_id,
                UpsertLossDto {
                    description: Some("lost near park".to_string()),
                    date: NaiveDate::from_ymd_opt(2024, 1, 1),
                    phone: Some("1143215678".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(created.state, LossState::Lost);

        let fetched = fx
            .service
            .find_by_pet_and_id(pet_id, created.id)
            .await
            .unwrap();
        assert_eq!(fetched.pet_id, pet_id);
        assert_eq!(fetched.state, LossState::Lost);
        assert_eq!(fetched.description.as_deref(), Some("lost near park"));
        assert_eq!(fetched.date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(fetched.phone.as_deref(), Some("1143215678"));
        assert_eq!(fetched.pet.name, "Rex");
    }

    #[tokio::test]
    async fn test_create_accepts_free_form_phone() {
        let fx = fixture();
        let pet_id = seed_pet(&fx, "user-1", "Rex").await;

        // Contact phones are stored as given, whatever their shape
        for phone in ["12345", "+54 11 4321-5678", "ask for Maria, shop next door"] {
            let created = fx
                .service
                .create(
                    "user-1",
                    pet_id,
                    UpsertLossDto {
                        phone: Some(phone.to_string()),
                        state: Some(LossState::Find),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            assert_eq!(created.phone.as_deref(), Some(phone));
        }
    }

    #[tokio::test]
    async fn test_create_rejects_pet_not_owned_by_user() {
        let fx = fixture();
        let pet_id = seed_pet(&fx, "user-1", "Rex").await;

        let result = fx
            .service
            .create("user-2", pet_id, UpsertLossDto::default())
            .await;

        match result {
            Err(AppError::Validation(fields)) => {
                assert_eq!(fields[0].field, "pet");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_pet() {
        let fx = fixture();

        let result = fx
            .service
            .create("user-1", Uuid::new_v4(), UpsertLossDto::default())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_overlong_description() {
        let fx = fixture();
        let pet_id = seed_pet(&fx, "user-1", "Rex").await;

        let result = fx
            .service
            .create(
                "user-1",
                pet_id,
                UpsertLossDto {
                    description: Some("x".repeat(1025)),
                    ..Default::default()
                },
            )
            .await;

        match result {
            Err(AppError::Validation(fields)) => {
                assert_eq!(fields[0].field, "description");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(open_count(&fx, pet_id).await, 0);
    }

    #[tokio::test]
    async fn test_second_create_cites_conflicting_report_id() {
        let fx = fixture();
        let pet_id = seed_pet(&fx, "user-1", "Rex").await;

        let first = fx
            .service
            .create(
                "user-1",
                pet_id,
                UpsertLossDto {
                    description: Some("lost near park".to_string()),
                    date: NaiveDate::from_ymd_opt(2024, 1, 1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let second = fx
            .service
            .create(
                "user-1",
                pet_id,
                UpsertLossDto {
                    description: Some(Sentence(3..8).fake::<String>()),
                    ..Default::default()
                },
            )
            .await;

        match second {
            Err(AppError::Validation(fields)) => {
                assert_eq!(fields[0].field, "pet");
                assert!(fields[0].message.contains(&first.id.to_string()));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(open_count(&fx, pet_id).await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_leave_at_most_one_open_report() {
        let fx = fixture();
        let pet_id = seed_pet(&fx, "user-1", "Rex").await;

        // Both calls pass the application-level check against an empty store;
        // the store-level uniqueness gate must reject one of them.
        let (a, b) = tokio::join!(
            fx.service
                .create("user-1", pet_id, UpsertLossDto::default()),
            fx.service
                .create("user-1", pet_id, UpsertLossDto::default()),
        );

        assert_eq!(
            [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(),
            1,
            "exactly one concurrent create must win"
        );
        assert_eq!(open_count(&fx, pet_id).await, 1);
    }

    #[tokio::test]
    async fn test_create_with_explicit_find_state_leaves_pet_reportable() {
        let fx = fixture();
        let pet_id = seed_pet(&fx, "user-1", "Rex").await;

        let resolved = fx
            .service
            .create(
                "user-1",
                pet_id,
                UpsertLossDto {
                    state: Some(LossState::Find),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(resolved.state, LossState::Find);

        // No open report exists, so a fresh one can still be created
        let open = fx
            .service
            .create("user-1", pet_id, UpsertLossDto::default())
            .await
            .unwrap();
        assert_eq!(open.state, LossState::Lost);
    }

    #[tokio::test]
    async fn test_update_overwrites_only_present_fields() {
        let fx = fixture();
        let pet_id = seed_pet(&fx, "user-1", "Rex").await;

        let created = fx
            .service
            .create(
                "user-1",
                pet_id,
                UpsertLossDto {
                    description: Some("lost near park".to_string()),
                    phone: Some("1143215678".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = fx
            .service
            .update(
                "user-1",
                pet_id,
                created.id,
                UpsertLossDto {
                    description: Some("seen at the lake".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.description.as_deref(), Some("seen at the lake"));
        // Absent fields are untouched, not cleared
        assert_eq!(updated.phone.as_deref(), Some("1143215678"));
        assert_eq!(updated.state, LossState::Lost);
    }

    #[tokio::test]
    async fn test_update_with_empty_payload_only_refreshes_updated_at() {
        let fx = fixture();
        let pet_id = seed_pet(&fx, "user-1", "Rex").await;

        let created = fx
            .service
            .create(
                "user-1",
                pet_id,
                UpsertLossDto {
                    description: Some("lost near park".to_string()),
                    date: NaiveDate::from_ymd_opt(2024, 1, 1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let updated = fx
            .service
            .update("user-1", pet_id, created.id, UpsertLossDto::default())
            .await
            .unwrap();

        assert_eq!(updated.description, created.description);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.picture, created.picture);
        assert_eq!(updated.phone, created.phone);
        assert_eq!(updated.state, created.state);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_update_after_found_is_a_conflict() {
        let fx = fixture();
        let pet_id = seed_pet(&fx, "user-1", "Rex").await;

        let created = fx
            .service
            .create("user-1", pet_id, UpsertLossDto::default())
            .await
            .unwrap();

        // Resolving the report succeeds
        let resolved = fx
            .service
            .update(
                "user-1",
                pet_id,
                created.id,
                UpsertLossDto {
                    state: Some(LossState::Find),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(resolved.state, LossState::Find);

        // The state is terminal: no field may change afterwards
        let result = fx
            .service
            .update(
                "user-1",
                pet_id,
                created.id,
                UpsertLossDto {
                    description: Some("x".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_report() {
        let fx = fixture();
        let pet_id = seed_pet(&fx, "user-1", "Rex").await;

        let result = fx
            .service
            .update("user-1", pet_id, Uuid::new_v4(), UpsertLossDto::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_validates_description_length() {
        let fx = fixture();
        let pet_id = seed_pet(&fx, "user-1", "Rex").await;

        let created = fx
            .service
            .create("user-1", pet_id, UpsertLossDto::default())
            .await
            .unwrap();

        let result = fx
            .service
            .update(
                "user-1",
                pet_id,
                created.id,
                UpsertLossDto {
                    description: Some("x".repeat(1025)),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_find_by_pet_returns_all_states() {
        let fx = fixture();
        let pet_id = seed_pet(&fx, "user-1", "Rex").await;

        let first = fx
            .service
            .create("user-1", pet_id, UpsertLossDto::default())
            .await
            .unwrap();
        fx.service
            .update(
                "user-1",
                pet_id,
                first.id,
                UpsertLossDto {
                    state: Some(LossState::Find),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        fx.service
            .create("user-1", pet_id, UpsertLossDto::default())
            .await
            .unwrap();

        let reports = fx.service.find_by_pet(pet_id).await.unwrap();
        assert_eq!(reports.len(), 2);
    }

    #[tokio::test]
    async fn test_find_all_is_global() {
        let fx = fixture();
        let pet_a = seed_pet(&fx, "user-1", "Rex").await;
        let pet_b = seed_pet(&fx, "user-2", "Luna").await;

        fx.service
            .create("user-1", pet_a, UpsertLossDto::default())
            .await
            .unwrap();
        fx.service
            .create("user-2", pet_b, UpsertLossDto::default())
            .await
            .unwrap();

        let reports = fx.service.find_all().await.unwrap();
        assert_eq!(reports.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_id_unknown_is_not_found() {
        let fx = fixture();

        assert!(matches!(
            fx.service.find_by_id(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_by_id_with_dangling_pet_is_not_found() {
        let fx = fixture();

        // Report whose pet was never registered in this store: the pet join
        // must surface as NotFound rather than a panic or a data error.
        use crate::features::losses::repositories::LossRepository;
        let orphan = fx
            .losses
            .insert(NewLoss {
                pet_id: Uuid::new_v4(),
                description: None,
                date: None,
                picture: None,
                phone: None,
                state: LossState::Lost,
            })
            .await
            .unwrap();

        assert!(matches!(
            fx.service.find_by_id(orphan.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_by_id_embeds_pet_summary() {
        let fx = fixture();
        let pet_id = seed_pet(&fx, "user-1", "Rex").await;

        let created = fx
            .service
            .create("user-1", pet_id, UpsertLossDto::default())
            .await
            .unwrap();

        let full = fx.service.find_by_id(created.id).await.unwrap();
        assert_eq!(full.pet.name, "Rex");
        assert_eq!(full.pet_id, pet_id);
    }
}
