use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::core::error::FieldError;
use crate::features::losses::{dtos as losses_dtos, handlers as losses_handlers, models as losses_models};
use crate::features::pets::{dtos as pets_dtos, handlers as pets_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Pets
        pets_handlers::create_pet,
        pets_handlers::list_pets,
        pets_handlers::get_pet,
        // Losses
        losses_handlers::create_loss,
        losses_handlers::list_pet_losses,
        losses_handlers::get_pet_loss,
        losses_handlers::update_loss,
        losses_handlers::list_losses,
        losses_handlers::get_loss,
    ),
    components(
        schemas(
            // Shared
            Meta,
            FieldError,
            // Pets
            pets_dtos::CreatePetDto,
            pets_dtos::PetResponseDto,
            ApiResponse<pets_dtos::PetResponseDto>,
            ApiResponse<Vec<pets_dtos::PetResponseDto>>,
            // Losses
            losses_models::LossState,
            losses_dtos::UpsertLossDto,
            losses_dtos::LossResponseDto,
            losses_dtos::PetSummaryDto,
            losses_dtos::LossFullResponseDto,
            ApiResponse<losses_dtos::LossResponseDto>,
            ApiResponse<Vec<losses_dtos::LossResponseDto>>,
            ApiResponse<losses_dtos::LossFullResponseDto>,
        )
    ),
    tags(
        (name = "pets", description = "Pet registration and lookup"),
        (name = "losses", description = "Lost-pet reports"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Petcare API",
        version = "0.1.0",
        description = "Pet management API with lost-pet reports",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
