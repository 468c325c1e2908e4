use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::pets::handlers;
use crate::features::pets::services::PetService;

/// Create routes for the pets feature
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<PetService>) -> Router {
    Router::new()
        .route("/v1/pet", post(handlers::create_pet).get(handlers::list_pets))
        .route("/v1/pet/{pet_id}", get(handlers::get_pet))
        .with_state(service)
}
