use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::losses::handlers;
use crate::features::losses::services::LossService;

/// Create routes for the losses feature
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<LossService>) -> Router {
    Router::new()
        .route(
            "/v1/pet/{pet_id}/loss",
            post(handlers::create_loss).get(handlers::list_pet_losses),
        )
        .route(
            "/v1/pet/{pet_id}/loss/{loss_id}",
            get(handlers::get_pet_loss).put(handlers::update_loss),
        )
        .route("/v1/loss", get(handlers::list_losses))
        .route("/v1/loss/{loss_id}", get(handlers::get_loss))
        .with_state(service)
}
