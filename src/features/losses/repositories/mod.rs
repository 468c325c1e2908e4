mod loss_repository;

pub use loss_repository::{LossRepository, PgLossRepository};
