mod pet_repository;

pub use pet_repository::{PetRepository, PgPetRepository};
