mod pet;

pub use pet::{NewPet, Pet};
