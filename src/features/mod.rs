pub mod auth;
pub mod losses;
pub mod pets;
