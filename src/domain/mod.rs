pub mod error;
pub mod pet;
pub mod repository;
pub mod user;
