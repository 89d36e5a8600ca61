pub mod database;
pub mod pet_repository;
pub mod user_repository;
