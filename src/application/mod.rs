pub mod auth_service;
pub mod pet_service;
