use crate::domain::pet::{CreatePet, Pet};
use crate::domain::user::{NewUser, User};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user and returns its id. A duplicate email fails with
    /// `DomainError::EmailTaken`.
    async fn save_user(&self, user: NewUser) -> Result<i64>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
}

#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn save_pet(&self, pet: CreatePet) -> Result<i64>;
    async fn list_pets(&self) -> Result<Vec<Pet>>;
}
