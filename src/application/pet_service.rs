use crate::domain::pet::{CreatePet, Pet};
use crate::domain::repository::PetRepository;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct PetService<R: PetRepository> {
    repository: Arc<R>,
}

impl<R: PetRepository> PetService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Any `shelter_id` is accepted, including ids with no matching user.
    #[instrument(skip(self, req), fields(name = %req.name, shelter_id = req.shelter_id))]
    pub async fn add_pet(&self, req: CreatePet) -> Result<i64> {
        let id = self.repository.save_pet(req).await?;
        info!(pet_id = id, "Pet added");
        Ok(id)
    }

    pub async fn list_pets(&self) -> Result<Vec<Pet>> {
        self.repository.list_pets().await
    }
}
