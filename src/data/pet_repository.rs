use crate::data::database::Database;
use crate::domain::pet::{CreatePet, Pet};
use crate::domain::repository::PetRepository;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SqlitePetRepository {
    pool: SqlitePool,
}

impl SqlitePetRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            pool: database.pool().clone(),
        }
    }
}

#[async_trait]
impl PetRepository for SqlitePetRepository {
    #[instrument(skip(self, pet), fields(name = %pet.name, shelter_id = pet.shelter_id))]
    async fn save_pet(&self, pet: CreatePet) -> Result<i64> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO pet (name, breed, age, description, image_url, pet_type, shelter_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&pet.name)
        .bind(&pet.breed)
        .bind(pet.age)
        .bind(&pet.description)
        .bind(&pet.image_url)
        .bind(&pet.pet_type)
        .bind(pet.shelter_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        let id = result.last_insert_rowid();
        debug!(pet_id = id, "Pet saved");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn list_pets(&self) -> Result<Vec<Pet>> {
        // Rows written outside this service may carry NULLs in the optional columns.
        let pets = sqlx::query_as::<_, Pet>(
            r#"
            SELECT id, name, breed, age,
                   COALESCE(description, '') AS description,
                   COALESCE(image_url, '') AS image_url,
                   pet_type, shelter_id
            FROM pet
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = pets.len(), "Pets loaded");
        Ok(pets)
    }
}
