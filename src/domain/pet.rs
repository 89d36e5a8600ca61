use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub breed: String,
    pub age: i64,
    pub description: String,
    pub image_url: String,
    pub pet_type: String,
    pub shelter_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePet {
    pub name: String,
    pub breed: String,
    pub age: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    pub pet_type: String,
    // Not checked against the user table.
    pub shelter_id: i64,
}

/// Absent and `null` both become `""`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
