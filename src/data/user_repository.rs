use crate::data::database::Database;
use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{NewUser, User};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, instrument, trace, warn};

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            pool: database.pool().clone(),
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email, role = %user.role))]
    async fn save_user(&self, user: NewUser) -> Result<i64> {
        trace!("Opening transaction for user insert");
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"INSERT INTO "user" (name, email, password, role) VALUES (?, ?, ?, ?)"#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(result) => {
                tx.commit().await?;
                let id = result.last_insert_rowid();
                debug!(user_id = id, email = %user.email, "User saved");
                Ok(id)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tx.rollback().await?;
                warn!(email = %user.email, "Email already registered, transaction rolled back");
                Err(DomainError::EmailTaken.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self), fields(email = email))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, password, role FROM "user" WHERE email = ? LIMIT 1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match &user {
            Some(u) => debug!(user_id = u.id, email = %u.email, "User found"),
            None => trace!(email = email, "User not found"),
        }
        Ok(user)
    }
}
