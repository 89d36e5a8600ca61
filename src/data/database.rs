//! SQLite connection pool and schema bootstrap.
//!
//! The pool is built once at start-up, handed to the repositories, and closed
//! when the server stops.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const CREATE_USER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS "user" (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(120) NOT NULL UNIQUE,
    password VARCHAR(200) NOT NULL,
    role VARCHAR(20) NOT NULL
)
"#;

const CREATE_PET_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS pet (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(100) NOT NULL,
    breed VARCHAR(100) NOT NULL,
    age INTEGER NOT NULL,
    description TEXT,
    image_url VARCHAR(300),
    pet_type VARCHAR(50) NOT NULL,
    shelter_id INTEGER NOT NULL REFERENCES "user" (id)
)
"#;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// e.g. `sqlite://petconnect.db` or `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://petconnect.db".to_string(),
            max_connections: 5,
            acquire_timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        }
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and creates both tables if they do not exist yet.
    #[instrument(skip(config), fields(url = %config.url))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        // pet.shelter_id is not checked against "user".
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(false);

        let mut pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds));

        // An in-memory database lives only as long as its connection.
        if config.is_in_memory() {
            debug!("In-memory database, pinning pool to one connection");
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            pool_options = pool_options.max_connections(config.max_connections);
        }

        info!(
            max_connections = config.max_connections,
            "Creating database connection pool"
        );
        let pool = pool_options.connect_with(options).await?;

        let database = Self { pool };
        database.create_schema().await?;
        info!("Database ready");
        Ok(database)
    }

    async fn create_schema(&self) -> Result<(), sqlx::Error> {
        debug!("Ensuring schema exists");
        sqlx::query(CREATE_USER_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_PET_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT 1").fetch_one(&self.pool).await?;
        if result.0 != 1 {
            warn!(value = result.0, "Health check returned unexpected value");
            return Err(sqlx::Error::Protocol(
                "Health check returned unexpected value".into(),
            ));
        }
        Ok(())
    }

    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }
}
