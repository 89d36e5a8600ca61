use crate::application::auth_service::AuthService;
use crate::application::pet_service::PetService;
use crate::data::database::Database;
use crate::data::pet_repository::SqlitePetRepository;
use crate::data::user_repository::SqliteUserRepository;
use crate::domain::error::DomainError;
use crate::domain::pet::CreatePet;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

pub const GREETING: &str = "Welcome to the PetConnect Backend!";

pub struct AppState {
    pub auth_service: AuthService<SqliteUserRepository>,
    pub pet_service: PetService<SqlitePetRepository>,
    pub database: Database,
}

impl AppState {
    pub fn new(database: Database) -> Self {
        let users = SqliteUserRepository::new(&database);
        let pets = SqlitePetRepository::new(&database);
        Self {
            auth_service: AuthService::new(Arc::new(users)),
            pet_service: PetService::new(Arc::new(pets)),
            database,
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request payload.")]
    Validation {
        field: Option<String>,
        reason: String,
    },
    #[error("Email already registered.")]
    EmailConflict,
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// `message` is what the caller sees, `cause` is only logged.
    #[error("{message}")]
    Internal {
        message: &'static str,
        cause: String,
    },
}

impl ApiError {
    /// Maps a service failure onto a response. Anything that is not a known
    /// domain error becomes a 500 carrying `fallback`.
    pub fn from_service(err: anyhow::Error, fallback: &'static str) -> Self {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::EmailTaken) => ApiError::EmailConflict,
            Some(DomainError::InvalidCredentials) => ApiError::InvalidCredentials,
            Some(DomainError::Internal(_)) | None => ApiError::Internal {
                message: fallback,
                cause: format!("{:#}", err),
            },
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::EmailConflict => StatusCode::CONFLICT,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut body = MessageResponse::new(self.to_string());

        match self {
            ApiError::Validation { field, reason } => {
                warn!(field = ?field, reason = %reason, status = %status, "Rejected request payload");
                body.details = Some(match field {
                    Some(field) => serde_json::json!({ "field": field, "reason": reason }),
                    None => serde_json::json!({ "reason": reason }),
                });
            }
            ApiError::EmailConflict => warn!(status = %status, "Email conflict"),
            ApiError::InvalidCredentials => warn!(status = %status, "Invalid credentials"),
            ApiError::Internal { message, cause } => {
                error!(error = %cause, status = %status, "{}", message)
            }
        }

        HttpResponse::build(status).json(body)
    }
}

/// Routes body decoding failures through `ApiError` so a missing or
/// mistyped field is answered with 400 and the field name when serde knows it.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let reason = match &err {
            JsonPayloadError::Deserialize(e) => e.to_string(),
            other => other.to_string(),
        };
        let field = missing_field(&reason);
        ApiError::Validation { field, reason }.into()
    })
}

fn missing_field(reason: &str) -> Option<String> {
    let rest = reason.strip_prefix("missing field `")?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

#[instrument]
pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(GREETING)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    timestamp: String,
}

#[instrument(skip(state))]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let timestamp = Utc::now().to_rfc3339();
    match state.database.ping().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse {
            status: "ok",
            database: "ok",
            timestamp,
        }),
        Err(e) => {
            error!(error = %e, "Database health check failed");
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "degraded",
                database: "unreachable",
                timestamp,
            })
        }
    }
}

#[instrument(skip(state, req), fields(name = %req.name, shelter_id = req.shelter_id, pet_id))]
pub async fn add_pet(
    state: web::Data<AppState>,
    req: web::Json<CreatePet>,
) -> Result<HttpResponse, ApiError> {
    info!(pet_type = %req.pet_type, "Adding pet");
    let id = state
        .pet_service
        .add_pet(req.into_inner())
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to add pet."))?;
    tracing::Span::current().record("pet_id", id);
    Ok(HttpResponse::Created().json(MessageResponse::new("Pet added successfully!")))
}

#[instrument(skip(state))]
pub async fn list_pets(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let pets = state
        .pet_service
        .list_pets()
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to load pets."))?;
    info!(count = pets.len(), "Listing pets");
    Ok(HttpResponse::Ok().json(pets))
}
