use crate::domain::user::{CreateUser, LoginRequest};
use crate::presentation::handlers::{ApiError, AppState, MessageResponse};
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::{info, instrument};

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub role: String,
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn register(
    state: web::Data<AppState>,
    req: web::Json<CreateUser>,
) -> Result<HttpResponse, ApiError> {
    info!(role = %req.role, "Registration request received");

    state
        .auth_service
        .register_user(req.into_inner())
        .await
        .map_err(|e| ApiError::from_service(e, "Registration failed due to server error."))?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("User registered successfully!")))
}

/// No session or token is issued; the caller routes on `role`.
#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    let user = state
        .auth_service
        .login(req.into_inner())
        .await
        .map_err(|e| ApiError::from_service(e, "Login failed due to server error."))?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful!".to_string(),
        role: user.role,
    }))
}
