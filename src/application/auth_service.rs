use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{CreateUser, LoginRequest, NewUser, User};
use crate::infrastructure::security::{hash_password, verify_password};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repository: Arc<R>) -> Self {
        Self { user_repository }
    }

    /// Stores a new user and returns its id. The uniqueness of the email is
    /// left to the store, so concurrent registrations cannot both succeed.
    #[instrument(skip(self, req), fields(email = %req.email, role = %req.role))]
    pub async fn register_user(&self, req: CreateUser) -> Result<i64> {
        trace!("Starting user registration");

        let password_hash = hash_password(&req.password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        let user = NewUser {
            name: req.name,
            email: req.email,
            password_hash,
            role: req.role,
        };

        debug!(email = %user.email, "Saving user to repository");
        let id = self.user_repository.save_user(user).await?;

        info!(user_id = id, "User registered successfully");
        Ok(id)
    }

    /// Returns the matching user when the credentials check out. Unknown email
    /// and wrong password fail identically.
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginRequest) -> Result<User> {
        trace!("Starting login");

        let user = self
            .user_repository
            .find_user_by_email(&req.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %req.email, "User not found during login");
                DomainError::InvalidCredentials
            })?;

        let is_valid = verify_password(&req.password, &user.password).map_err(|e| {
            error!(user_id = user.id, error = %e, "Failed to verify password");
            DomainError::Internal(format!("Failed to verify password: {}", e))
        })?;

        if !is_valid {
            warn!(user_id = user.id, "Invalid password during login");
            return Err(DomainError::InvalidCredentials.into());
        }

        info!(user_id = user.id, role = %user.role, "Login successful");
        Ok(user)
    }
}
