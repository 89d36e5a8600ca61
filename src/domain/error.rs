use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Email already registered")]
    EmailTaken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Internal error: {0}")]
    Internal(String),
}
