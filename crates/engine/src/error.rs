//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`DuplicateName`] thrown when a unique field (username, client name,
//!   product code) is already taken, either at pre-check or at commit time.
//! - [`UserNotFound`] and [`CredentialMismatch`] thrown by sign-in.
//! - [`UnknownReference`] thrown when an input points at a row that does not
//!   exist (category id, product id).
//! - [`AbsentEntity`] thrown when a fetch-by-id must resolve but does not.
//! - [`InvalidInput`] thrown when an input struct fails validation.
//!
//!  [`DuplicateName`]: EngineError::DuplicateName
//!  [`UserNotFound`]: EngineError::UserNotFound
//!  [`CredentialMismatch`]: EngineError::CredentialMismatch
//!  [`UnknownReference`]: EngineError::UnknownReference
//!  [`AbsentEntity`]: EngineError::AbsentEntity
//!  [`InvalidInput`]: EngineError::InvalidInput
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" already present!")]
    DuplicateName(String),
    #[error("User {0} does not exist!")]
    UserNotFound(String),
    #[error("User / password do not match!")]
    CredentialMismatch,
    #[error("Unknown reference: {0}")]
    UnknownReference(String),
    #[error("\"{0}\" not found!")]
    AbsentEntity(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DuplicateName(a), Self::DuplicateName(b)) => a == b,
            (Self::UserNotFound(a), Self::UserNotFound(b)) => a == b,
            (Self::CredentialMismatch, Self::CredentialMismatch) => true,
            (Self::UnknownReference(a), Self::UnknownReference(b)) => a == b,
            (Self::AbsentEntity(a), Self::AbsentEntity(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::PasswordHash(a), Self::PasswordHash(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
