//! Credential checks for incoming requests.
//!
//! The HTTP layer never looks at credentials itself; it hands the presented
//! username/key pair to an [`Authenticator`] (through the sync service) and
//! only learns whether the pair maps to an account.

use thiserror::Error;

use crate::models::UserId;

/// Errors specific to authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user or wrong key. The two cases are reported identically.
    #[error("Unknown user or incorrect key")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Maps a presented username/key pair to an account.
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AuthError::NotFound`] when the pair does not identify an
    /// account, whatever the reason.
    async fn authenticate(&self, username: &str, key: &str) -> Result<UserId, AuthError>;
}
