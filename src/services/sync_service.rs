//! Domain service for accounts and reading progress.
//!
//! Validates inbound payloads, authenticates through the injected
//! [`Authenticator`](super::Authenticator) and drives the credential and
//! progress stores. Errors are transport-agnostic [`SyncError`] kinds; the
//! HTTP layer decides how they look on the wire.

use serde::Deserialize;
use thiserror::Error;

use super::auth_service::AuthError;
use crate::models::{ProgressRecord, UserId};

/// Errors specific to sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("User already exists")]
    UserExists,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<AuthError> for SyncError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotFound => Self::Unauthorized,
            AuthError::Database(msg) => Self::Database(msg),
        }
    }
}

impl From<anyhow::Error> for SyncError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Body of an account registration.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
}

impl NewAccount {
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.username.is_empty() {
            return Err(SyncError::BadRequest("username is empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(SyncError::BadRequest("password is empty".to_string()));
        }
        Ok(())
    }
}

/// Body of a progress push. Any client-sent `timestamp` or `user` is
/// dropped during decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressUpdate {
    pub document: String,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub progress: String,
    #[serde(default)]
    pub device: String,
    #[serde(default)]
    pub device_id: String,
}

impl ProgressUpdate {
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.document.is_empty() {
            return Err(SyncError::BadRequest("document is empty".to_string()));
        }
        if !self.percentage.is_finite() {
            return Err(SyncError::BadRequest(
                "percentage is not a finite number".to_string(),
            ));
        }
        Ok(())
    }

    /// Stamps owner and server time onto the update.
    #[must_use]
    pub fn into_record(self, owner: UserId, timestamp: i64) -> ProgressRecord {
        ProgressRecord {
            user_id: owner.0,
            document: self.document,
            percentage: self.percentage,
            progress: self.progress,
            device: self.device,
            device_id: self.device_id,
            timestamp,
        }
    }
}

/// Acknowledgement of an accepted progress push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressAck {
    pub document: String,
    pub timestamp: i64,
}

/// Domain service trait for account and progress sync.
#[async_trait::async_trait]
pub trait SyncService: Send + Sync {
    /// Registers an account and returns its username.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::UserExists`] if the name is taken.
    async fn create_account(&self, account: NewAccount) -> Result<String, SyncError>;

    /// Succeeds iff the pair identifies an account.
    async fn check_auth(&self, username: &str, key: &str) -> Result<(), SyncError>;

    /// Validates, authenticates, then replaces the stored record for
    /// (user, document) with a server timestamp.
    async fn push_progress(
        &self,
        username: &str,
        key: &str,
        update: ProgressUpdate,
    ) -> Result<ProgressAck, SyncError>;

    /// Returns the stored record, or the empty sentinel if there is none.
    async fn pull_progress(
        &self,
        username: &str,
        key: &str,
        document: &str,
    ) -> Result<ProgressRecord, SyncError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_update_ignores_client_timestamp_and_user() {
        let update: ProgressUpdate = serde_json::from_str(
            r#"{"document":"bookA","percentage":0.5,"progress":"p1","device":"d1","device_id":"dev1","timestamp":111,"user":42}"#,
        )
        .unwrap();

        let record = update.into_record(UserId(7), 1_700_000_000);
        assert_eq!(record.user_id, 7);
        assert_eq!(record.timestamp, 1_700_000_000);
        assert_eq!(record.document, "bookA");
        assert!((record.percentage - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_update_defaults_optional_fields() {
        let update: ProgressUpdate = serde_json::from_str(r#"{"document":"bookA"}"#).unwrap();
        assert!(update.validate().is_ok());
        assert_eq!(update.progress, "");
        assert_eq!(update.device_id, "");
    }

    #[test]
    fn test_progress_update_shape_errors() {
        assert!(serde_json::from_str::<ProgressUpdate>(r#"{"percentage":0.5}"#).is_err());
        assert!(
            serde_json::from_str::<ProgressUpdate>(r#"{"document":"a","percentage":"half"}"#)
                .is_err()
        );
        assert!(serde_json::from_str::<ProgressUpdate>(r#"{"document":7}"#).is_err());

        let empty: ProgressUpdate = serde_json::from_str(r#"{"document":""}"#).unwrap();
        assert!(matches!(empty.validate(), Err(SyncError::BadRequest(_))));
    }

    #[test]
    fn test_new_account_validation() {
        let ok = NewAccount {
            username: "alice".to_string(),
            password: "secret".to_string(),
        };
        assert!(ok.validate().is_ok());

        let no_name = NewAccount {
            username: String::new(),
            password: "secret".to_string(),
        };
        assert!(matches!(no_name.validate(), Err(SyncError::BadRequest(_))));

        let no_password = NewAccount {
            username: "alice".to_string(),
            password: String::new(),
        };
        assert!(matches!(no_password.validate(), Err(SyncError::BadRequest(_))));
    }

    #[test]
    fn test_auth_error_mapping() {
        assert!(matches!(
            SyncError::from(AuthError::NotFound),
            SyncError::Unauthorized
        ));
        assert!(matches!(
            SyncError::from(AuthError::Database("boom".to_string())),
            SyncError::Database(_)
        ));
    }
}
