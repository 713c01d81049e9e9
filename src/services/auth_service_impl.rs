//! `SeaORM` implementation of the `Authenticator` trait, backed by the
//! `users` table.

use async_trait::async_trait;
use tracing::debug;

use crate::db::Store;
use crate::db::repositories::user::verify_password;
use crate::models::UserId;
use crate::services::auth_service::{AuthError, Authenticator};

pub struct StoreAuthenticator {
    store: Store,
}

impl StoreAuthenticator {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Authenticator for StoreAuthenticator {
    async fn authenticate(&self, username: &str, key: &str) -> Result<UserId, AuthError> {
        if username.is_empty() {
            debug!("Rejected request without username");
            return Err(AuthError::NotFound);
        }

        let Some(user) = self.store.get_user(username).await? else {
            debug!(username, "Authentication failed: unknown user");
            return Err(AuthError::NotFound);
        };

        if !verify_password(key, &user.salt, &user.password) {
            debug!(username, "Authentication failed: digest mismatch");
            return Err(AuthError::NotFound);
        }

        Ok(user.user_id())
    }
}
