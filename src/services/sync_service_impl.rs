//! `SeaORM` implementation of the [`SyncService`] trait.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Config;
use crate::db::{CreateUser, Store};
use crate::models::ProgressRecord;
use crate::services::auth_service::Authenticator;
use crate::services::clock::Clock;
use crate::services::sync_service::{
    NewAccount, ProgressAck, ProgressUpdate, SyncError, SyncService,
};

pub struct SeaOrmSyncService {
    store: Store,
    authenticator: Arc<dyn Authenticator>,
    clock: Arc<dyn Clock>,
    salt_length: usize,
    record_history: bool,
}

impl SeaOrmSyncService {
    #[must_use]
    pub fn new(
        store: Store,
        authenticator: Arc<dyn Authenticator>,
        clock: Arc<dyn Clock>,
        config: &Config,
    ) -> Self {
        Self {
            store,
            authenticator,
            clock,
            salt_length: config.security.salt_length,
            record_history: config.sync.record_history,
        }
    }
}

#[async_trait::async_trait]
impl SyncService for SeaOrmSyncService {
    async fn create_account(&self, account: NewAccount) -> Result<String, SyncError> {
        account.validate()?;

        match self
            .store
            .create_user(&account.username, &account.password, self.salt_length)
            .await?
        {
            CreateUser::Created => {
                info!(username = %account.username, "Account created");
                Ok(account.username)
            }
            CreateUser::AlreadyExists => {
                debug!(username = %account.username, "Account name already taken");
                Err(SyncError::UserExists)
            }
        }
    }

    async fn check_auth(&self, username: &str, key: &str) -> Result<(), SyncError> {
        self.authenticator.authenticate(username, key).await?;
        Ok(())
    }

    async fn push_progress(
        &self,
        username: &str,
        key: &str,
        update: ProgressUpdate,
    ) -> Result<ProgressAck, SyncError> {
        update.validate()?;
        let owner = self.authenticator.authenticate(username, key).await?;

        let timestamp = self.clock.now_unix();
        let record = update.into_record(owner, timestamp);

        self.store
            .upsert_progress(&record, self.record_history)
            .await?;

        debug!(
            user_id = %owner,
            document = %record.document,
            device = %record.device,
            timestamp,
            "Progress stored"
        );

        Ok(ProgressAck {
            document: record.document,
            timestamp,
        })
    }

    async fn pull_progress(
        &self,
        username: &str,
        key: &str,
        document: &str,
    ) -> Result<ProgressRecord, SyncError> {
        let owner = self.authenticator.authenticate(username, key).await?;
        Ok(self.store.get_progress(owner, document).await?)
    }
}
