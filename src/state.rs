use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    Authenticator, Clock, SeaOrmSyncService, StoreAuthenticator, SyncService, SystemClock,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub sync_service: Arc<dyn SyncService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock)).await
    }

    /// Opens the configured database and wires the services around it,
    /// stamping progress with `clock`.
    pub async fn with_clock(config: Config, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let authenticator =
            Arc::new(StoreAuthenticator::new(store.clone())) as Arc<dyn Authenticator>;

        Ok(Self::from_parts(config, store, authenticator, clock))
    }

    #[must_use]
    pub fn from_parts(
        config: Config,
        store: Store,
        authenticator: Arc<dyn Authenticator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let sync_service = Arc::new(SeaOrmSyncService::new(
            store.clone(),
            authenticator,
            clock,
            &config,
        )) as Arc<dyn SyncService>;

        Self {
            config: Arc::new(config),
            store,
            sync_service,
        }
    }
}
