use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::models::{ProgressRecord, User, UserId};

/// Lifetime given to the single `:memory:` connection. The database lives
/// only as long as that connection, so the pool must never recycle it.
const MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

pub mod migrator;
pub mod repositories;

pub use repositories::user::CreateUser;

/// Handle to the embedded SQLite database shared by the credential and
/// progress stores. Cheap to clone; all clones share one pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn open(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path = sqlite_file_path(db_url);
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            if !path.exists() {
                tokio::fs::File::create(&path)
                    .await
                    .with_context(|| format!("Failed to create {}", path.display()))?;
            }
        }

        // Every connection to `:memory:` opens its own private database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections.min(max_connections))
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);
        if in_memory {
            opt.idle_timeout(MEMORY_CONNECTION_LIFETIME)
                .max_lifetime(MEMORY_CONNECTION_LIFETIME);
        } else {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt)
            .await
            .with_context(|| format!("Failed to open database {db_url}"))?;

        if !in_memory {
            conn.execute_unprepared("PRAGMA journal_mode=WAL")
                .await
                .context("Failed to enable WAL journal")?;
        }

        migrator::Migrator::up(&conn, None)
            .await
            .context("Failed to apply database migrations")?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// Closes the pool. Other clones of this store become unusable.
    pub async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .context("Failed to close database")?;
        info!("Database closed");
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn progress_repo(&self) -> repositories::progress::ProgressRepository {
        repositories::progress::ProgressRepository::new(self.conn.clone())
    }

    pub async fn get_user(&self, name: &str) -> Result<Option<User>> {
        self.user_repo().get_by_name(name).await
    }

    pub async fn create_user(
        &self,
        name: &str,
        password: &str,
        salt_length: usize,
    ) -> Result<CreateUser> {
        self.user_repo().create(name, password, salt_length).await
    }

    pub async fn count_users_named(&self, name: &str) -> Result<u64> {
        self.user_repo().count_by_name(name).await
    }

    /// Returns the empty sentinel when nothing is stored for the pair.
    pub async fn get_progress(&self, user: UserId, document: &str) -> Result<ProgressRecord> {
        Ok(self
            .progress_repo()
            .get(user, document)
            .await?
            .unwrap_or_default())
    }

    pub async fn upsert_progress(&self, record: &ProgressRecord, record_history: bool) -> Result<()> {
        if record_history {
            self.progress_repo().upsert_with_history(record).await
        } else {
            self.progress_repo().upsert(record).await
        }
    }

    pub async fn progress_history(
        &self,
        user: UserId,
        document: &str,
    ) -> Result<Vec<ProgressRecord>> {
        self.progress_repo().history(user, document).await
    }
}

/// Filesystem path behind a `sqlite:` URL, without the query string.
fn sqlite_file_path(db_url: &str) -> PathBuf {
    let rest = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))
        .unwrap_or(db_url);
    let path = rest.split('?').next().unwrap_or(rest);
    Path::new(path).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(
            sqlite_file_path("sqlite:data/kosync.db"),
            PathBuf::from("data/kosync.db")
        );
        assert_eq!(
            sqlite_file_path("sqlite://data/kosync.db?mode=rwc"),
            PathBuf::from("data/kosync.db")
        );
        assert_eq!(sqlite_file_path("plain.db"), PathBuf::from("plain.db"));
    }

    #[tokio::test]
    async fn test_in_memory_connection_is_never_recycled() {
        let store = Store::open("sqlite::memory:").await.unwrap();

        let options = store.conn.get_sqlite_connection_pool().options();
        assert_eq!(options.get_max_connections(), 1);
        assert_eq!(options.get_max_lifetime(), Some(MEMORY_CONNECTION_LIFETIME));
        assert_eq!(options.get_idle_timeout(), Some(MEMORY_CONNECTION_LIFETIME));

        store.create_user("alice", "secret", 8).await.unwrap();
        assert!(store.get_user("alice").await.unwrap().is_some());
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_pool_recycles_connections() {
        let path = std::env::temp_dir().join(format!("kosync-pool-{}.db", uuid::Uuid::new_v4()));
        let store = Store::open(&format!("sqlite:{}", path.display()))
            .await
            .unwrap();

        let options = store.conn.get_sqlite_connection_pool().options();
        assert_eq!(options.get_max_lifetime(), Some(Duration::from_secs(600)));

        store.close().await.unwrap();
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_open_creates_file_and_parent_dir() {
        let dir = std::env::temp_dir().join(format!("kosync-store-{}", uuid::Uuid::new_v4()));
        let db_path = dir.join("nested").join("sync.db");

        let store = Store::open(&format!("sqlite:{}", db_path.display()))
            .await
            .unwrap();
        assert!(db_path.exists());
        store.close().await.unwrap();

        let _ = std::fs::remove_dir_all(dir);
    }
}
