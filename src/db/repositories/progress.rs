use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entities::{prelude::*, progress, progress_history};
use crate::models::{ProgressRecord, UserId};

pub struct ProgressRepository {
    conn: DatabaseConnection,
}

impl ProgressRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, user: UserId, document: &str) -> Result<Option<ProgressRecord>> {
        let row = Progress::find_by_id((user.0, document.to_string()))
            .one(&self.conn)
            .await
            .context("Failed to query progress")?;

        Ok(row.map(ProgressRecord::from))
    }

    /// Replace the whole row keyed by (user, document). Last writer wins:
    /// no comparison against the stored timestamp or device.
    pub async fn upsert(&self, record: &ProgressRecord) -> Result<()> {
        Self::replace_row(&self.conn, record).await
    }

    /// Same as [`Self::upsert`], plus an append to `progress_history`, in
    /// one transaction.
    pub async fn upsert_with_history(&self, record: &ProgressRecord) -> Result<()> {
        let txn = self.conn.begin().await?;

        Self::replace_row(&txn, record).await?;

        let entry = progress_history::ActiveModel {
            id: NotSet,
            user: Set(record.user_id),
            document: Set(record.document.clone()),
            percentage: Set(record.percentage),
            progress: Set(record.progress.clone()),
            device: Set(record.device.clone()),
            device_id: Set(record.device_id.clone()),
            timestamp: Set(record.timestamp),
        };
        ProgressHistory::insert(entry)
            .exec_without_returning(&txn)
            .await
            .context("Failed to append progress history")?;

        txn.commit().await?;
        Ok(())
    }

    /// History entries for (user, document), oldest first.
    pub async fn history(&self, user: UserId, document: &str) -> Result<Vec<ProgressRecord>> {
        let rows = ProgressHistory::find()
            .filter(progress_history::Column::User.eq(user.0))
            .filter(progress_history::Column::Document.eq(document))
            .order_by_asc(progress_history::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query progress history")?;

        Ok(rows
            .into_iter()
            .map(|row| ProgressRecord {
                user_id: row.user,
                document: row.document,
                percentage: row.percentage,
                progress: row.progress,
                device: row.device,
                device_id: row.device_id,
                timestamp: row.timestamp,
            })
            .collect())
    }

    async fn replace_row<C: ConnectionTrait>(conn: &C, record: &ProgressRecord) -> Result<()> {
        let active = progress::ActiveModel {
            user: Set(record.user_id),
            document: Set(record.document.clone()),
            percentage: Set(record.percentage),
            progress: Set(record.progress.clone()),
            device: Set(record.device.clone()),
            device_id: Set(record.device_id.clone()),
            timestamp: Set(record.timestamp),
        };

        Progress::insert(active)
            .on_conflict(
                OnConflict::columns([progress::Column::User, progress::Column::Document])
                    .update_columns([
                        progress::Column::Percentage,
                        progress::Column::Progress,
                        progress::Column::Device,
                        progress::Column::DeviceId,
                        progress::Column::Timestamp,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .context("Failed to upsert progress")?;

        Ok(())
    }
}
