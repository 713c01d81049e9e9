use sea_orm_migration::prelude::*;

mod m20260301_create_users;
mod m20260301_create_progress;
mod m20260315_add_progress_history;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_create_users::Migration),
            Box::new(m20260301_create_progress::Migration),
            Box::new(m20260315_add_progress_history::Migration),
        ]
    }
}
