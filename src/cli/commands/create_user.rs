use crate::config::Config;
use crate::db::{CreateUser, Store};
use crate::services::NewAccount;

pub async fn cmd_create_user(config: &Config, username: &str, password: &str) -> anyhow::Result<()> {
    let account = NewAccount {
        username: username.to_string(),
        password: password.to_string(),
    };
    if let Err(e) = account.validate() {
        anyhow::bail!("{e}");
    }

    let store = Store::open(&config.general.database_path).await?;
    let outcome = store
        .create_user(username, password, config.security.salt_length)
        .await;
    store.close().await?;

    match outcome? {
        CreateUser::Created => {
            println!("✓ Created user: {username}");
            Ok(())
        }
        CreateUser::AlreadyExists => anyhow::bail!("User '{username}' already exists"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_user_twice_fails() {
        let path = std::env::temp_dir().join(format!("kosync-cli-{}.db", uuid::Uuid::new_v4()));
        let mut config = Config::default();
        config.set_database(path.to_str().unwrap());

        cmd_create_user(&config, "alice", "secret").await.unwrap();
        assert!(cmd_create_user(&config, "alice", "other").await.is_err());
        assert!(cmd_create_user(&config, "", "secret").await.is_err());

        let _ = std::fs::remove_file(&path);
    }
}
