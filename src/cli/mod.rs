//! CLI module - command-line interface for the sync server
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

/// kosync - KOReader reading progress sync server
#[derive(Parser, Debug)]
#[command(name = "kosync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the config file (default: search the usual locations)
    #[arg(long, short, global = true, env = "KOSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen address, overrides `server.listen_addr`
    #[arg(long, global = true)]
    pub addr: Option<String>,

    /// Database URL or file path, overrides `general.database_path`
    #[arg(long, global = true)]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Register an account without going through the HTTP API
    #[command(alias = "adduser")]
    CreateUser {
        username: String,
        password: String,
    },

    /// Write a default config file if none exists
    InitConfig {
        #[arg(default_value = "config.toml")]
        path: PathBuf,
    },
}

impl Cli {
    /// Loads the config file and applies command-line overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_path(path)?,
            None => Config::load()?,
        };

        if let Some(addr) = &self.addr {
            config.server.listen_addr.clone_from(addr);
        }
        if let Some(db) = &self.db {
            config.set_database(db);
        }

        Ok(config)
    }
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["kosync"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.addr.is_none());
    }

    #[test]
    fn test_overrides_are_applied() {
        let dir = std::env::temp_dir().join(format!("kosync-cli-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");
        Config::default().save_to_path(&path).unwrap();

        let cli = Cli::try_parse_from([
            "kosync",
            "--config",
            path.to_str().unwrap(),
            "--addr",
            "0.0.0.0:8081",
            "--db",
            "/tmp/progress.db",
            "serve",
        ])
        .unwrap();

        let config = cli.load_config().unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0:8081");
        assert_eq!(config.general.database_path, "sqlite:/tmp/progress.db");
        assert!(matches!(cli.command, Some(Commands::Serve)));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_create_user_arguments() {
        let cli = Cli::try_parse_from(["kosync", "create-user", "alice", "secret"]).unwrap();
        match cli.command {
            Some(Commands::CreateUser { username, password }) => {
                assert_eq!(username, "alice");
                assert_eq!(password, "secret");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_init_config_default_path() {
        let cli = Cli::try_parse_from(["kosync", "init-config"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::InitConfig { ref path }) if path == &PathBuf::from("config.toml")
        ));
    }
}
