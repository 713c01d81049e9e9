use std::path::Path;

use crate::config::Config;

pub fn cmd_init_config(path: &Path) -> anyhow::Result<()> {
    if Config::create_default_if_missing(path)? {
        println!("✓ Wrote default config to {}", path.display());
    } else {
        println!("Config already exists at {}, left unchanged", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_does_not_overwrite_existing_file() {
        let dir = std::env::temp_dir().join(format!("kosync-init-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        cmd_init_config(&path).unwrap();
        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.server.listen_addr, "127.0.0.1:9200");

        std::fs::write(&path, "[server]\nlisten_addr = \"0.0.0.0:1\"\n").unwrap();
        cmd_init_config(&path).unwrap();
        let kept = Config::load_from_path(&path).unwrap();
        assert_eq!(kept.server.listen_addr, "0.0.0.0:1");

        let _ = std::fs::remove_dir_all(dir);
    }
}
