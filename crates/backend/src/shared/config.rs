use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub import: ImportConfig,
    #[serde(default)]
    pub estimates: EstimatesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Key of the single dataset blob in `app_kv`.
    pub dataset_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    pub max_upload_bytes: usize,
    pub soiled_damaged_default: f64,
    /// Extra store number → name entries, merged over the built-in directory.
    #[serde(default)]
    pub store_names: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EstimatesConfig {
    /// Fixed seed for the display-only estimates; random per request when unset.
    pub seed: Option<u64>,
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[server]
bind = "0.0.0.0:3000"

[database]
path = "target/db/app.db"

[storage]
dataset_key = "primark_stores_data"

[import]
max_upload_bytes = 10485760
soiled_damaged_default = 5.0

[import.store_names]

[estimates]
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.import.soiled_damaged_default < 0.0 {
        anyhow::bail!("import.soiled_damaged_default must not be negative");
    }
    Ok(config)
}

/// Resolves the database path; relative paths are taken from the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    let db_path = Path::new(&config.database.path);

    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(db_path);
        }
    }

    PathBuf::from(&config.database.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert_eq!(config.database.path, "target/db/app.db");
        assert_eq!(config.storage.dataset_key, "primark_stores_data");
        assert_eq!(config.import.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.import.soiled_damaged_default, 5.0);
        assert!(config.import.store_names.is_empty());
        assert_eq!(config.estimates.seed, None);
    }

    #[test]
    fn test_overrides() {
        let contents = r#"
            [server]
            bind = "127.0.0.1:8080"
            [database]
            path = "/var/lib/kpi/app.db"
            [storage]
            dataset_key = "stores"
            [import]
            max_upload_bytes = 1024
            soiled_damaged_default = 4.5
            [import.store_names]
            "500" = "Gandia"
            [estimates]
            seed = 7
        "#;
        let config = parse_config(contents).unwrap();
        assert_eq!(config.import.store_names.get("500").map(String::as_str), Some("Gandia"));
        assert_eq!(config.estimates.seed, Some(7));
        assert_eq!(get_database_path(&config), PathBuf::from("/var/lib/kpi/app.db"));
    }

    #[test]
    fn test_missing_estimates_section_defaults() {
        let contents = DEFAULT_CONFIG.replace("[estimates]", "");
        assert!(parse_config(&contents).unwrap().estimates.seed.is_none());
    }

    #[test]
    fn test_negative_soiled_default_rejected() {
        let contents = DEFAULT_CONFIG.replace("soiled_damaged_default = 5.0", "soiled_damaged_default = -1.0");
        assert!(parse_config(&contents).is_err());
    }
}
