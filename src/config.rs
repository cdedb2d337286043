//! Configuration from `clause-assembler.toml`.
//!
//! ```toml
//! dialect = "postgres"
//! schema = "schema.json"
//!
//! [database]
//! url = "postgres://localhost/devices"
//!
//! [adapter]
//! default_table = "firmware"
//!
//! [adapter.fields]
//! tag = "tags.name"
//! link = "uri"
//! internal = "-"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AssemblyError, AssemblyResult};
use crate::schema::Schema;
use crate::transpiler::Dialect;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "clause-assembler.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub dialect: Dialect,

    /// Path to a JSON or TOML schema catalog.
    #[serde(default)]
    pub schema: Option<PathBuf>,

    #[serde(default)]
    pub adapter: AdapterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Field mapping directives: `"table.column"`, `"column"` or `"-"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdapterConfig {
    #[serde(default)]
    pub default_table: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl Config {
    pub fn from_toml(content: &str) -> AssemblyResult<Self> {
        toml::from_str(content).map_err(|e| AssemblyError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> AssemblyResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        // schema paths are relative to the config file
        if let (Some(schema), Some(dir)) = (config.schema.as_mut(), path.parent()) {
            if schema.is_relative() {
                *schema = dir.join(&*schema);
            }
        }
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// `clause-assembler.toml` in the working directory, then the user's
    /// config directory. Defaults when neither exists.
    pub fn discover() -> AssemblyResult<Self> {
        match Self::locate() {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("No {} found, using defaults", CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    fn locate() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("clause-assembler").join("config.toml"))
            .filter(|path| path.is_file())
    }

    pub fn database_url(&self) -> AssemblyResult<&str> {
        self.database
            .as_ref()
            .map(|db| db.url.as_str())
            .ok_or_else(|| AssemblyError::Config(format!("No [database] url in {}", CONFIG_FILE)))
    }

    /// Load the configured schema catalog.
    pub fn load_schema(&self) -> AssemblyResult<Schema> {
        let path = self
            .schema
            .as_ref()
            .ok_or_else(|| AssemblyError::Config("No schema path configured".to_string()))?;
        Schema::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let config = Config::from_toml(
            r#"
            dialect = "sqlite"
            schema = "schema.toml"

            [database]
            url = "postgres://localhost/devices"

            [adapter]
            default_table = "firmware"

            [adapter.fields]
            tag = "tags.name"
            internal = "-"
            "#,
        )
        .unwrap();
        assert_eq!(config.dialect, Dialect::Sqlite);
        assert_eq!(config.database_url().unwrap(), "postgres://localhost/devices");
        assert_eq!(config.adapter.default_table.as_deref(), Some("firmware"));
        assert_eq!(config.adapter.fields["tag"], "tags.name");
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.dialect, Dialect::Postgres);
        assert!(config.adapter.fields.is_empty());
        assert!(matches!(config.database_url(), Err(AssemblyError::Config(_))));
        assert!(matches!(config.load_schema(), Err(AssemblyError::Config(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("dialect = ").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_load_resolves_schema_relative_to_file() {
        let dir = std::env::temp_dir().join(format!("clause-assembler-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, "schema = \"schema.json\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.schema, Some(dir.join("schema.json")));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
