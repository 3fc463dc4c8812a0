//! Configuration types and parsing for tidemark.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Primary config file name
pub const CONFIG_FILE: &str = "tidemark.yml";

/// Alternate config file name
const CONFIG_FILE_ALT: &str = "tidemark.yaml";

/// Main project configuration from tidemark.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Directory containing the numbered migration files
    #[serde(default = "default_migrations_path")]
    pub migrations_path: String,

    /// SQL dialect used for tokens and version-table templates
    #[serde(default)]
    pub dialect: Dialect,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Name of the table tracking applied versions
    #[serde(default = "default_version_table")]
    pub version_table: String,

    /// Named target configurations (e.g., dev, staging, prod)
    #[serde(default)]
    pub targets: HashMap<String, TargetConfig>,
}

/// Target-specific configuration overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Database configuration override
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

/// Database type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// DuckDB (default)
    #[default]
    DuckDb,
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbType::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// DuckDB SQL dialect
    #[default]
    DuckDb,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database type
    #[serde(rename = "type", default)]
    pub db_type: DbType,

    /// Database path (file-based or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DbType::default(),
            path: default_db_path(),
        }
    }
}

const DEFAULT_DB_PATH: &str = "tidemark.duckdb";

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_migrations_path() -> String {
    "migrations".to_string()
}

fn default_version_table() -> String {
    "tidemark_version".to_string()
}

impl Config {
    /// Minimal configuration with defaults, as written by `tm init`
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            migrations_path: default_migrations_path(),
            dialect: Dialect::default(),
            database: DatabaseConfig::default(),
            version_table: default_version_table(),
            targets: HashMap::new(),
        }
    }

    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for tidemark.yml or tidemark.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join(CONFIG_FILE);
        let yaml_path = dir.join(CONFIG_FILE_ALT);

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if self.migrations_path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_path cannot be empty".to_string(),
            });
        }

        if !is_plain_identifier(&self.version_table) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "version_table '{}' must be a plain identifier (letters, digits, underscores)",
                    self.version_table
                ),
            });
        }

        validate_database(&self.database, "database")?;
        for (name, target) in &self.targets {
            if let Some(db) = &target.database {
                validate_database(db, &format!("targets.{}.database", name))?;
            }
        }

        Ok(())
    }

    /// Get absolute migrations path relative to a project root
    pub fn migrations_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_path)
    }

    /// Get the list of available target names, sorted
    pub fn available_targets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.targets.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Resolve the database configuration for an optional named target
    pub fn database_for(&self, target: Option<&str>) -> CoreResult<&DatabaseConfig> {
        let Some(name) = target else {
            return Ok(&self.database);
        };
        let target = self
            .targets
            .get(name)
            .ok_or_else(|| CoreError::UnknownTarget {
                name: name.to_string(),
                available: self.available_targets().join(", "),
            })?;
        Ok(target.database.as_ref().unwrap_or(&self.database))
    }
}

fn validate_database(db: &DatabaseConfig, field: &str) -> CoreResult<()> {
    if db.path.trim().is_empty() {
        return Err(CoreError::ConfigInvalid {
            message: format!("{}.path cannot be empty", field),
        });
    }
    Ok(())
}

fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
