//! Compiler configuration.
//!
//! Read from a TOML file:
//!
//! ```toml
//! data_dir = "data"
//! optional_tables = ["artifact", "ego_item"]
//! ```
//!
//! or from the environment:
//! - `OBJECT_DATA_DIR` - directory holding the `<table>.txt` files
//! - `OBJECT_OPTIONAL_TABLES` - comma-separated tables that may be missing

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::LoadResult;
use crate::tables::TableKind;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub data_dir: PathBuf,
    /// Tables whose data file may be absent.
    pub optional_tables: Vec<TableKind>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            optional_tables: Vec::new(),
        }
    }
}

impl CompilerConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse compiler config TOML: {}", e))?;
        Ok(config)
    }

    /// Construct configuration from process environment variables, falling
    /// back to the defaults for anything unset.
    pub fn from_env() -> LoadResult<Self> {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("OBJECT_DATA_DIR") {
            config.data_dir = dir;
        }

        if let Ok(list) = env::var("OBJECT_OPTIONAL_TABLES") {
            config.optional_tables = parse_table_list(&list)?;
        }

        Ok(config)
    }

    pub fn is_optional(&self, table: TableKind) -> bool {
        self.optional_tables.contains(&table)
    }
}

/// Parses a comma-separated list of table names.
pub fn parse_table_list(list: &str) -> LoadResult<Vec<TableKind>> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            name.parse()
                .map_err(|_| anyhow::anyhow!("Unknown table '{}'", name))
        })
        .collect()
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
