//! # Check Configuration
//!
//! Defaults for `odv check`, read from a YAML file given with `--config`.
//! Command-line flags override file values; boolean flags can only switch
//! a policy on.
//!
//! ```yaml
//! tables_dir: /usr/share/odv/data
//! table_prefix: ODIM_H5
//! check_optional: false
//! check_extras: false
//! print_info: true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use odv_standard::{TableLocator, DEFAULT_TABLE_PREFIX};

/// Directory searched for tables when neither the file nor the flags name one.
pub const DEFAULT_TABLES_DIR: &str = "data";

/// Settings shared by every file of one `odv check` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Directory holding the standard tables.
    pub tables_dir: PathBuf,
    /// Table file name prefix.
    pub table_prefix: String,
    /// Report failing optional entries.
    pub check_optional: bool,
    /// Report nodes no table entry describes.
    pub check_extras: bool,
    /// Emit per-rule informational events.
    pub print_info: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            tables_dir: PathBuf::from(DEFAULT_TABLES_DIR),
            table_prefix: DEFAULT_TABLE_PREFIX.to_string(),
            check_optional: false,
            check_extras: false,
            print_info: true,
        }
    }
}

impl CheckConfig {
    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Read `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Table lookup for this configuration, with `--tables-dir` taking
    /// precedence over `tables_dir`.
    pub fn table_locator(&self, dir_override: Option<&Path>) -> TableLocator {
        let dir = dir_override.unwrap_or(self.tables_dir.as_path());
        TableLocator::new(dir).with_prefix(self.table_prefix.as_str())
    }
}
