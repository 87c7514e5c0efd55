//! # Table Naming
//!
//! Maps an observed file to the table that describes it. The revision comes
//! from an explicit override or, failing that, the file's own declaration;
//! the product comes from `/what#object`.

use std::path::{Path, PathBuf};

use odv_core::{ObservedTree, StandardVersion};

use crate::error::TableError;

/// Prefix of the bundled ODIM_H5 tables.
pub const DEFAULT_TABLE_PREFIX: &str = "ODIM_H5";

/// Extension of rule table files.
pub const TABLE_EXTENSION: &str = "csv";

/// The parts of a conventional table file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    /// Everything before the version tag, `ODIM_H5` for the bundled tables.
    pub prefix: String,
    /// Standard revision.
    pub version: StandardVersion,
    /// Product type, `PVOL`, `SCAN`, ...
    pub product: String,
}

impl TableName {
    /// The file name, `ODIM_H5_V2_1_PVOL.csv`.
    pub fn file_name(&self) -> String {
        table_file_name(&self.prefix, self.version, &self.product)
    }
}

/// Build a table file name: `{prefix}_V{major}_{minor}_{product}.csv`.
pub fn table_file_name(prefix: &str, version: StandardVersion, product: &str) -> String {
    format!("{prefix}_{}_{product}.{TABLE_EXTENSION}", version.tag())
}

/// Split a conventional table file name into its parts.
///
/// Returns `None` when the name does not end in
/// `_V{major}_{minor}_{product}.csv`.
pub fn parse_table_file_name(path: &Path) -> Option<TableName> {
    if path.extension()?.to_str()? != TABLE_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;

    let mut parts = stem.rsplitn(4, '_');
    let product = parts.next()?;
    let minor = parts.next()?;
    let major = parts.next()?.strip_prefix(['V', 'v'])?;
    let prefix = parts.next()?;
    if product.is_empty() || prefix.is_empty() {
        return None;
    }

    Some(TableName {
        prefix: prefix.to_string(),
        version: StandardVersion::new(major.parse().ok()?, minor.parse().ok()?),
        product: product.to_string(),
    })
}

/// Where rule tables live and how they are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLocator {
    dir: PathBuf,
    prefix: String,
}

impl TableLocator {
    /// Tables in `dir` with the default prefix.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: DEFAULT_TABLE_PREFIX.to_string(),
        }
    }

    /// Use `prefix` instead of the default.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// The tables directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The table path for `observed`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Unresolvable`] when no override is given and the
    /// file declares no revision, or when it has no `/what#object`.
    pub fn resolve(
        &self,
        observed: &ObservedTree,
        version_override: Option<StandardVersion>,
    ) -> Result<PathBuf, TableError> {
        let version = match version_override {
            Some(version) => version,
            None => observed
                .declared_version()
                .ok_or_else(|| TableError::Unresolvable {
                    reason: "the file declares no standard version in /what#version or /#Conventions"
                        .to_string(),
                })?,
        };
        let product = observed.product().ok_or_else(|| TableError::Unresolvable {
            reason: "the file has no /what#object product".to_string(),
        })?;

        let path = self.dir.join(table_file_name(&self.prefix, version, product));
        tracing::debug!(
            path = %path.display(),
            version = %version,
            product,
            overridden = version_override.is_some(),
            "resolved rule table"
        );
        Ok(path)
    }
}

/// The default-prefix table path in `dir` for `observed`.
pub fn resolve_table_path(
    dir: &Path,
    observed: &ObservedTree,
    version_override: Option<StandardVersion>,
) -> Result<PathBuf, TableError> {
    TableLocator::new(dir).resolve(observed, version_override)
}
