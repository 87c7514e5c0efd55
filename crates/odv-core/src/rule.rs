//! # Rule Tables
//!
//! A rule table is the declarative form of one ODIM_H5 standard revision for
//! one product type: an ordered list of entries, each naming a location, its
//! mandatory/optional status, and a constraint on its value.

use serde::{Deserialize, Serialize};

use crate::location::Location;
use crate::value::ValueKind;
use crate::version::StandardVersion;

/// One row of a standard table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    /// Where the described node lives.
    pub location: Location,
    /// Whether the node must be present.
    pub mandatory: bool,
    /// Raw constraint text. Empty means presence only.
    #[serde(default)]
    pub constraint_text: String,
    /// The standard revision this rule belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_version: Option<StandardVersion>,
    /// The value kind the standard declares for this attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_kind: Option<ValueKind>,
    /// Free-text description from the table.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl RuleEntry {
    /// A rule with the given status and constraint and no other metadata.
    pub fn new(location: Location, mandatory: bool, constraint_text: impl Into<String>) -> Self {
        Self {
            location,
            mandatory,
            constraint_text: constraint_text.into(),
            standard_version: None,
            expected_kind: None,
            description: String::new(),
        }
    }

    /// A mandatory rule.
    pub fn mandatory(location: Location, constraint_text: impl Into<String>) -> Self {
        Self::new(location, true, constraint_text)
    }

    /// An optional rule.
    pub fn optional(location: Location, constraint_text: impl Into<String>) -> Self {
        Self::new(location, false, constraint_text)
    }

    /// The synthetic entry reported for an observed node that no rule describes.
    pub fn unexpected(location: Location, standard_version: Option<StandardVersion>) -> Self {
        Self {
            standard_version,
            ..Self::new(location, false, String::new())
        }
    }

    /// Set the standard revision.
    pub fn with_version(mut self, version: StandardVersion) -> Self {
        self.standard_version = Some(version);
        self
    }

    /// Set the declared value kind.
    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.expected_kind = Some(kind);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// True when the rule only requires presence.
    pub fn is_presence_only(&self) -> bool {
        self.constraint_text.trim().is_empty()
    }
}

/// An ordered collection of rule entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Standard revision declared by the table source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<StandardVersion>,
    /// Product type (`PVOL`, `SCAN`, ...) declared by the table source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    entries: Vec<RuleEntry>,
}

impl RuleTable {
    /// A table holding `entries` in order.
    pub fn new(entries: Vec<RuleEntry>) -> Self {
        Self {
            version: None,
            product: None,
            entries,
        }
    }

    /// Set the declared revision.
    pub fn with_version(mut self, version: StandardVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Set the declared product type.
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    /// Append an entry.
    pub fn push(&mut self, entry: RuleEntry) {
        self.entries.push(entry);
    }

    /// Entries in table order.
    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    /// Iterate entries in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, RuleEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of mandatory entries.
    pub fn mandatory_count(&self) -> usize {
        self.entries.iter().filter(|e| e.mandatory).count()
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a RuleEntry;
    type IntoIter = std::slice::Iter<'a, RuleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<RuleEntry> for RuleTable {
    fn from_iter<T: IntoIterator<Item = RuleEntry>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
