//! # Rule Table Loading
//!
//! Reads a semicolon-separated standard table into a [`RuleTable`]. Every
//! malformed row is an error carrying the table path and line number; a
//! table is either loaded completely or not at all.

use std::path::Path;

use odv_core::{Location, RuleEntry, RuleTable, StandardVersion, ValueKind};

use crate::error::TableError;
use crate::naming::parse_table_file_name;
use crate::record::split_record;

const COMMENT_PREFIX: char = '#';
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Node categories used by the `Category` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Group,
    Dataset,
    Attribute,
}

impl Category {
    fn parse(field: &str) -> Option<Self> {
        match field.trim().to_ascii_lowercase().as_str() {
            "group" => Some(Self::Group),
            "dataset" => Some(Self::Dataset),
            "attribute" => Some(Self::Attribute),
            _ => None,
        }
    }
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    node: usize,
    category: usize,
    value_type: usize,
    mandatory: usize,
    possible_values: usize,
    description: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String], path: &str) -> Result<Self, TableError> {
        let find = |name: &'static str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &'static str| {
            find(name).ok_or_else(|| TableError::MissingColumn {
                path: path.to_string(),
                column: name,
            })
        };
        Ok(Self {
            node: require("Node")?,
            category: require("Category")?,
            value_type: require("Type")?,
            mandatory: require("IsMandatory")?,
            possible_values: require("PossibleValues")?,
            description: find("Description"),
        })
    }

    fn required_width(&self) -> usize {
        [
            self.node,
            self.category,
            self.value_type,
            self.mandatory,
            self.possible_values,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}

/// Load a rule table from `path`.
///
/// The table's revision and product are taken from the file name when it
/// follows the `{prefix}_V{major}_{minor}_{product}.csv` convention, and
/// every entry is stamped with that revision.
///
/// # Errors
///
/// Returns [`TableError::Io`] if the file cannot be read, and the other
/// [`TableError`] variants for malformed content.
pub fn load_rule_table(path: &Path) -> Result<RuleTable, TableError> {
    let shown = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| TableError::Io {
        path: shown.clone(),
        source,
    })?;

    let name = parse_table_file_name(path);
    if name.is_none() {
        tracing::warn!(
            path = %shown,
            "rule table name does not follow the naming convention; revision and product unknown"
        );
    }
    let version = name.as_ref().map(|n| n.version);
    let mut table = parse_rule_table(&content, &shown, version)?;
    if let Some(name) = name {
        table = table.with_version(name.version).with_product(name.product);
    }

    tracing::debug!(
        path = %shown,
        entries = table.len(),
        mandatory = table.mandatory_count(),
        "loaded rule table"
    );
    Ok(table)
}

/// Parse rule table text. `origin` names the source in error messages;
/// `version`, when known, is stamped on every entry.
pub fn parse_rule_table(
    text: &str,
    origin: &str,
    version: Option<StandardVersion>,
) -> Result<RuleTable, TableError> {
    let mut rows = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_start_matches(BYTE_ORDER_MARK)))
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with(COMMENT_PREFIX)
        });

    let (header_line, header) = rows.next().ok_or_else(|| TableError::Empty {
        path: origin.to_string(),
    })?;
    let header = split_record(header).map_err(|reason| TableError::Malformed {
        path: origin.to_string(),
        line: header_line,
        reason,
    })?;
    let columns = Columns::from_header(&header, origin)?;

    let mut table = RuleTable::default();
    for (line, row) in rows {
        table.push(parse_row(row, line, &columns, origin, version)?);
    }
    Ok(table)
}

fn parse_row(
    row: &str,
    line: usize,
    columns: &Columns,
    origin: &str,
    version: Option<StandardVersion>,
) -> Result<RuleEntry, TableError> {
    let malformed = |reason: String| TableError::Malformed {
        path: origin.to_string(),
        line,
        reason,
    };

    let fields = split_record(row).map_err(malformed)?;
    if fields.len() < columns.required_width() {
        return Err(malformed(format!(
            "expected at least {} fields, found {}",
            columns.required_width(),
            fields.len()
        )));
    }

    let category_field = &fields[columns.category];
    let category = Category::parse(category_field).ok_or_else(|| TableError::Category {
        path: origin.to_string(),
        line,
        value: category_field.clone(),
    })?;

    let node = &fields[columns.node];
    let location = match category {
        Category::Attribute => Location::parse_attribute_path(node),
        Category::Group | Category::Dataset => Location::parse(node),
    }
    .map_err(|source| TableError::Location {
        path: origin.to_string(),
        line,
        source,
    })?;
    if category != Category::Attribute && location.is_attribute() {
        return Err(malformed(format!(
            "{node:?} is listed as a {} but names an attribute",
            category_field.trim().to_ascii_lowercase()
        )));
    }

    let mandatory = parse_flag(&fields[columns.mandatory]).ok_or_else(|| {
        TableError::MandatoryFlag {
            path: origin.to_string(),
            line,
            value: fields[columns.mandatory].clone(),
        }
    })?;

    let mut entry = RuleEntry::new(location, mandatory, fields[columns.possible_values].clone());

    let type_field = fields[columns.value_type].trim();
    if category == Category::Attribute && !type_field.is_empty() {
        let kind = type_field
            .parse::<ValueKind>()
            .map_err(|reason| TableError::ValueType {
                path: origin.to_string(),
                line,
                reason,
            })?;
        entry = entry.with_kind(kind);
    }

    if let Some(description) = columns.description.and_then(|i| fields.get(i)) {
        if !description.is_empty() {
            entry = entry.with_description(description.clone());
        }
    }
    if let Some(version) = version {
        entry = entry.with_version(version);
    }
    Ok(entry)
}

fn parse_flag(field: &str) -> Option<bool> {
    match field.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Node;Category;Type;IsMandatory;PossibleValues;Description";

    fn parse(body: &str) -> Result<RuleTable, TableError> {
        parse_rule_table(&format!("{HEADER}\n{body}"), "test.csv", None)
    }

    fn loc(s: &str) -> Location {
        Location::parse(s).unwrap()
    }

    #[test]
    fn parses_rows_in_order() {
        let table = parse(
            "/what;group;;TRUE;;\n\
             /what/source;attribute;string;TRUE;.*NOD:.*;Source identifier\n\
             /how/beamwidth;attribute;real;FALSE;>0;\n",
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        let entries = table.entries();
        assert_eq!(entries[0].location, loc("/what"));
        assert!(entries[0].is_presence_only());
        assert_eq!(entries[1].location, loc("/what#source"));
        assert_eq!(entries[1].constraint_text, ".*NOD:.*");
        assert_eq!(entries[1].expected_kind, Some(ValueKind::Text));
        assert_eq!(entries[1].description, "Source identifier");
        assert!(!entries[2].mandatory);
        assert_eq!(entries[2].expected_kind, Some(ValueKind::Number));
    }

    #[test]
    fn header_is_case_insensitive_and_description_optional() {
        let table = parse_rule_table(
            "possiblevalues;NODE;category;type;ismandatory\nPVOL;/what/object;attribute;string;yes\n",
            "t.csv",
            Some(StandardVersion::new(2, 4)),
        )
        .unwrap();
        let entry = &table.entries()[0];
        assert_eq!(entry.location, loc("/what#object"));
        assert_eq!(entry.constraint_text, "PVOL");
        assert!(entry.mandatory);
        assert_eq!(entry.standard_version, Some(StandardVersion::new(2, 4)));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let table = parse("\n# groups\n/what;group;;1;;\n\n").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn quoted_constraints_keep_separators() {
        let table = parse(r#"/what/source;attribute;string;TRUE;"(WMO:.*);(NOD:.*)";"#).unwrap();
        assert_eq!(table.entries()[0].constraint_text, "(WMO:.*);(NOD:.*)");
    }

    #[test]
    fn pattern_nodes_are_kept() {
        let table = parse("/dataset[0-9]+/where/elangle;attribute;real;TRUE;>=-2;").unwrap();
        assert_eq!(
            table.entries()[0].location.to_string(),
            "/dataset[0-9]+/where#elangle"
        );
    }

    #[test]
    fn missing_column_is_reported() {
        let err = parse_rule_table("Node;Category;Type;PossibleValues\n", "t.csv", None).unwrap_err();
        assert!(matches!(
            err,
            TableError::MissingColumn {
                column: "IsMandatory",
                ..
            }
        ));
    }

    #[test]
    fn empty_table_is_reported() {
        let err = parse_rule_table("# nothing\n\n", "t.csv", None).unwrap_err();
        assert!(matches!(err, TableError::Empty { .. }));
    }

    #[test]
    fn bad_mandatory_flag_carries_line() {
        let err = parse("/what;group;;maybe;;").unwrap_err();
        match err {
            TableError::MandatoryFlag { line, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(value, "maybe");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn unknown_category_and_type_are_reported() {
        assert!(matches!(
            parse("/what;folder;;TRUE;;").unwrap_err(),
            TableError::Category { .. }
        ));
        assert!(matches!(
            parse("/what/date;attribute;complex;TRUE;;").unwrap_err(),
            TableError::ValueType { .. }
        ));
    }

    #[test]
    fn short_row_is_malformed() {
        assert!(matches!(
            parse("/what;group").unwrap_err(),
            TableError::Malformed { line: 2, .. }
        ));
    }

    #[test]
    fn group_with_attribute_separator_is_rejected() {
        assert!(matches!(
            parse("/what#source;group;;TRUE;;").unwrap_err(),
            TableError::Malformed { .. }
        ));
    }

    #[test]
    fn attribute_without_segments_is_rejected() {
        assert!(matches!(
            parse("/;attribute;string;TRUE;;").unwrap_err(),
            TableError::Location { .. }
        ));
    }
}
