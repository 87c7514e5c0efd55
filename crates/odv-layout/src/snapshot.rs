//! # Layout Snapshots
//!
//! Reads layout dumps written as a JSON or YAML mapping. YAML documents are
//! converted to the JSON value model first, so both formats share one
//! conversion into observed nodes.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use odv_core::location::ATTRIBUTE_SEPARATOR;
use odv_core::{AttributeValue, Location, ObservedNode, ObservedTree};

use crate::error::LayoutError;
use crate::source::LayoutSource;

/// Text format of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl SnapshotFormat {
    /// Format implied by the file extension. Anything other than
    /// `.yaml`/`.yml` is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Reads layout snapshots from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotSource;

impl SnapshotSource {
    /// Create a snapshot reader.
    pub fn new() -> Self {
        Self
    }

    /// Parse snapshot text. `origin` names the input in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Parse`] for invalid JSON/YAML and the other
    /// [`LayoutError`] variants for content that is not a layout.
    pub fn parse_str(
        &self,
        text: &str,
        format: SnapshotFormat,
        origin: &str,
    ) -> Result<ObservedTree, LayoutError> {
        let parse_error = |reason: String| LayoutError::Parse {
            path: origin.to_string(),
            format: format.name(),
            reason,
        };

        let document = match format {
            SnapshotFormat::Json => {
                serde_json::from_str::<Value>(text).map_err(|e| parse_error(e.to_string()))?
            }
            SnapshotFormat::Yaml => {
                let yaml: serde_yaml::Value =
                    serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
                yaml_to_json_value(&yaml).map_err(parse_error)?
            }
        };
        tree_from_value(&document, origin)
    }
}

impl LayoutSource for SnapshotSource {
    fn load(&self, path: &Path) -> Result<ObservedTree, LayoutError> {
        let shown = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: shown.clone(),
            source,
        })?;
        let format = SnapshotFormat::from_path(path);
        let tree = self.parse_str(&text, format, &shown)?;
        tracing::debug!(
            path = %shown,
            format = format.name(),
            nodes = tree.len(),
            "loaded layout snapshot"
        );
        Ok(tree)
    }
}

/// Convert a parsed snapshot document into an observed tree.
fn tree_from_value(document: &Value, origin: &str) -> Result<ObservedTree, LayoutError> {
    let Value::Object(entries) = document else {
        return Err(LayoutError::NotAMapping {
            path: origin.to_string(),
        });
    };

    let mut tree = ObservedTree::default();
    let mut containers: HashMap<Location, usize> = HashMap::new();

    for (key, value) in entries {
        let unsupported = |reason: &str| LayoutError::UnsupportedValue {
            path: origin.to_string(),
            key: key.clone(),
            reason: reason.to_string(),
        };
        let bad_location = |source| LayoutError::Location {
            path: origin.to_string(),
            key: key.clone(),
            source,
        };

        if value.is_null() {
            if key.contains(ATTRIBUTE_SEPARATOR) {
                return Err(unsupported("an attribute needs a value"));
            }
            let location = Location::parse(key).map_err(bad_location)?;
            let depth = location.segments().len().saturating_sub(1);
            add_ancestors(&mut tree, &mut containers, depth, &location);
            match containers.get(&location) {
                Some(&index) => tree.nodes_mut()[index].implied = false,
                None => {
                    containers.insert(location.clone(), tree.len());
                    tree.push(ObservedNode::container(location));
                }
            }
            continue;
        }

        let location = Location::parse_attribute_path(key).map_err(bad_location)?;
        let value = attribute_value(value).map_err(|reason| unsupported(&reason))?;
        add_ancestors(&mut tree, &mut containers, location.segments().len(), &location);
        tree.push(ObservedNode::attribute(location, value));
    }

    Ok(tree)
}

/// Push the first `depth` enclosing groups of `location` that are not in
/// the tree yet, marked as implied. `containers` maps each group to its
/// index in the tree.
fn add_ancestors(
    tree: &mut ObservedTree,
    containers: &mut HashMap<Location, usize>,
    depth: usize,
    location: &Location,
) {
    for end in 1..=depth {
        let ancestor = Location::container(&location.segments()[..end]);
        if !containers.contains_key(&ancestor) {
            containers.insert(ancestor.clone(), tree.len());
            tree.push(ObservedNode::implied_container(ancestor));
        }
    }
}

fn attribute_value(value: &Value) -> Result<AttributeValue, String> {
    match value {
        Value::String(text) => Ok(AttributeValue::Text(text.clone())),
        Value::Number(n) => n
            .as_f64()
            .map(AttributeValue::Number)
            .ok_or_else(|| format!("number {n} is not representable as f64")),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_f64()
                    .ok_or_else(|| format!("sequence element {item} is not a number"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(AttributeValue::NumberSequence),
        Value::Bool(_) => Err("booleans are not ODIM_H5 attribute values".to_string()),
        Value::Object(_) => {
            Err("nested mappings are not supported; use full locations as keys".to_string())
        }
        Value::Null => Err("an attribute needs a value".to_string()),
    }
}

/// Convert a YAML document to the JSON value model, keeping mapping order.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f}"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    other => return Err(format!("unsupported YAML key: {other:?}")),
                };
                object.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(text: &str) -> Result<ObservedTree, LayoutError> {
        SnapshotSource::new().parse_str(text, SnapshotFormat::Json, "test.json")
    }

    fn locations(tree: &ObservedTree) -> Vec<String> {
        tree.iter().map(|n| n.location.to_string()).collect()
    }

    #[test]
    fn converts_values_in_document_order() {
        let tree = json(
            r#"{
                "/#Conventions": "ODIM_H5/V2_1",
                "/what/source": "WMO:11812,NOD:skjav",
                "/how#elangles": [0.5, 1.5],
                "/dataset1/where/elangle": 0.5
            }"#,
        )
        .unwrap();

        assert_eq!(
            locations(&tree),
            vec![
                "/#Conventions",
                "/what",
                "/what#source",
                "/how",
                "/how#elangles",
                "/dataset1",
                "/dataset1/where",
                "/dataset1/where#elangle",
            ]
        );
        let elangles = tree.get(&Location::parse("/how#elangles").unwrap()).unwrap();
        assert_eq!(
            elangles.value,
            Some(AttributeValue::NumberSequence(vec![0.5, 1.5]))
        );
        assert_eq!(tree.declared_version().map(|v| v.to_string()), Some("2.1".into()));
    }

    #[test]
    fn explicit_groups_are_not_duplicated() {
        let tree = json(r#"{"/what/object": "PVOL", "/what": null, "/dataset1": null}"#).unwrap();
        assert_eq!(locations(&tree), vec!["/what", "/what#object", "/dataset1"]);
        assert!(tree.nodes()[0].value.is_none());
        assert!(tree.iter().all(|n| !n.implied));
    }

    #[test]
    fn unlisted_groups_are_marked_implied() {
        let tree = json(r#"{"/what/source": "NOD:skjav", "/dataset1": null}"#).unwrap();
        let implied: Vec<(String, bool)> = tree
            .iter()
            .map(|n| (n.location.to_string(), n.implied))
            .collect();
        assert_eq!(
            implied,
            vec![
                ("/what".to_string(), true),
                ("/what#source".to_string(), false),
                ("/dataset1".to_string(), false),
            ]
        );
    }

    #[test]
    fn yaml_keeps_mapping_order() {
        let text = "\"/what#object\": PVOL\n\"/how/NI\": 13.5\n\"/dataset2\": null\n";
        let tree = SnapshotSource::new()
            .parse_str(text, SnapshotFormat::Yaml, "test.yaml")
            .unwrap();
        assert_eq!(
            locations(&tree),
            vec!["/what", "/what#object", "/how", "/how#NI", "/dataset2"]
        );
        assert_eq!(tree.product(), Some("PVOL"));
    }

    #[test]
    fn integers_become_numbers() {
        let tree = json(r#"{"/where#height": 450}"#).unwrap();
        assert_eq!(
            tree.nodes()[1].value,
            Some(AttributeValue::Number(450.0))
        );
    }

    #[test]
    fn rejects_unsupported_values() {
        for text in [
            r#"{"/how#simulated": true}"#,
            r#"{"/how#angles": [1, "two"]}"#,
            r#"{"/how": {"NI": 1}}"#,
            r#"{"/what#source": null}"#,
        ] {
            assert!(
                matches!(json(text), Err(LayoutError::UnsupportedValue { .. })),
                "{text}"
            );
        }
    }

    #[test]
    fn rejects_bad_documents() {
        assert!(matches!(json("[1, 2]"), Err(LayoutError::NotAMapping { .. })));
        assert!(matches!(json("{"), Err(LayoutError::Parse { .. })));
        assert!(matches!(
            json(r#"{"/a#b#c": 1}"#),
            Err(LayoutError::Location { .. })
        ));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(SnapshotFormat::from_path(Path::new("a.yml")), SnapshotFormat::Yaml);
        assert_eq!(SnapshotFormat::from_path(Path::new("a.YAML")), SnapshotFormat::Yaml);
        assert_eq!(SnapshotFormat::from_path(Path::new("a.json")), SnapshotFormat::Json);
    }
}
