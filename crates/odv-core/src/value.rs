//! # Attribute Values
//!
//! The observed value of an ODIM_H5 attribute. HDF5 attributes in ODIM files
//! are fixed-length strings, scalar integers/doubles, or one-dimensional
//! numeric arrays ("simple arrays"); integers are widened to `f64`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The observed value of one attribute.
///
/// Immutable once constructed; owned by the [`ObservedNode`](crate::ObservedNode)
/// holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A string attribute.
    Text(String),
    /// A scalar numeric attribute.
    Number(f64),
    /// An ordered numeric array attribute.
    NumberSequence(Vec<f64>),
}

impl AttributeValue {
    /// The shape of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Number(_) => ValueKind::Number,
            Self::NumberSequence(_) => ValueKind::NumberSequence,
        }
    }

    /// Borrow the text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The scalar, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::NumberSequence(items) => {
                f.write_str("[")?;
                for (i, n) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{n}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Vec<f64>> for AttributeValue {
    fn from(items: Vec<f64>) -> Self {
        Self::NumberSequence(items)
    }
}

/// The shape of an [`AttributeValue`], also used by rules to declare the
/// kind of value they expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// String attribute.
    Text,
    /// Scalar integer or real attribute.
    Number,
    /// Numeric array attribute.
    NumberSequence,
}

impl ValueKind {
    /// Returns the snake_case identifier of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::NumberSequence => "number_sequence",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = String;

    /// Parse the type names used in ODIM_H5 standard tables.
    ///
    /// Accepts `string`, the scalar numeric names (`real`, `double`, `float`,
    /// `integer`, `int`, `long`), and the array names (`sequence`, `array`,
    /// `real array`, `simple array`), case-insensitively. Also accepts the
    /// identifiers produced by [`ValueKind::as_str()`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "string" | "text" => Ok(Self::Text),
            "real" | "double" | "float" | "integer" | "int" | "long" | "number" => {
                Ok(Self::Number)
            }
            "sequence" | "array" | "real array" | "simple array" | "number_sequence" => {
                Ok(Self::NumberSequence)
            }
            other => Err(format!("unknown value type: {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_variant() {
        assert_eq!(AttributeValue::from("PVOL").kind(), ValueKind::Text);
        assert_eq!(AttributeValue::from(0.5).kind(), ValueKind::Number);
        assert_eq!(
            AttributeValue::from(vec![0.5, 1.5]).kind(),
            ValueKind::NumberSequence
        );
    }

    #[test]
    fn display_sequence() {
        let v = AttributeValue::from(vec![1.0, 2.5]);
        assert_eq!(v.to_string(), "[1, 2.5]");
        assert_eq!(AttributeValue::from("abc").to_string(), "\"abc\"");
    }

    #[test]
    fn parse_table_type_names() {
        assert_eq!("string".parse::<ValueKind>().unwrap(), ValueKind::Text);
        assert_eq!("Real".parse::<ValueKind>().unwrap(), ValueKind::Number);
        assert_eq!("long".parse::<ValueKind>().unwrap(), ValueKind::Number);
        assert_eq!(
            "simple array".parse::<ValueKind>().unwrap(),
            ValueKind::NumberSequence
        );
        assert!("complex".parse::<ValueKind>().is_err());
    }

    #[test]
    fn untagged_deserialization() {
        let text: AttributeValue = serde_json::from_str("\"SCAN\"").unwrap();
        assert_eq!(text, AttributeValue::Text("SCAN".into()));

        let int: AttributeValue = serde_json::from_str("3").unwrap();
        assert_eq!(int, AttributeValue::Number(3.0));

        let seq: AttributeValue = serde_json::from_str("[0.5, 1]").unwrap();
        assert_eq!(seq, AttributeValue::NumberSequence(vec![0.5, 1.0]));
    }
}
