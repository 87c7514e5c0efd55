//! # Hierarchical Locations
//!
//! A `Location` identifies one node of an ODIM_H5 layout: a group, a dataset,
//! or an attribute attached to one of them. It is stored as an ordered list of
//! path segments plus an optional attribute name, so that locations built by
//! independent loaders compare structurally rather than by string spelling.
//!
//! ## Text Forms
//!
//! | Text | Segments | Attribute |
//! |------|----------|-----------|
//! | `/what#source` | `[what]` | `source` |
//! | `/#Conventions`, `#Conventions` | `[]` | `Conventions` |
//! | `/dataset1/data1` | `[dataset1, data1]` | — |
//! | `/` | `[]` | — |
//!
//! Empty segments and surrounding whitespace are dropped, so `//what/ ` and
//! `/what` are the same location.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LocationError;

/// Separator between the container path and the attribute name.
pub const ATTRIBUTE_SEPARATOR: char = '#';

/// A normalized location in an ODIM_H5 layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    segments: Vec<String>,
    attribute: Option<String>,
}

impl Location {
    /// The root group.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
            attribute: None,
        }
    }

    /// A group or dataset location built from path segments.
    pub fn container<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            segments: normalize_segments(segments),
            attribute: None,
        }
    }

    /// An attribute attached to the container at `segments`.
    pub fn attribute<I, S>(segments: I, name: impl AsRef<str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            segments: normalize_segments(segments),
            attribute: Some(name.as_ref().trim().to_string()),
        }
    }

    /// Parse a location where `#` separates the attribute name.
    ///
    /// Text without `#` names a group or dataset.
    pub fn parse(input: &str) -> Result<Self, LocationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LocationError::Empty);
        }

        let mut parts = trimmed.split(ATTRIBUTE_SEPARATOR);
        let path = parts.next().unwrap_or_default();
        let attribute = parts.next();
        if parts.next().is_some() {
            return Err(LocationError::MultipleAttributeSeparators {
                input: input.to_string(),
            });
        }

        let segments = normalize_segments(path.split('/'));
        match attribute {
            None => Ok(Self {
                segments,
                attribute: None,
            }),
            Some(name) if name.trim().is_empty() => Err(LocationError::EmptyAttribute {
                input: input.to_string(),
            }),
            Some(name) => Ok(Self {
                segments,
                attribute: Some(name.trim().to_string()),
            }),
        }
    }

    /// Parse a location known to name an attribute.
    ///
    /// Honors `#` when present; otherwise the last `/` segment is the
    /// attribute name (`/what/source` is `/what#source`).
    pub fn parse_attribute_path(input: &str) -> Result<Self, LocationError> {
        if input.contains(ATTRIBUTE_SEPARATOR) {
            return Self::parse(input);
        }
        let mut location = Self::parse(input)?;
        match location.segments.pop() {
            Some(name) => {
                location.attribute = Some(name);
                Ok(location)
            }
            None => Err(LocationError::NoAttributeSegment {
                input: input.to_string(),
            }),
        }
    }

    /// Group/dataset path segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The attribute name, if this location names an attribute.
    pub fn attribute_name(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// True when this location names an attribute rather than a container.
    pub fn is_attribute(&self) -> bool {
        self.attribute.is_some()
    }

    /// The innermost container segment, if any (`what` for `/what#source`).
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The container this location belongs to; itself for containers.
    pub fn container_location(&self) -> Location {
        Self {
            segments: self.segments.clone(),
            attribute: None,
        }
    }
}

fn normalize_segments<I, S>(segments: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .flat_map(|s| {
            s.as_ref()
                .split('/')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            f.write_str("/")?;
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        if let Some(name) = &self.attribute {
            write!(f, "{ATTRIBUTE_SEPARATOR}{name}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9]{0,8}"
    }

    proptest! {
        /// Extra slashes and padding never change the parsed location.
        #[test]
        fn normalization_ignores_empty_segments(
            segments in prop::collection::vec(segment(), 0..5),
            attribute in segment(),
        ) {
            let clean = format!("/{}#{}", segments.join("/"), attribute);
            let noisy = format!("  //{}//#{} ", segments.join("///"), attribute);
            prop_assert_eq!(Location::parse(&clean).unwrap(), Location::parse(&noisy).unwrap());
        }

        /// The display form parses back to the same location.
        #[test]
        fn display_form_is_parseable(
            segments in prop::collection::vec(segment(), 1..5),
            attribute in proptest::option::of(segment()),
        ) {
            let location = match &attribute {
                Some(name) => Location::attribute(&segments, name),
                None => Location::container(&segments),
            };
            prop_assert_eq!(Location::parse(&location.to_string()).unwrap(), location);
        }
    }
}
