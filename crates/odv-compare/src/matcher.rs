//! # Rule Location Matching
//!
//! Rule tables describe repeated structures with one rule: a segment such as
//! `dataset[0-9]+` stands for `dataset1`, `dataset2`, ... A segment is treated
//! as a pattern when it contains a regex metacharacter other than `.`; it must
//! then match the whole observed segment. All other segments compare literally.

use regex::Regex;

use odv_core::Location;

use crate::error::CompareError;

const PATTERN_CHARS: &[char] = &['[', ']', '*', '+', '?', '(', ')', '{', '}', '|', '\\', '^', '$'];

#[derive(Debug, Clone)]
enum SegmentMatcher {
    Literal(String),
    Pattern(Regex),
}

impl SegmentMatcher {
    fn compile(location: &Location, segment: &str) -> Result<Self, CompareError> {
        if !segment.contains(PATTERN_CHARS) {
            return Ok(Self::Literal(segment.to_string()));
        }
        Regex::new(&format!("^(?:{segment})$"))
            .map(Self::Pattern)
            .map_err(|e| CompareError::LocationPattern {
                location: location.clone(),
                segment: segment.to_string(),
                reason: e.to_string(),
            })
    }

    fn matches(&self, candidate: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == candidate,
            Self::Pattern(regex) => regex.is_match(candidate),
        }
    }

    fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// A compiled rule location.
#[derive(Debug, Clone)]
pub struct LocationMatcher {
    location: Location,
    segments: Vec<SegmentMatcher>,
    attribute: Option<SegmentMatcher>,
}

impl LocationMatcher {
    /// Compile the segments of `location`.
    pub fn compile(location: &Location) -> Result<Self, CompareError> {
        let segments = location
            .segments()
            .iter()
            .map(|s| SegmentMatcher::compile(location, s))
            .collect::<Result<Vec<_>, _>>()?;
        let attribute = location
            .attribute_name()
            .map(|name| SegmentMatcher::compile(location, name))
            .transpose()?;
        Ok(Self {
            location: location.clone(),
            segments,
            attribute,
        })
    }

    /// The rule location this matcher was compiled from.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// True when no segment is a pattern, so only an equal location matches.
    pub fn is_literal(&self) -> bool {
        self.segments.iter().all(SegmentMatcher::is_literal)
            && self.attribute.as_ref().map_or(true, SegmentMatcher::is_literal)
    }

    /// Whether `candidate` is described by this rule location.
    pub fn matches(&self, candidate: &Location) -> bool {
        if candidate.segments().len() != self.segments.len() {
            return false;
        }
        let attribute_matches = match (&self.attribute, candidate.attribute_name()) {
            (None, None) => true,
            (Some(matcher), Some(name)) => matcher.matches(name),
            _ => false,
        };
        attribute_matches
            && self
                .segments
                .iter()
                .zip(candidate.segments())
                .all(|(matcher, segment)| matcher.matches(segment))
    }
}
