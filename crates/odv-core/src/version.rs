//! # Standard Versions
//!
//! ODIM_H5 files declare their information-model revision twice: in the root
//! `Conventions` attribute (`"ODIM_H5/V2_1"`) and in `/what#version`
//! (`"H5rad 2.1"`). Rule tables are named after the same revision
//! (`ODIM_H5_V2_1_PVOL.csv`). `StandardVersion` is the common parsed form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::VersionError;

/// A `major.minor` revision of the ODIM_H5 standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StandardVersion {
    /// Major revision.
    pub major: u32,
    /// Minor revision.
    pub minor: u32,
}

impl StandardVersion {
    /// Create a version from its components.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// The tag used in table file names and `Conventions`: `V2_1`.
    pub fn tag(&self) -> String {
        format!("V{}_{}", self.major, self.minor)
    }
}

impl fmt::Display for StandardVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for StandardVersion {
    type Err = VersionError;

    /// Accepts `2.1`, `2_1`, `V2_1`, `v2.1`, `H5rad 2.1` and `ODIM_H5/V2_1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || VersionError {
            input: s.to_string(),
        };

        let last_word = s
            .trim()
            .rsplit(|c: char| c == '/' || c.is_whitespace())
            .next()
            .ok_or_else(err)?;
        let digits = last_word
            .strip_prefix(['V', 'v'])
            .unwrap_or(last_word);

        let (major, minor) = digits.split_once(['.', '_']).ok_or_else(err)?;
        let major = major.parse::<u32>().map_err(|_| err())?;
        let minor = minor.parse::<u32>().map_err(|_| err())?;
        Ok(Self { major, minor })
    }
}

impl Serialize for StandardVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StandardVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_spellings() {
        let expected = StandardVersion::new(2, 1);
        for input in ["2.1", "2_1", "V2_1", "v2.1", "H5rad 2.1", "ODIM_H5/V2_1", " 2.1 "] {
            assert_eq!(input.parse::<StandardVersion>().unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in ["", "2", "H5rad", "V2_x", "ODIM_H5/", "2.1.3"] {
            assert!(input.parse::<StandardVersion>().is_err(), "{input}");
        }
    }

    #[test]
    fn tag_and_display() {
        let v = StandardVersion::new(2, 4);
        assert_eq!(v.tag(), "V2_4");
        assert_eq!(v.to_string(), "2.4");
    }

    #[test]
    fn versions_order_numerically() {
        assert!(StandardVersion::new(2, 10) > StandardVersion::new(2, 4));
    }
}
