//! # Source Identifiers
//!
//! `/what#source` holds a comma-separated list of `TAG:value` tokens naming
//! the radar, e.g. `WMO:11812,NOD:skjav`. Known tags are `WIGOS`, `WMO`,
//! `RAD`, `PLC`, `NOD`, `ORG`, `CTY` and `CMT`. Some vendors write a space
//! after each comma; patterns in standard tables are authored without it.

/// Remove exactly one space following each comma.
pub fn normalize_source_identifier(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_comma = false;
    for c in text.chars() {
        if after_comma && c == ' ' {
            after_comma = false;
            continue;
        }
        after_comma = c == ',';
        out.push(c);
    }
    out
}

/// Check that every token of a normalized identifier is `TAG:value`.
///
/// A `WMO` value must be a 5- or 7-digit station number. Returns a
/// description of the first malformed token.
pub fn check_tokens(normalized: &str) -> Result<(), String> {
    for token in normalized.split(',') {
        let Some((tag, value)) = token.split_once(':') else {
            return Err(format!("token {token:?} is not of the form TAG:value"));
        };
        if tag.trim().is_empty() || value.trim().is_empty() {
            return Err(format!("token {token:?} has an empty tag or value"));
        }
        if tag.trim() == "WMO" {
            let digits = value.trim();
            let numeric = digits.chars().all(|c| c.is_ascii_digit());
            if !numeric || !matches!(digits.len(), 5 | 7) {
                return Err(format!(
                    "token {token:?} must carry a 5 or 7 digit WMO station number"
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_one_space_after_commas() {
        assert_eq!(
            normalize_source_identifier("ORG:215, CTY:644, CMT:MeteoSwiss (Switzerland)"),
            "ORG:215,CTY:644,CMT:MeteoSwiss (Switzerland)"
        );
        assert_eq!(normalize_source_identifier("A:1,  B:2"), "A:1, B:2");
        assert_eq!(normalize_source_identifier("WMO:11812,NOD:skjav"), "WMO:11812,NOD:skjav");
        assert_eq!(normalize_source_identifier("CMT:a b"), "CMT:a b");
    }

    #[test]
    fn accepts_well_formed_tokens() {
        for source in [
            "WMO:11812,NOD:skjav",
            "WMO:0011812",
            "WIGOS:0-380-1-1",
            "CMT:Suomi tutka",
            "ORG:215,CTY:644,CMT:MeteoSwiss (Switzerland)",
        ] {
            assert!(check_tokens(source).is_ok(), "{source}");
        }
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(check_tokens("WMO:foobar").is_err());
        assert!(check_tokens("WMO:1234").is_err());
        assert!(check_tokens("NOD:skjav,").is_err());
        assert!(check_tokens("skjav").is_err());
        assert!(check_tokens(":skjav").is_err());
    }
}
