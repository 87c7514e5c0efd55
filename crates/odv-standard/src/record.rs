//! Semicolon-separated record splitting.

pub(crate) const FIELD_SEPARATOR: char = ';';
const QUOTE: char = '"';

/// Split one line into trimmed fields.
///
/// A field that starts with `"` runs to the matching closing quote; `""`
/// inside it is a literal quote. Separators inside quotes are data.
pub(crate) fn split_record(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut rest = line;

    loop {
        let trimmed = rest.trim_start_matches([' ', '\t']);
        let (field, remainder) = match trimmed.strip_prefix(QUOTE) {
            Some(quoted) => {
                let (field, after) = take_quoted(quoted)?;
                let after = after.trim_start_matches([' ', '\t']);
                match after.chars().next() {
                    None => (field, None),
                    Some(FIELD_SEPARATOR) => (field, Some(&after[1..])),
                    Some(c) => return Err(format!("unexpected {c:?} after quoted field")),
                }
            }
            None => match trimmed.split_once(FIELD_SEPARATOR) {
                Some((field, after)) => (field.trim().to_string(), Some(after)),
                None => (trimmed.trim().to_string(), None),
            },
        };

        fields.push(field);
        match remainder {
            Some(after) => rest = after,
            None => return Ok(fields),
        }
    }
}

/// Read a quoted field body up to its closing quote; returns the unescaped
/// field and the text after the quote.
fn take_quoted(input: &str) -> Result<(String, &str), String> {
    let mut field = String::new();
    let mut chars = input.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != QUOTE {
            field.push(c);
        } else if let Some(&(_, QUOTE)) = chars.peek() {
            chars.next();
            field.push(QUOTE);
        } else {
            return Ok((field, &input[i + 1..]));
        }
    }
    Err("unterminated quoted field".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_fields() {
        assert_eq!(
            split_record("/what/source; attribute ;string;TRUE;.*NOD:.*").unwrap(),
            vec!["/what/source", "attribute", "string", "TRUE", ".*NOD:.*"]
        );
    }

    #[test]
    fn keeps_empty_fields() {
        assert_eq!(split_record("a;;c;").unwrap(), vec!["a", "", "c", ""]);
    }

    #[test]
    fn quoted_fields_may_hold_separators_and_quotes() {
        assert_eq!(
            split_record(r#""/how#x";"a;b";"say ""hi""""#).unwrap(),
            vec!["/how#x", "a;b", r#"say "hi""#]
        );
        assert_eq!(split_record(r#""x";y"#).unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn rejects_unterminated_quote() {
        assert!(split_record(r#"a;"b;c"#).is_err());
    }

    #[test]
    fn rejects_text_after_closing_quote() {
        assert!(split_record(r#""a"b;c"#).is_err());
    }
}
