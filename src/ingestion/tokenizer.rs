//! Quote-aware row tokenization.
//!
//! Table rows are split on commas. A field wrapped in double quotes may contain commas: its
//! segments are rejoined with `", "` and the enclosing quotes dropped. Quotes cannot be escaped
//! inside a quoted field.

use thiserror::Error;

/// A quoted field was opened but the line ended before the closing quote.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unterminated quoted field starting at column {column}")]
pub struct UnterminatedQuote {
    /// 0-based index of the logical field that opened the quote.
    pub column: usize,
}

/// Split one line (without its line terminator) into logical fields.
///
/// ```rust
/// use planetary_wkt::ingestion::tokenizer::tokenize;
///
/// let fields = tokenize(r#"IAU,2015,49900,"Mars 2000, planetodetic",49900"#).unwrap();
/// assert_eq!(fields, vec!["IAU", "2015", "49900", "Mars 2000, planetodetic", "49900"]);
/// ```
pub fn tokenize(line: &str) -> Result<Vec<String>, UnterminatedQuote> {
    merge_quoted(line.split(','))
}

/// Merge comma-split segments back into logical fields.
///
/// Segments are trimmed. This is the second half of [`tokenize`], exposed separately so that a
/// reader which already split the record (the CSV reader with quoting disabled) can reuse it.
pub fn merge_quoted<'a, I>(segments: I) -> Result<Vec<String>, UnterminatedQuote>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut fields = Vec::new();
    let mut open: Option<String> = None;
    for segment in segments {
        let segment = segment.trim();
        match open.as_mut() {
            Some(buffer) => {
                buffer.push_str(", ");
                match segment.strip_suffix('"') {
                    Some(last) => {
                        buffer.push_str(last);
                        fields.extend(open.take());
                    }
                    None => buffer.push_str(segment),
                }
            }
            None => match segment.strip_prefix('"') {
                Some(rest) => match rest.strip_suffix('"') {
                    Some(inner) => fields.push(inner.to_owned()),
                    None => open = Some(rest.to_owned()),
                },
                None => fields.push(segment.to_owned()),
            },
        }
    }
    match open {
        Some(_) => Err(UnterminatedQuote {
            column: fields.len(),
        }),
        None => Ok(fields),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_are_trimmed() {
        assert_eq!(tokenize(" a , b,c ").unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn quoted_field_keeps_its_commas() {
        let fields = tokenize(r#"x,y,"a, b",z"#).unwrap();
        assert_eq!(fields, vec!["x", "y", "a, b", "z"]);
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn quoted_field_segments_are_rejoined_with_comma_space() {
        assert_eq!(tokenize(r#""a,b,c""#).unwrap(), vec!["a, b, c"]);
    }

    #[test]
    fn quoted_field_without_comma_loses_its_quotes() {
        assert_eq!(
            tokenize(r#"IAU,2015,6500,"Mars 2000",3396190,,,169.8944"#).unwrap(),
            vec!["IAU", "2015", "6500", "Mars 2000", "3396190", "", "", "169.8944"]
        );
    }

    #[test]
    fn quoted_field_may_end_the_line() {
        assert_eq!(tokenize(r#"a,"b, c""#).unwrap(), vec!["a", "b, c"]);
    }

    #[test]
    fn empty_fields_are_preserved() {
        assert_eq!(tokenize("a,,").unwrap(), vec!["a", "", ""]);
        assert_eq!(tokenize(r#""""#).unwrap(), vec![""]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert_eq!(
            tokenize(r#"a,b,"c, d"#).unwrap_err(),
            UnterminatedQuote { column: 2 }
        );
        assert_eq!(tokenize("\"").unwrap_err(), UnterminatedQuote { column: 0 });
    }
}
