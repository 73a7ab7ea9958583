//! Query string parsing
//!
//! Strict `application/x-www-form-urlencoded` parsing: malformed percent
//! escapes, escapes decoding to invalid UTF-8 and `;` separators are
//! rejected instead of being passed through or replaced.

use crate::error::QueryError;

/// Decoded query parameters in their original order
#[derive(Debug, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a raw query string (without leading `?`)
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        for segment in raw.split('&') {
            if segment.contains(';') {
                return Err(QueryError::Semicolon);
            }
            validate_escapes(segment)?;
        }

        let pairs = url::form_urlencoded::parse(raw.as_bytes())
            .into_owned()
            .collect();
        Ok(Self { pairs })
    }

    /// First value for `key`, if any
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Every `%` must be followed by two hex digits and the decoded bytes must
/// be valid UTF-8
fn validate_escapes(segment: &str) -> Result<(), QueryError> {
    let bytes = segment.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = segment.get(i + 1..i + 3).filter(|h| h.bytes().all(|b| b.is_ascii_hexdigit()));
            let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) else {
                let end = segment.len().min(i + 3);
                let escape = segment.get(i..end).unwrap_or(&segment[i..]);
                return Err(QueryError::MalformedEscape(escape.to_string()));
            };
            decoded.push(byte);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    if std::str::from_utf8(&decoded).is_err() {
        return Err(QueryError::InvalidUtf8);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let params = QueryParams::parse("name=test").unwrap();
        assert_eq!(params.get("name"), Some("test"));
        assert_eq!(params.get("other"), None);
    }

    #[test]
    fn test_decode_plus_and_percent() {
        let params = QueryParams::parse("name=albert+einstein&x=caf%C3%A9").unwrap();
        assert_eq!(params.get("name"), Some("albert einstein"));
        assert_eq!(params.get("x"), Some("café"));
    }

    #[test]
    fn test_first_value_wins() {
        let params = QueryParams::parse("name=first&name=second").unwrap();
        assert_eq!(params.get("name"), Some("first"));
    }

    #[test]
    fn test_empty_query() {
        let params = QueryParams::parse("").unwrap();
        assert_eq!(params.get("name"), None);
    }

    #[test]
    fn test_key_without_value() {
        let params = QueryParams::parse("name").unwrap();
        assert_eq!(params.get("name"), Some(""));
    }

    #[test]
    fn test_malformed_escape() {
        assert_eq!(
            QueryParams::parse("name=%zz").unwrap_err(),
            QueryError::MalformedEscape("%zz".to_string())
        );
        assert_eq!(
            QueryParams::parse("name=abc%4").unwrap_err(),
            QueryError::MalformedEscape("%4".to_string())
        );
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        assert_eq!(
            QueryParams::parse("name=%FF").unwrap_err(),
            QueryError::InvalidUtf8
        );
        // A truncated multi-byte sequence is rejected too
        assert_eq!(
            QueryParams::parse("name=caf%C3").unwrap_err(),
            QueryError::InvalidUtf8
        );
    }

    #[test]
    fn test_semicolon_rejected() {
        assert_eq!(
            QueryParams::parse("name=a;b=c").unwrap_err(),
            QueryError::Semicolon
        );
    }
}
