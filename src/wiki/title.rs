//! Page title normalization
//!
//! The API capitalizes only the first letter of a title, so every word is
//! capitalized here before the query is built.

/// Uppercase the first letter of every word
///
/// Word boundaries are approximate and NOT Unicode word-boundary correct:
/// ASCII letters, digits and `_` continue a word, any other ASCII character
/// ends it; outside ASCII, letters and digits continue a word and only
/// whitespace ends it. Characters other than word starts are left untouched:
/// `"iPhone"` becomes `"IPhone"` and `"NASA"` is not lowercased.
pub fn normalize_title(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev = ' ';
    for c in name.chars() {
        if is_separator(prev) {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev = c;
    }
    out
}

/// Query-escape a normalized title (space becomes `+`)
pub fn escape_title(title: &str) -> String {
    url::form_urlencoded::byte_serialize(title.as_bytes()).collect()
}

fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    if c.is_alphabetic() || c.is_numeric() {
        return false;
    }
    c.is_whitespace()
}
