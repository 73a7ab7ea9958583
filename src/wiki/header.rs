//! Revision header extraction
//!
//! Pulls the short description out of the first template block of a page's
//! wikitext. This is a best-effort heuristic, not a wikitext parser: any
//! content that does not have the expected shape yields an empty description.

use super::types::{WikiRevision, WikiRevisionHeader};

/// Boundary between the leading template block and the article body
const BLOCK_BOUNDARY: &str = "\n\n";

/// Closing braces followed by an escaped (literal backslash-n) newline
const ESCAPED_TEMPLATE_END: &str = r"}}\n";

/// Escaped newline token stripped from both ends of the header segment
const ESCAPED_NEWLINE: &str = r"\n";

/// Closing braces of a template invocation
const TEMPLATE_END: &str = "}}";

impl WikiRevision {
    /// Derive the revision header from the raw content
    pub fn normalize_header(&mut self) {
        self.header = WikiRevisionHeader {
            short_description: extract_short_description(&self.content),
        };
    }
}

/// Extract the short description from raw revision wikitext
///
/// Returns an empty string when there is no blank line, no pipe-delimited
/// field, or the content is empty.
pub fn extract_short_description(content: &str) -> String {
    let Some((header_block, _)) = content.split_once(BLOCK_BOUNDARY) else {
        return String::new();
    };

    // Split-after semantics: the first segment keeps its terminator
    let segment = match header_block.find(ESCAPED_TEMPLATE_END) {
        Some(pos) => &header_block[..pos + ESCAPED_TEMPLATE_END.len()],
        None => header_block,
    };
    let segment = trim_token(segment, ESCAPED_NEWLINE);

    let Some(field) = segment.split('|').nth(1) else {
        return String::new();
    };

    let description = field
        .split_once(TEMPLATE_END)
        .map_or(field, |(before, _)| before);

    description.trim().to_string()
}

/// Strip every leading and trailing occurrence of `token`
fn trim_token<'a>(mut s: &'a str, token: &str) -> &'a str {
    while let Some(rest) = s.strip_prefix(token) {
        s = rest;
    }
    while let Some(rest) = s.strip_suffix(token) {
        s = rest;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_description_template() {
        let content = "{{Short description|A test value}}\n\nMore text";
        assert_eq!(extract_short_description(content), "A test value");
    }

    #[test]
    fn test_no_blank_line() {
        let content = "{{Short description|A test value}}\nMore text";
        assert_eq!(extract_short_description(content), "");
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(extract_short_description(""), "");
    }

    #[test]
    fn test_header_without_pipe() {
        let content = "{{Short description}}\n\nMore text";
        assert_eq!(extract_short_description(content), "");
    }

    #[test]
    fn test_header_without_closing_braces() {
        let content = "{{Short description|Unterminated value\n\nMore text";
        assert_eq!(extract_short_description(content), "Unterminated value");
    }

    #[test]
    fn test_escaped_newline_terminator() {
        let content = r"{{Short description|Escaped value}}\n{{Other|x}}".to_string() + "\n\nBody";
        assert_eq!(extract_short_description(&content), "Escaped value");
    }

    #[test]
    fn test_leading_escaped_newlines_stripped() {
        let content = r"\n\n{{Short description|Value}}".to_string() + "\n\nBody";
        assert_eq!(extract_short_description(&content), "Value");
    }

    #[test]
    fn test_trailing_letter_n_is_not_stripped() {
        // Only the two-character `\n` token is stripped, never a bare `n`
        let content = "{{SD|Iron\n\nBody";
        assert_eq!(extract_short_description(content), "Iron");
        let content = r"{{SD|Iron\n".to_string() + "\n\nBody";
        assert_eq!(extract_short_description(&content), "Iron");
    }

    #[test]
    fn test_only_first_template_considered() {
        let content = "{{Short description|First}}\n{{Infobox|Second}}\n\nBody";
        assert_eq!(extract_short_description(content), "First");
    }

    #[test]
    fn test_extra_pipe_fields_ignored() {
        let content = "{{Short description|Main|noreplace}}\n\nBody";
        assert_eq!(extract_short_description(content), "Main");
    }

    #[test]
    fn test_normalize_header_sets_description() {
        let mut revision = WikiRevision {
            content: "{{Short description|Capital of France}}\n\nParis is...".to_string(),
            header: WikiRevisionHeader::default(),
        };
        revision.normalize_header();
        assert_eq!(revision.header.short_description, "Capital of France");
    }
}
