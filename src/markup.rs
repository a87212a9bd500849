//! Text escaping for the transport's `MarkdownV2` markup dialect.
//!
//! Identity headers embed user-controlled display names; these helpers keep
//! the escaping rules identical between the router and its tests.

/// Characters that carry meaning in `MarkdownV2` and must be escaped.
pub const MARKDOWN_V2_SPECIAL: [char; 18] = [
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes a value for literal inclusion in a `MarkdownV2` message.
///
/// Every character in [`MARKDOWN_V2_SPECIAL`] is prefixed with a backslash;
/// all other characters pass through unchanged.
#[must_use]
pub fn escape_markdown_v2(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() * 2);
    for ch in value.chars() {
        if MARKDOWN_V2_SPECIAL.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{MARKDOWN_V2_SPECIAL, escape_markdown_v2};

    #[test]
    fn escape_handles_empty_string() {
        assert_eq!(escape_markdown_v2(""), "");
    }

    #[test]
    fn escape_preserves_plain_text() {
        assert_eq!(escape_markdown_v2("Ada Lovelace"), "Ada Lovelace");
    }

    #[test]
    fn escape_prefixes_every_special_character() {
        let input: String = MARKDOWN_V2_SPECIAL.iter().collect();
        let escaped = escape_markdown_v2(&input);
        assert_eq!(escaped.len(), input.len() * 2);
        assert_eq!(escaped, r"\_\*\[\]\(\)\~\`\>\#\+\-\=\|\{\}\.\!");
    }

    #[test]
    fn escape_handles_negative_numeric_ids() {
        assert_eq!(escape_markdown_v2("-1001234"), r"\-1001234");
    }

    #[test]
    fn escape_preserves_unicode() {
        assert_eq!(escape_markdown_v2("éß漢 (dev)"), r"éß漢 \(dev\)");
    }

    #[test]
    fn escape_leaves_backslash_alone() {
        assert_eq!(escape_markdown_v2(r"a\b"), r"a\b");
    }
}
