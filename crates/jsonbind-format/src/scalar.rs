//! String escaping for JSON output.

use std::borrow::Cow;

/// Escape a string for quoted output.
///
/// Returns the escaped content (without surrounding quotes). Backslash and
/// quote are escaped, `\b \t \n \f \r` use their short forms, other control
/// characters below U+0020 become `\u00XX`. Forward slash is left as is.
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !s.chars().any(needs_escape) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\u{8}' => result.push_str("\\b"),
            '\t' => result.push_str("\\t"),
            '\n' => result.push_str("\\n"),
            '\u{c}' => result.push_str("\\f"),
            '\r' => result.push_str("\\r"),
            c if c < '\u{20}' => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    Cow::Owned(result)
}

fn needs_escape(c: char) -> bool {
    c == '"' || c == '\\' || c < '\u{20}'
}
