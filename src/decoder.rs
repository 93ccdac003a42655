//! Narrow extraction of the two fields a resource body carries.
//!
//! This is a scan, not a parser: it looks for the first `"message"` string and
//! the first `"successors"` string array anywhere in the body and ignores
//! everything else. Anything it cannot make sense of becomes a missing field.

use std::sync::OnceLock;
use regex::Regex;
use crate::runtime::node::Node;

static MESSAGE_PATTERN: OnceLock<Regex> = OnceLock::new();
static SUCCESSORS_PATTERN: OnceLock<Regex> = OnceLock::new();
static STRING_PATTERN: OnceLock<Regex> = OnceLock::new();

// A quoted string body: anything but a bare quote, with backslash escapes kept intact.
const QUOTED: &str = r#"(?:[^"\\]|\\.)*"#;

fn message_pattern() -> &'static Regex {
    MESSAGE_PATTERN.get_or_init(|| {
        Regex::new(&format!(r#"(?s)"message"\s*:\s*"({QUOTED})""#)).expect("valid message pattern")
    })
}

fn successors_pattern() -> &'static Regex {
    SUCCESSORS_PATTERN.get_or_init(|| {
        // `]` inside a quoted element does not close the array
        Regex::new(&format!(r#"(?s)"successors"\s*:\s*\[((?:[^"\]]|"{QUOTED}")*)\]"#))
            .expect("valid successors pattern")
    })
}

fn string_pattern() -> &'static Regex {
    STRING_PATTERN.get_or_init(|| {
        Regex::new(&format!(r#"(?s)"({QUOTED})""#)).expect("valid string pattern")
    })
}

/// Decodes a response body into a [`Node`]. Never fails.
pub fn decode(body: &str) -> Node {
    let message = message_pattern()
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| unescape(m.as_str()));

    let successors = successors_pattern()
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|array| {
            string_pattern()
                .captures_iter(array.as_str())
                .filter_map(|caps| caps.get(1))
                .map(|m| unescape(m.as_str()))
                .collect()
        })
        .unwrap_or_default();

    Node::new(message, successors)
}

/// Resolves `\"` and `\\`. Every other escape sequence is left as written.
pub fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('\\', Some(&next)) if next == '"' || next == '\\' => {
                out.push(next);
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}
