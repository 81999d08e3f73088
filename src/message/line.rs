//! Line predicates shared by the footer and tag passes.
//!
//! The footer pass accepts `[key:` openers and rejects URL schemes; the tag
//! pass accepts any `key:` prefix. Keep the two predicates separate.
use regex::Regex;
use std::sync::OnceLock;

fn footer_trailer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[?[a-zA-Z0-9-]+:").expect("valid footer trailer regex"))
}

fn url_scheme_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9-]+://").expect("valid url scheme regex"))
}

fn bracket_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[[a-zA-Z0-9-]+:").expect("valid bracket regex"))
}

fn trailer_key_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([a-zA-Z0-9-]+):").expect("valid trailer key regex"))
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(ping-)?bug:[ \t]*([0-9]{4,}.*)$").expect("valid issue reference regex")
    })
}

/// Footer pass: `key: value` or `[key: value`, but not `scheme://`.
pub(super) fn is_footer_trailer(line: &str) -> bool {
    footer_trailer_re().is_match(line) && !url_scheme_re().is_match(line)
}

/// Opening line of a bracketed multi-line trailer value.
pub(super) fn opens_bracket(line: &str) -> bool {
    bracket_open_re().is_match(line)
}

pub(super) fn closes_bracket(line: &str) -> bool {
    line.ends_with(']')
}

/// Key of a `key: value` line, if the line has that shape.
pub(super) fn trailer_key(line: &str) -> Option<&str> {
    trailer_key_re()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|key| key.as_str())
}

/// Tag pass: any line starting with `key:`.
pub(super) fn looks_like_trailer_key(line: &str) -> bool {
    trailer_key_re().is_match(line)
}

/// `Bug:` / `Ping-Bug:` reference followed by at least four digits.
pub(super) fn is_issue_reference(line: &str) -> bool {
    tag_re().is_match(line)
}

/// Canonical key casing and a single space after the colon.
pub(super) fn canonical_issue_reference(line: &str) -> String {
    let Some(caps) = tag_re().captures(line) else {
        return line.to_string();
    };
    let key = if caps.get(1).is_some() {
        "Ping-Bug"
    } else {
        "Bug"
    };
    let value = caps.get(2).map(|value| value.as_str()).unwrap_or_default();
    format!("{key}: {value}")
}
