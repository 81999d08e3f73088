/// Start of an inline patch preview; nothing from here on is message text.
pub const DIFF_MARKER: &str = "diff --git ";

/// Body of the line `git commit -v` writes above its diff preview.
pub const SCISSORS: &str = "------------------------ >8 ------------------------";

/// Drop comment lines, cut at the diff preview, and strip trailing blanks.
pub fn normalize_lines(raw: &str, comment_char: char) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in raw.lines() {
        if raw_line.starts_with(DIFF_MARKER) || is_scissors(raw_line, comment_char) {
            break;
        }
        if raw_line.starts_with(comment_char) {
            continue;
        }
        lines.push(raw_line.trim_end_matches([' ', '\t']).to_string());
    }
    lines
}

fn is_scissors(line: &str, comment_char: char) -> bool {
    line.strip_prefix(comment_char)
        .and_then(|rest| rest.strip_prefix(' '))
        .is_some_and(|rest| rest.trim_end() == SCISSORS)
}

/// Collapse blank runs and trim blank edges, the way `git stripspace` does.
///
/// The result has no terminal newline; it is the message part of the
/// Change-Id hash input.
pub fn stripspace(lines: &[String]) -> String {
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut pending_blank = false;
    for line in lines {
        let line = line.trim_end();
        if line.is_empty() {
            pending_blank = !kept.is_empty();
            continue;
        }
        if pending_blank {
            kept.push("");
            pending_blank = false;
        }
        kept.push(line);
    }
    kept.join("\n")
}
