//! Footer detection over a normalized line stream.
//!
//! The stream is cut into blocks of non-blank lines separated by blank runs.
//! Each block after the title starts out as a footer candidate and is demoted
//! by the first line that does not look like a trailer. Only the last block
//! can be the footer.
use super::line::{closes_bracket, is_footer_trailer, opens_bracket};

/// A run of non-blank lines and the blank lines that follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    pub lines: Vec<String>,
    pub blanks_after: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Continuation {
    #[default]
    Outside,
    /// Inside a `[key: ...` value that has not been closed yet.
    Open,
    /// The current line closes the bracket; it still counts as inside.
    Closing,
}

/// Result of scanning a whole message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FooterClassification {
    pub segments: Vec<Segment>,
    pub footer_confirmed: bool,
}

impl FooterClassification {
    /// The confirmed footer block, if the last block qualified.
    pub fn footer(&self) -> Option<&Segment> {
        if self.footer_confirmed {
            self.segments.last()
        } else {
            None
        }
    }

    /// Segments that precede the footer (all of them when there is none).
    pub fn body(&self) -> &[Segment] {
        match self.footer() {
            Some(_) => &self.segments[..self.segments.len() - 1],
            None => &self.segments,
        }
    }
}

/// Line-at-a-time footer classifier.
#[derive(Debug, Default)]
pub struct FooterScan {
    segments: Vec<Segment>,
    current: Vec<String>,
    blank_run: usize,
    is_footer: bool,
    continuation: Continuation,
}

impl FooterScan {
    pub fn push(&mut self, line: &str) {
        if line.is_empty() && self.continuation == Continuation::Outside {
            self.blank_run += 1;
            return;
        }

        // A bracket only opens inside a block that was already a footer
        // candidate before this line, so the check precedes the flush.
        if self.is_footer && opens_bracket(line) {
            self.continuation = Continuation::Open;
        }
        if self.continuation == Continuation::Open && closes_bracket(line) {
            self.continuation = Continuation::Closing;
        }

        if self.blank_run > 0 {
            self.flush_block();
        }

        if self.continuation == Continuation::Outside && !is_footer_trailer(line) {
            self.is_footer = false;
        }

        if self.continuation == Continuation::Closing {
            self.continuation = Continuation::Outside;
        }
        self.current.push(line.to_string());
    }

    fn flush_block(&mut self) {
        let lines = std::mem::take(&mut self.current);
        self.segments.push(Segment {
            lines,
            blanks_after: self.blank_run,
        });
        self.blank_run = 0;
        // Leading blank lines produce a line-less segment; the block after
        // them is still the title.
        self.is_footer = self.segments.iter().any(|segment| !segment.lines.is_empty());
    }

    pub fn finish(mut self) -> FooterClassification {
        if !self.current.is_empty() || self.blank_run > 0 {
            let lines = std::mem::take(&mut self.current);
            self.segments.push(Segment {
                lines,
                blanks_after: self.blank_run,
            });
        }
        let footer_confirmed = self.is_footer
            && self
                .segments
                .last()
                .is_some_and(|segment| !segment.lines.is_empty());
        FooterClassification {
            segments: self.segments,
            footer_confirmed,
        }
    }
}

pub fn classify_footer(lines: &[String]) -> FooterClassification {
    let mut scan = FooterScan::default();
    for line in lines {
        scan.push(line);
    }
    scan.finish()
}

#[cfg(test)]
#[path = "footer_tests.rs"]
mod tests;
