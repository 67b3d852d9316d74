// platform-switch - core/classify.rs
//
// Line classifier. Splits file content into lines (keeping each line's
// terminator) and tags every line as a marker, a section header, or body.
// Core layer: operates on in-memory strings only.

use crate::core::model::{Line, LineKind, SwitchSyntax};
use regex::Regex;

/// Compiled classification rules for one `SwitchSyntax`.
#[derive(Debug, Clone)]
pub struct Classifier {
    start_marker: String,
    end_marker: String,
    header_re: Regex,
}

impl Classifier {
    /// Build a classifier for the given markers and comment token.
    pub fn new(syntax: &SwitchSyntax) -> Self {
        // Optional indentation, any run of comment tokens and decoration,
        // then `<Label> Configuration`.
        let pattern = format!(
            r"^\s*(?:{})*[\s\-=*#]*([A-Za-z][A-Za-z0-9_]*)\s+Configuration\b",
            regex::escape(&syntax.comment_token)
        );
        // Every user-supplied piece is escaped, so the pattern is always valid.
        let header_re = Regex::new(&pattern).expect("classify: invalid header regex");

        Self {
            start_marker: syntax.start_marker.clone(),
            end_marker: syntax.end_marker.clone(),
            header_re,
        }
    }

    /// Classify a single line of text (no terminator).
    pub fn classify_line<'a>(&self, text: &'a str) -> LineKind<'a> {
        if text.contains(&self.start_marker) {
            return LineKind::MarkerStart;
        }
        if text.contains(&self.end_marker) {
            return LineKind::MarkerEnd;
        }
        if let Some(caps) = self.header_re.captures(text) {
            if let Some(label) = caps.get(1) {
                return LineKind::SectionHeader {
                    label: label.as_str(),
                };
            }
        }
        LineKind::Body
    }

    /// Classify every line of `content`.
    ///
    /// Concatenating `text + terminator` over the result reproduces
    /// `content` exactly.
    pub fn classify<'a>(&self, content: &'a str) -> Vec<Line<'a>> {
        split_lines(content)
            .enumerate()
            .map(|(idx, (text, terminator))| Line {
                number: idx + 1,
                text,
                terminator,
                kind: self.classify_line(text),
            })
            .collect()
    }
}

/// Split content into `(text, terminator)` pairs, recognising `\n` and
/// `\r\n`. A final line without a newline gets an empty terminator.
pub fn split_lines(content: &str) -> impl Iterator<Item = (&str, &str)> {
    content.split_inclusive('\n').map(|raw| {
        if let Some(text) = raw.strip_suffix("\r\n") {
            (text, &raw[text.len()..])
        } else if let Some(text) = raw.strip_suffix('\n') {
            (text, &raw[text.len()..])
        } else {
            (raw, "")
        }
    })
}
