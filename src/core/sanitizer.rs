// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/sanitizer.rs
//!
//! Line-ending detection, comment stripping and multi-line folding
//!
//! The scanner is line oriented, so multi-line text values (labels,
//! tooltips) are folded into a single logical line before scanning. Each
//! logical line keeps its physical segments so the file can be written back
//! with its real line breaks after naming injection.

use regex::Regex;
use std::ops::Range;

/// Literal two-character marker joining folded physical lines
pub const FOLD_MARKER: &str = "\\n";

/// Line terminator style of a layout file
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineEnding {
    #[default]
    Lf,
    Cr,
    CrLf,
}

impl LineEnding {
    /// Detects the terminator, checking CRLF before lone CR
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.windows(2).any(|w| w == b"\r\n") {
            LineEnding::CrLf
        } else if bytes.contains(&b'\r') {
            LineEnding::Cr
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// One logical line made of one or more physical segments
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SourceLine {
    segments: Vec<String>,
    text: String,
}

impl SourceLine {
    pub fn new(text: &str) -> Self {
        Self {
            segments: vec![text.to_string()],
            text: text.to_string(),
        }
    }

    /// Logical text, folded segments joined by `FOLD_MARKER`
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of physical lines folded into this one
    pub fn physical_len(&self) -> usize {
        self.segments.len()
    }

    /// Leading whitespace of the first segment
    pub fn indent(&self) -> &str {
        let first = self.segments.first().map(String::as_str).unwrap_or("");
        let trimmed = first.trim_start();
        &first[..first.len() - trimmed.len()]
    }

    /// Appends a continuation line, keeping its own segments
    fn fold(&mut self, continuation: SourceLine) {
        self.segments.extend(continuation.segments);
        self.rebuild();
    }

    /// Replaces a byte range of the logical text
    ///
    /// Offsets falling inside a fold marker are clamped to the segment
    /// boundary before it.
    pub fn replace_range(&mut self, range: Range<usize>, replacement: &str) {
        let (first, start) = self.locate(range.start);
        let (last, end) = self.locate(range.end.max(range.start));

        let tail = self.segments[last][end..].to_string();
        let head = &mut self.segments[first];
        head.truncate(start);
        head.push_str(replacement);
        head.push_str(&tail);
        self.segments.drain(first + 1..=last);
        self.rebuild();
    }

    /// Renders the physical lines joined by `eol`
    pub fn to_physical(&self, eol: &str) -> String {
        self.segments.join(eol)
    }

    fn locate(&self, offset: usize) -> (usize, usize) {
        let mut base = 0;
        for (idx, segment) in self.segments.iter().enumerate() {
            let end = base + segment.len();
            if offset <= end || idx + 1 == self.segments.len() {
                return (idx, offset.saturating_sub(base).min(segment.len()));
            }
            base = end + FOLD_MARKER.len();
            if offset < base {
                return (idx, segment.len());
            }
        }
        (0, 0)
    }

    fn rebuild(&mut self) {
        self.text = self.segments.join(FOLD_MARKER);
    }
}

/// Output of the sanitizer
#[derive(Debug, Default)]
pub struct Sanitized {
    pub lines: Vec<SourceLine>,
    pub comments: Vec<String>,
}

/// Strips comments and folds continuation lines
pub struct Sanitizer {
    comment: Regex,
}

impl Sanitizer {
    pub fn new() -> Self {
        Self {
            comment: Regex::new(r"(?s)<!--.*?-->").expect("comment pattern should be valid regex"),
        }
    }

    /// Runs the whole sanitizing pass over decoded file content
    pub fn sanitize(&self, content: &str, eol: LineEnding) -> Sanitized {
        let (stripped, comments) = self.strip_comments(content);
        Sanitized {
            lines: fold_lines(&stripped, eol),
            comments,
        }
    }

    /// Removes every `<!-- ... -->` block, returning the text and the comments
    pub fn strip_comments(&self, content: &str) -> (String, Vec<String>) {
        let comments = self
            .comment
            .find_iter(content)
            .map(|m| m.as_str().to_string())
            .collect();
        let stripped = self.comment.replace_all(content, "").into_owned();
        (stripped, comments)
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits on `eol` and folds continuation lines into their predecessor
///
/// Walks backward so that removing a folded line never shifts a line
/// that is still to be examined.
pub fn fold_lines(content: &str, eol: LineEnding) -> Vec<SourceLine> {
    let mut lines: Vec<SourceLine> = content.split(eol.as_str()).map(SourceLine::new).collect();

    for idx in (1..lines.len()).rev() {
        if is_continuation(lines[idx].text()) {
            let continuation = lines.remove(idx);
            lines[idx - 1].fold(continuation);
        }
    }

    lines
}

/// True for a non-empty line that does not open a tag, or that starts
/// with a closing `</property>` tag (whitespace ignored)
pub fn is_continuation(line: &str) -> bool {
    if line.is_empty() {
        return false;
    }
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    !compact.starts_with('<') || compact.starts_with("</property>")
}
