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

//! src/core/parser.rs
//!
//! Glade layout file parser
//!
//! This module turns the raw bytes of a layout file into a `Document`.
//! It handles:
//! - Line terminator detection (CRLF, CR, LF)
//! - Format validation (a toolkit `<requires>` declaration is mandatory)
//! - Comment stripping and multi-line text folding
//! - Object, property, signal and packing extraction
//! - The optional CSS naming pass
//!
//! # Architecture
//! Two passes over an in-memory line array:
//! 1. Sanitize: strip comments, fold continuation lines
//! 2. Scan: tokenize each line and walk the tokens with an explicit cursor
//!
//! When naming edits the source, the scan runs once more so every stored
//! line index refers to the edited text.
//!
//! The parser never touches the filesystem; `store::LayoutFile` reads and
//! rewrites files.

use thiserror::Error;

use crate::core::{
    naming,
    options::ParseOptions,
    sanitizer::{LineEnding, Sanitizer},
    scanner::scan,
    types::Document,
};

/// Parse errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Bad file format: {0} declares no GTK requirement")]
    BadFormat(String),

    #[error("Layout is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),
}

/// Producer tag written into every document
pub fn format_version() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Parses layout documents with a fixed set of options
///
/// # Example
/// ```
/// use glade_layout::core::{LayoutParser, ParseOptions};
///
/// let content = "<requires lib=\"gtk+\" version=\"3.20\"/>\n\
///     <object class=\"GtkButton\" id=\"Btn1\"><property name=\"label\">OK</property></object>";
///
/// let parser = LayoutParser::new(ParseOptions::default());
/// let document = parser.parse_str(content, "inline.glade")?;
///
/// assert_eq!(document.objects.len(), 1);
/// assert_eq!(document.objects[0].property("label"), Some("OK"));
/// # Ok::<(), glade_layout::core::ParseError>(())
/// ```
pub struct LayoutParser {
    options: ParseOptions,
    sanitizer: Sanitizer,
}

impl LayoutParser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            sanitizer: Sanitizer::new(),
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses text already decoded as UTF-8
    pub fn parse_str(&self, content: &str, filename: &str) -> Result<Document, ParseError> {
        self.parse_bytes(content.as_bytes(), filename)
    }

    /// Parses raw file bytes
    ///
    /// # Errors
    /// `BadFormat` when no toolkit requirement is declared,
    /// `InvalidEncoding` when the bytes are not UTF-8.
    pub fn parse_bytes(&self, bytes: &[u8], filename: &str) -> Result<Document, ParseError> {
        let eol = LineEnding::detect(bytes);
        let content = std::str::from_utf8(bytes)?;

        let sanitized = self.sanitizer.sanitize(content, eol);
        let mut document = Document {
            format_version: format_version(),
            filename: filename.to_string(),
            comments: sanitized.comments,
            source: sanitized.lines,
            line_ending: eol,
            ..Document::default()
        };

        // Requirement is read from the comment-stripped source
        if !self.rescan(&mut document) {
            return Err(ParseError::BadFormat(filename.to_string()));
        }

        for diagnostic in &document.diagnostics {
            log::warn!("{}: {}", filename, diagnostic);
        }

        if self.options.naming.enabled {
            self.inject_names(&mut document);
        }

        Ok(document)
    }

    /// Runs the naming pass on an already parsed document
    ///
    /// Returns the number of edits applied. Running it again without
    /// `force` applies none.
    pub fn inject_names(&self, document: &mut Document) -> usize {
        let plan = naming::plan(document, &self.options.naming);
        let applied = plan.edits.len();

        if applied > 0 {
            naming::apply(&mut document.source, plan.edits);
            self.rescan(document);
            document.modified = true;
        }

        for diagnostic in &plan.diagnostics {
            log::warn!("{}: {}", document.filename, diagnostic);
        }
        document.diagnostics.extend(plan.diagnostics);
        applied
    }

    /// Rebuilds the object list from the document's current source
    ///
    /// Returns false when the source declares no toolkit requirement.
    fn rescan(&self, document: &mut Document) -> bool {
        let outcome = scan(&document.source, &self.options);
        let found = outcome.requires.is_some();

        document.requires = outcome.requires.unwrap_or_default();
        document.objects = outcome.objects;
        document.objects_count = document.objects.len();
        document.diagnostics = outcome.diagnostics;
        found
    }
}

impl Default for LayoutParser {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}
