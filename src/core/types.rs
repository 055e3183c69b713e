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

//! src/core/types.rs
//!
//! Core type definitions for layout documents
//!
//! This module defines the records produced by the scanner:
//! - `Document`: A whole parsed layout file
//! - `GladeObject`: One `<object>` declaration (widget or plain GObject)
//! - `Property`: A `name=value` record inside an object or packing block
//! - `Signal`: A signal-handler binding
//! - `Requirement`: The declared toolkit dependency
//! - `Diagnostic`: A non-fatal, line-level anomaly found while scanning
//!
//! All persisted types implement serde traits for the JSON side cache.
//! Scanner bookkeeping (element spans, sanitized source) is skipped.

use serde::{Deserialize, Serialize};
use std::{fmt, ops::Range};

use crate::core::sanitizer::{LineEnding, SourceLine};

/// Declared toolkit dependency (`<requires lib="gtk+" version="3.20"/>`)
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Requirement {
    /// Library name, e.g. "gtk+"
    pub lib: String,
    /// Minimum version string, e.g. "3.20"
    pub version: String,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.lib, self.version)
    }
}

/// A `<property>` record
///
/// `line` is the index of the logical line in the sanitized source that
/// holds the element; `span` is the element's byte range on that line.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub value: String,
    pub translatable: bool,
    pub line: usize,
    #[serde(skip)]
    pub span: Range<usize>,
}

/// A `<signal>` record
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Signal {
    pub name: String,
    /// Handler function name
    pub handler: String,
    pub swapped: bool,
    pub line: usize,
}

/// One declared UI element
///
/// Nested objects are not stored as children; the scanner emits every
/// object into the document's flat list in declaration order.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GladeObject {
    /// GType class name (e.g. "GtkButton")
    pub class: String,

    /// Builder identifier, empty when the declaration has no `id`
    pub id: String,

    /// Properties in source order
    pub properties: Vec<Property>,

    /// Signal bindings in source order
    pub signals: Vec<Signal>,

    /// Container packing properties attached to this object
    pub packing: Vec<Property>,

    /// Set when the object already carries a `name` property
    pub already_named: bool,

    /// Line index of the declaration in the sanitized source
    pub line: usize,
}

impl GladeObject {
    pub fn new(class: &str, id: &str, line: usize) -> Self {
        Self {
            class: class.to_string(),
            id: id.to_string(),
            line,
            ..Self::default()
        }
    }

    /// Looks up the value of the first property called `name`
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

impl fmt::Display for GladeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id.is_empty() {
            write!(f, "{}", self.class)
        } else {
            write!(f, "{}#{}", self.class, self.id)
        }
    }
}

/// Kind of non-fatal anomaly found while scanning or naming
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DiagnosticKind {
    /// Property element without a name or a same-line value
    MalformedProperty,
    /// Signal element without a name or handler
    MalformedSignal,
    /// End of input reached inside an object body
    UnterminatedObject,
    /// Second object declared with an identifier already in use
    DuplicateId,
    /// Naming requested on an object that cannot anchor a `name` property
    UnnameableObject,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::MalformedProperty => write!(f, "property"),
            DiagnosticKind::MalformedSignal => write!(f, "signal"),
            DiagnosticKind::UnterminatedObject => write!(f, "object"),
            DiagnosticKind::DuplicateId => write!(f, "id"),
            DiagnosticKind::UnnameableObject => write!(f, "naming"),
        }
    }
}

/// A line-level warning. `line` is 1-based for humans.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    /// Builds a diagnostic from a 0-based line index
    pub fn new(line_idx: usize, kind: DiagnosticKind, message: String) -> Self {
        Self {
            line: line_idx + 1,
            kind,
            message,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] line {}: {}", self.kind, self.line, self.message)
    }
}

/// A parsed layout file
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Document {
    /// Format tag of the producer, e.g. "glade-layout 0.1.0"
    pub format_version: String,

    /// Path of the parsed file
    pub filename: String,

    pub requires: Requirement,

    /// All objects, flattened, in declaration order
    pub objects: Vec<GladeObject>,

    /// Text of every stripped XML comment
    pub comments: Vec<String>,

    pub objects_count: usize,

    /// Timestamp of the last cache write, empty until then
    pub updated_on: String,

    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,

    #[serde(skip)]
    pub(crate) source: Vec<SourceLine>,

    #[serde(skip)]
    pub(crate) line_ending: LineEnding,

    #[serde(skip)]
    pub(crate) modified: bool,
}

impl Document {
    /// Finds an object by identifier
    pub fn object(&self, id: &str) -> Option<&GladeObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Sanitized logical lines (folded text uses the `\n` marker)
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.source.iter().map(SourceLine::text)
    }

    /// Number of sanitized logical lines
    pub fn line_count(&self) -> usize {
        self.source.len()
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// True once naming injection has edited the source
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Renders the source back to file text, restoring folded line breaks
    ///
    /// Comments stripped by the sanitizer are not restored.
    pub fn render(&self) -> String {
        let eol = self.line_ending.as_str();
        self.source
            .iter()
            .map(|line| line.to_physical(eol))
            .collect::<Vec<_>>()
            .join(eol)
    }
}
