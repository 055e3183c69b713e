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

//! src/core/naming.rs
//!
//! CSS naming injection
//!
//! Plans the source edits that give each object a `name` property built
//! from its identifier, so stylesheets can target it with `#name`.
//!
//! # Edits
//! Planning only reads the document. Edits are then applied from the last
//! position to the first, so an insertion or removal never moves a position
//! that has yet to be edited. The caller re-scans afterwards, which keeps
//! every stored line index valid.

use std::{cmp::Reverse, ops::Range};

use crate::core::{
    options::NamingOptions,
    sanitizer::SourceLine,
    types::{Diagnostic, DiagnosticKind, Document, GladeObject, Property},
};

/// One change to the sanitized source
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Edit {
    /// Insert a whole new line after `line`
    InsertAfter { line: usize, text: String },
    /// Replace a byte range of `line` (empty range inserts, empty text removes)
    Replace {
        line: usize,
        range: Range<usize>,
        text: String,
    },
    /// Drop `line` entirely
    RemoveLine { line: usize },
}

impl Edit {
    /// Later positions sort higher; within a line, whole-line inserts go
    /// first and whole-line removals last
    fn position(&self) -> (usize, u8, usize, bool) {
        match self {
            Edit::InsertAfter { line, .. } => (*line, 2, 0, false),
            Edit::Replace { line, range, .. } => (*line, 1, range.start, !range.is_empty()),
            Edit::RemoveLine { line } => (*line, 0, 0, false),
        }
    }
}

/// Edits and warnings produced by planning
#[derive(Debug, Default)]
pub struct NamingPlan {
    pub edits: Vec<Edit>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds the CSS name for an identifier
pub fn css_name(id: &str, lower_case: bool) -> String {
    if lower_case {
        id.to_lowercase()
    } else {
        id.to_string()
    }
}

/// Plans the naming edits for every eligible object
pub fn plan(document: &Document, options: &NamingOptions) -> NamingPlan {
    let mut plan = NamingPlan::default();

    for object in &document.objects {
        if options.is_excluded(&object.class) {
            continue;
        }

        let (names, others): (Vec<&Property>, Vec<&Property>) =
            object.properties.iter().partition(|p| p.name == "name");

        if options.clear {
            plan.edits.extend(names.iter().map(|p| removal(&document.source, p)));
            continue;
        }

        if object.already_named && !options.force {
            continue;
        }

        if object.id.is_empty() {
            plan.diagnostics.push(unnameable(object, "it has no id"));
            continue;
        }

        let Some(anchor) = others.first() else {
            plan.diagnostics.push(unnameable(object, "it has no property to anchor the name"));
            continue;
        };

        // A forced rename only drops the old name once the new one can land
        if options.force {
            plan.edits.extend(names.iter().map(|p| removal(&document.source, p)));
        }

        plan.edits.push(insertion(
            &document.source,
            anchor,
            &css_name(&object.id, options.lower_case),
        ));
    }

    plan
}

/// Applies edits back to front
pub fn apply(lines: &mut Vec<SourceLine>, mut edits: Vec<Edit>) {
    edits.sort_by_key(|edit| Reverse(edit.position()));

    for edit in edits {
        match edit {
            Edit::InsertAfter { line, text } => {
                let at = (line + 1).min(lines.len());
                lines.insert(at, SourceLine::new(&text));
            }
            Edit::Replace { line, range, text } => {
                if let Some(source) = lines.get_mut(line) {
                    source.replace_range(range, &text);
                }
            }
            Edit::RemoveLine { line } => {
                if line < lines.len() {
                    lines.remove(line);
                }
            }
        }
    }
}

fn name_element(name: &str) -> String {
    format!(r#"<property name="name">{}</property>"#, name)
}

/// New line after the anchor when it ends its line, inline otherwise
fn insertion(source: &[SourceLine], anchor: &Property, name: &str) -> Edit {
    let element = name_element(name);
    let Some(line) = source.get(anchor.line) else {
        return Edit::InsertAfter {
            line: anchor.line,
            text: element,
        };
    };

    let rest = line.text().get(anchor.span.end..).unwrap_or_default();
    if rest.trim().is_empty() {
        Edit::InsertAfter {
            line: anchor.line,
            text: format!("{}{}", line.indent(), element),
        }
    } else {
        Edit::Replace {
            line: anchor.line,
            range: anchor.span.end..anchor.span.end,
            text: element,
        }
    }
}

/// Whole-line removal when the property is alone on its line
fn removal(source: &[SourceLine], property: &Property) -> Edit {
    let alone = source
        .get(property.line)
        .and_then(|line| {
            let text = line.text();
            text.get(property.span.clone()).map(|element| element == text.trim())
        })
        .unwrap_or(false);

    if alone {
        Edit::RemoveLine {
            line: property.line,
        }
    } else {
        Edit::Replace {
            line: property.line,
            range: property.span.clone(),
            text: String::new(),
        }
    }
}

fn unnameable(object: &GladeObject, reason: &str) -> Diagnostic {
    Diagnostic::new(
        object.line,
        DiagnosticKind::UnnameableObject,
        format!("{} cannot be named: {}", object, reason),
    )
}
