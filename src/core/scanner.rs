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

//! src/core/scanner.rs
//!
//! Object scanner
//!
//! Walks the tokens of the sanitized lines once, forward, and extracts:
//! - the toolkit requirement
//! - every `<object>` declaration, nested ones included, in declaration order
//! - each object's properties, signals and packing properties
//!
//! The scan position is an explicit `Cursor` passed down to each sub-scan.
//! Open objects are kept on an explicit frame stack rather than the call
//! stack; running out of tokens inside a body ends the scan of every open
//! object with a diagnostic.

use std::collections::HashSet;

use crate::core::{
    options::ParseOptions,
    sanitizer::SourceLine,
    tokenizer::{tokenize_line, Lexeme, Tag, Token},
    types::{Diagnostic, DiagnosticKind, GladeObject, Property, Requirement, Signal},
};

/// Library names accepted as the toolkit requirement
pub const TOOLKIT_LIBS: &[&str] = &["gtk+", "gtk"];

/// A lexeme and the index of its logical line
#[derive(Clone, Debug)]
pub struct Located<'a> {
    pub line: usize,
    pub lexeme: Lexeme<'a>,
}

/// Explicit scan position over the flattened token stream
pub struct Cursor<'s, 'a> {
    items: &'s [Located<'a>],
    pos: usize,
}

impl<'s, 'a> Cursor<'s, 'a> {
    pub fn new(items: &'s [Located<'a>]) -> Self {
        Self { items, pos: 0 }
    }

    pub fn peek(&self) -> Option<&'s Located<'a>> {
        self.items.get(self.pos)
    }

    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Returns the current item and moves past it
    pub fn bump(&mut self) -> Option<&'s Located<'a>> {
        let item = self.items.get(self.pos)?;
        self.pos += 1;
        Some(item)
    }

    fn mark(&self) -> usize {
        self.pos
    }

    fn reset(&mut self, mark: usize) {
        self.pos = mark;
    }
}

/// Result of one scan
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub requires: Option<Requirement>,
    pub objects: Vec<GladeObject>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Where a `<packing>` block inside an object body belongs
#[derive(Clone, Copy, Debug)]
enum PackingTarget {
    /// No `<child>` wrapper open: the body's own object
    Current,
    /// Inside `<child>` before any object closed (placeholders)
    Pending,
    /// The object closed last in this `<child>`, `None` when filtered out
    Child(Option<usize>),
}

/// Tokenizes and scans sanitized lines
pub fn scan(lines: &[SourceLine], options: &ParseOptions) -> ScanOutcome {
    let items: Vec<Located<'_>> = lines
        .iter()
        .enumerate()
        .flat_map(|(line, source)| {
            tokenize_line(source.text())
                .into_iter()
                .map(move |lexeme| Located { line, lexeme })
        })
        .collect();

    let mut cursor = Cursor::new(&items);
    let mut scanner = ObjectScanner::new(options);
    scanner.scan_document(&mut cursor);
    scanner.into_outcome()
}

/// An object whose body is still being scanned
struct Frame {
    object: GladeObject,
    slot: Option<usize>,
    target: PackingTarget,
}

/// Scanner state: options, output and seen identifiers
pub struct ObjectScanner<'o> {
    options: &'o ParseOptions,
    outcome: ScanOutcome,
    seen_ids: HashSet<String>,
}

impl<'o> ObjectScanner<'o> {
    pub fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            outcome: ScanOutcome::default(),
            seen_ids: HashSet::new(),
        }
    }

    pub fn into_outcome(self) -> ScanOutcome {
        self.outcome
    }

    /// Top level: requirement and object declarations, everything else ignored
    pub fn scan_document(&mut self, cursor: &mut Cursor<'_, '_>) {
        while let Some(item) = cursor.bump() {
            match &item.lexeme.token {
                Token::Open(tag) | Token::SelfClosing(tag) if tag.name == "requires" => {
                    self.set_requirement(tag, item.line);
                }
                Token::SelfClosing(tag) if tag.name == "object" => {
                    self.emit_leaf(tag, item.line);
                }
                Token::Open(tag) if tag.name == "object" => {
                    self.scan_object(cursor, tag, item.line);
                }
                _ => {}
            }
        }
    }

    fn set_requirement(&mut self, tag: &Tag<'_>, line: usize) {
        let lib = tag.attr("lib").unwrap_or_default();
        let version = tag.attr("version").unwrap_or_default();

        if self.outcome.requires.is_none() && TOOLKIT_LIBS.contains(&lib) {
            self.outcome.requires = Some(Requirement {
                lib: lib.to_string(),
                version: version.to_string(),
            });
        } else {
            log::debug!("Ignoring requirement {} {} on line {}", lib, version, line + 1);
        }
    }

    /// Applies the id filters and reserves a slot in document order
    fn reserve(&mut self, object: &GladeObject, line: usize) -> Option<usize> {
        if !self.options.accepts(&object.id) {
            log::debug!("Skipping {} on line {}", object, line + 1);
            return None;
        }

        if !object.id.is_empty() && !self.seen_ids.insert(object.id.clone()) {
            self.outcome.diagnostics.push(Diagnostic::new(
                line,
                DiagnosticKind::DuplicateId,
                format!("identifier '{}' is already used", object.id),
            ));
        }

        self.outcome.objects.push(object.clone());
        Some(self.outcome.objects.len() - 1)
    }

    /// Self-closing `<object .../>`: an object without body
    fn emit_leaf(&mut self, tag: &Tag<'_>, line: usize) -> Option<usize> {
        let object = new_object(tag, line);
        self.reserve(&object, line)
    }

    /// Scans an object body up to its matching `</object>`
    ///
    /// Nested objects push a frame on an explicit stack instead of
    /// recursing, so nesting depth is bounded by memory only. Returns the
    /// outer object's slot, `None` when filtered out. A filtered object's
    /// body is consumed all the same.
    pub fn scan_object(
        &mut self,
        cursor: &mut Cursor<'_, '_>,
        open: &Tag<'_>,
        line: usize,
    ) -> Option<usize> {
        let mut stack = vec![self.open_frame(open, line)];

        while let Some(item) = cursor.bump() {
            let Some(frame) = stack.last_mut() else {
                break;
            };

            match &item.lexeme.token {
                Token::Close(name) if *name == "object" => {
                    let Some(closed) = stack.pop() else {
                        break;
                    };
                    let slot = self.close_frame(closed);
                    match stack.last_mut() {
                        Some(parent) => parent.target = PackingTarget::Child(slot),
                        None => return slot,
                    }
                }
                Token::Open(tag) if tag.name == "object" => {
                    let child = self.open_frame(tag, item.line);
                    stack.push(child);
                }
                Token::SelfClosing(tag) if tag.name == "object" => {
                    let child = self.emit_leaf(tag, item.line);
                    frame.target = PackingTarget::Child(child);
                }
                Token::Open(tag) if tag.name == "child" => frame.target = PackingTarget::Pending,
                Token::Close(name) if *name == "child" => frame.target = PackingTarget::Current,
                Token::Open(tag) if tag.name == "packing" => {
                    let packing = self.scan_packing(cursor);
                    match frame.target {
                        PackingTarget::Current => frame.object.packing.extend(packing),
                        PackingTarget::Child(Some(idx)) => {
                            self.outcome.objects[idx].packing.extend(packing);
                        }
                        PackingTarget::Child(None) | PackingTarget::Pending => {}
                    }
                }
                Token::Open(tag) if tag.name == "property" => {
                    if let Some(property) = self.read_property(cursor, tag, item) {
                        if property.name == "name" {
                            frame.object.already_named = true;
                        }
                        frame.object.properties.push(property);
                    }
                }
                Token::SelfClosing(tag) if tag.name == "property" => {
                    self.malformed_property(tag, item.line);
                }
                Token::Open(tag) | Token::SelfClosing(tag) if tag.name == "signal" => {
                    if let Some(signal) = self.read_signal(tag, item.line) {
                        frame.object.signals.push(signal);
                    }
                }
                _ => {}
            }
        }

        // End of input: every frame still open is unterminated, innermost first
        let mut slot = None;
        while let Some(frame) = stack.pop() {
            self.outcome.diagnostics.push(Diagnostic::new(
                frame.object.line,
                DiagnosticKind::UnterminatedObject,
                format!("{} is not closed before end of input", frame.object),
            ));
            slot = self.close_frame(frame);
        }
        slot
    }

    /// Reserves the object's slot and starts its frame
    fn open_frame(&mut self, tag: &Tag<'_>, line: usize) -> Frame {
        let object = new_object(tag, line);
        let slot = self.reserve(&object, line);
        Frame {
            object,
            slot,
            target: PackingTarget::Current,
        }
    }

    /// Stores the finished object in its slot
    fn close_frame(&mut self, frame: Frame) -> Option<usize> {
        if let Some(idx) = frame.slot {
            self.outcome.objects[idx] = frame.object;
        }
        frame.slot
    }

    /// Consumes `<property>` elements until the first other token
    fn scan_packing(&mut self, cursor: &mut Cursor<'_, '_>) -> Vec<Property> {
        let mut packing = Vec::new();

        while let Some(item) = cursor.peek() {
            match &item.lexeme.token {
                token if token.is_blank() => cursor.advance(),
                Token::Open(tag) if tag.name == "property" => {
                    cursor.advance();
                    if let Some(property) = self.read_property(cursor, tag, item) {
                        packing.push(property);
                    }
                }
                Token::Close(name) if *name == "packing" => {
                    cursor.advance();
                    break;
                }
                _ => break,
            }
        }

        packing
    }

    /// Reads `<property name="..">value</property>` from the same line
    fn read_property(
        &mut self,
        cursor: &mut Cursor<'_, '_>,
        open: &Tag<'_>,
        item: &Located<'_>,
    ) -> Option<Property> {
        let Some(name) = open.attr("name") else {
            self.malformed_property(open, item.line);
            return None;
        };

        let Some((value, end)) = read_element_text(cursor, "property", item.line) else {
            self.malformed_property(open, item.line);
            return None;
        };

        Some(Property {
            name: name.to_string(),
            value,
            translatable: open.attr("translatable").is_some_and(is_true),
            line: item.line,
            span: item.lexeme.span.start..end,
        })
    }

    fn malformed_property(&mut self, tag: &Tag<'_>, line: usize) {
        let message = match (tag.attr("name"), tag.attr("translatable")) {
            (None, _) => "property without a name was skipped".to_string(),
            (Some(name), Some(_)) => {
                format!("translatable property '{}' has no value and was skipped", name)
            }
            (Some(name), None) => format!("property '{}' has no value and was skipped", name),
        };
        self.outcome.diagnostics.push(Diagnostic::new(
            line,
            DiagnosticKind::MalformedProperty,
            message,
        ));
    }

    fn read_signal(&mut self, tag: &Tag<'_>, line: usize) -> Option<Signal> {
        match (tag.attr("name"), tag.attr("handler")) {
            (Some(name), Some(handler)) => Some(Signal {
                name: name.to_string(),
                handler: handler.to_string(),
                swapped: tag.attr("swapped").is_some_and(is_true),
                line,
            }),
            _ => {
                self.outcome.diagnostics.push(Diagnostic::new(
                    line,
                    DiagnosticKind::MalformedSignal,
                    "signal needs both a name and a handler, skipped".to_string(),
                ));
                None
            }
        }
    }
}

fn new_object(tag: &Tag<'_>, line: usize) -> GladeObject {
    GladeObject::new(
        tag.attr("class").unwrap_or_default(),
        tag.attr("id").unwrap_or_default(),
        line,
    )
}

/// Collects text up to `</name>` on the same line
///
/// Returns the text and the end offset of the closing tag, or rewinds
/// the cursor and returns `None` when the element does not close there.
fn read_element_text(
    cursor: &mut Cursor<'_, '_>,
    name: &str,
    line: usize,
) -> Option<(String, usize)> {
    let mark = cursor.mark();
    let mut text = String::new();

    while let Some(item) = cursor.peek() {
        if item.line != line {
            break;
        }
        match &item.lexeme.token {
            Token::Text(chunk) => {
                text.push_str(chunk);
                cursor.advance();
            }
            Token::Close(close) if *close == name => {
                cursor.advance();
                return Some((text, item.lexeme.span.end));
            }
            _ => break,
        }
    }

    cursor.reset(mark);
    None
}

/// GtkBuilder boolean spelling
pub fn is_true(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "yes" | "true" | "1" | "y" | "t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sanitizer::{fold_lines, LineEnding};

    #[test]
    fn test_cursor_bump_and_rewind() {
        let lines = fold_lines("<a/><b/>", LineEnding::Lf);
        let items: Vec<Located<'_>> = tokenize_line(lines[0].text())
            .into_iter()
            .map(|lexeme| Located { line: 0, lexeme })
            .collect();

        let mut cursor = Cursor::new(&items);
        let mark = cursor.mark();
        assert_eq!(cursor.bump().and_then(|i| i.lexeme.token.tag_name()), Some("a"));
        assert_eq!(cursor.peek().and_then(|i| i.lexeme.token.tag_name()), Some("b"));

        cursor.reset(mark);
        cursor.advance();
        assert_eq!(cursor.bump().and_then(|i| i.lexeme.token.tag_name()), Some("b"));
        assert!(cursor.bump().is_none());
    }
}
