// Copyright 2025 bakri (tidynest@proton.me)
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

//! src/core/mod.rs
//!
//! Core parsing logic
//!
//! This module contains the data structures and algorithms for reading
//! layout documents, including:
//! - Type definitions for documents, objects, properties and signals
//! - Line-ending detection, comment stripping and multi-line folding
//! - A nom-based line tokenizer
//! - The object scanner (explicit cursor, frame stack for nesting)
//! - CSS naming injection planning
//!
//! All logic here works on in-memory text so it can be unit tested
//! without touching the filesystem.

pub mod naming;
pub mod options;
pub mod parser;
pub mod sanitizer;
pub mod scanner;
pub mod tokenizer;
pub mod types;

pub use options::{NamingOptions, ParseOptions, DEFAULT_NAMING_EXCLUSIONS};
pub use parser::{LayoutParser, ParseError};
pub use sanitizer::LineEnding;
pub use types::*;

#[cfg(test)]
mod tests;
