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

//! Glade Layout
//!
//! A parser for GTK Glade/GtkBuilder layout files that extracts objects,
//! properties, signals and packing, with an optional pass that gives every
//! widget a CSS `name` built from its identifier.
//!
//! # Features
//!
//! - **Tolerant scanning:** Line-oriented, never aborts on a malformed line
//! - **Multi-line text:** Labels spanning lines are folded and written back intact
//! - **CSS naming:** Inserts `<property name="name">` after each widget's first property
//! - **Automatic Backups:** Timestamped copy before every rewrite
//! - **Atomic Operations:** Temp file and rename, permission bits preserved
//! - **JSON cache:** Parsed documents round-trip through a side file
//!
//! # Architecture
//!
//! - **`core`:** Parsing logic (types, sanitizer, tokenizer, scanner, naming)
//! - **`store`:** File operations (loading, backups, atomic rewrites, cache)
//!
//! # Examples
//!
//! ## Parsing a layout
//!
//! ```no_run
//! use glade_layout::core::LayoutParser;
//!
//! let bytes = std::fs::read("/tmp/window.glade")?;
//! let document = LayoutParser::default().parse_bytes(&bytes, "window.glade")?;
//!
//! for object in &document.objects {
//!     println!("{} ({} properties)", object, object.properties.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Naming widgets in place
//!
//! ```no_run
//! use glade_layout::core::{LayoutParser, NamingOptions, ParseOptions};
//! use glade_layout::store::LayoutFile;
//!
//! let options = ParseOptions {
//!     naming: NamingOptions { enabled: true, lower_case: true, ..NamingOptions::default() },
//!     ..ParseOptions::default()
//! };
//!
//! let loaded = LayoutFile::new("/tmp/window.glade".into())?.load(&LayoutParser::new(options))?;
//! println!("Rewritten: {}", loaded.backup.is_some());
//! # Ok::<(), glade_layout::store::StoreError>(())
//! ```

pub mod core;
pub mod store;

// Re-export commonly used types for convenience
pub use core::{Document, GladeObject, LayoutParser, ParseOptions, Property, Signal};
