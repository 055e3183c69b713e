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

//! Caller-supplied parse options
//!
//! Everything is decided at parse start; the parser reads no environment
//! and no configuration file of its own. The class exclusion list can be
//! loaded from a text file with `store::load_class_filters`.

/// GObject classes that are not widgets and so have no `name` property
pub const DEFAULT_NAMING_EXCLUSIONS: &[&str] = &[
    "GtkAccelGroup",
    "GtkActionGroup",
    "GtkAdjustment",
    "GtkCellRendererPixbuf",
    "GtkCellRendererText",
    "GtkCellRendererToggle",
    "GtkEntryBuffer",
    "GtkEntryCompletion",
    "GtkFileFilter",
    "GtkListStore",
    "GtkSizeGroup",
    "GtkTextBuffer",
    "GtkTextTagTable",
    "GtkTreeModelFilter",
    "GtkTreeModelSort",
    "GtkTreeSelection",
    "GtkTreeStore",
    "GtkTreeViewColumn",
];

/// Options for the optional CSS naming pass
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NamingOptions {
    /// Run the naming pass at all
    pub enabled: bool,
    /// Lower-case the identifier when building the name
    pub lower_case: bool,
    /// Replace names that already exist
    pub force: bool,
    /// Remove existing names and add none
    pub clear: bool,
    /// Classes never touched by the pass
    pub skip_classes: Vec<String>,
}

impl NamingOptions {
    pub fn is_excluded(&self, class: &str) -> bool {
        self.skip_classes.iter().any(|c| c == class)
    }
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            lower_case: false,
            force: false,
            clear: false,
            skip_classes: DEFAULT_NAMING_EXCLUSIONS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

/// Options for a parse call
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParseOptions {
    /// Drop objects declared without an `id`
    pub skip_empty_id: bool,
    /// Drop objects whose `id` starts with a lower-case letter
    pub skip_lowercase_first: bool,
    pub naming: NamingOptions,
}

impl ParseOptions {
    /// Applies the identifier filters
    pub fn accepts(&self, id: &str) -> bool {
        if self.skip_empty_id && id.is_empty() {
            return false;
        }
        let lower_first = id.chars().next().is_some_and(char::is_lowercase);
        !(self.skip_lowercase_first && lower_first)
    }
}
