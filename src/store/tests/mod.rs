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

//! Store tests
//!
//! Filesystem tests run in `tempfile` directories.


use std::{fs, path::PathBuf};
use tempfile::TempDir;

pub const BUTTON_GLADE: &str = "<?xml version=\"1.0\"?>\n<interface>\n  <requires lib=\"gtk+\" version=\"3.20\"/>\n  <object class=\"GtkButton\" id=\"SaveButton\">\n    <property name=\"label\">Save</property>\n  </object>\n</interface>\n";

/// Helper: writes a layout into a fresh temp directory
pub fn create_test_layout(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let layout_path = temp_dir.path().join("window.glade");
    fs::write(&layout_path, content).unwrap();
    (temp_dir, layout_path)
}

/// Helper: every `.bak` file in a directory
pub fn backups_in(dir: &std::path::Path) -> Vec<PathBuf> {
    let mut backups: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "bak"))
        .collect();
    backups.sort();
    backups
}
