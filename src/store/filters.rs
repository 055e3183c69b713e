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

//! Naming class filters file
//!
//! One class name per line. Blank lines and `#` comments are ignored.
//!
//! ```text
//! # Models and helpers have no CSS name
//! GtkListStore
//! GtkTreeSelection
//! ```

use std::{fs, path::Path};

use crate::store::StoreError;

/// Reads a filters file into a class list
pub fn load_class_filters(path: &Path) -> Result<Vec<String>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let classes = parse_class_filters(&content);

    log::debug!("Loaded {} class filters from {}", classes.len(), path.display());
    Ok(classes)
}

/// Parses filters file content
pub fn parse_class_filters(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class_filters() {
        let content = "# header\nGtkListStore\n\n  GtkTreeSelection  # trailing\n#GtkButton\n";
        assert_eq!(
            parse_class_filters(content),
            vec!["GtkListStore", "GtkTreeSelection"]
        );
    }

    #[test]
    fn test_empty_filters() {
        assert!(parse_class_filters("").is_empty());
        assert!(parse_class_filters("# only a comment\n").is_empty());
    }
}
