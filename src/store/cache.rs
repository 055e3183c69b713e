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

//! JSON side cache for parsed documents
//!
//! The cache file is tab-indented JSON. Writing stamps the document with
//! the current local time and its object count.

use chrono::Local;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::Document,
    store::{transaction::write_atomic, StoreError},
};

/// Format of the `updated_on` stamp
pub const UPDATED_ON_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A JSON cache file for one document
#[derive(Debug)]
pub struct LayoutCache {
    path: PathBuf,
}

impl LayoutCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Cache path derived from a layout path: `window.glade` → `window.glade.json`
    pub fn beside(layout: &Path) -> Self {
        let mut name = layout.as_os_str().to_owned();
        name.push(".json");
        Self::new(PathBuf::from(name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes the document, stamping `updated_on` and `objects_count`
    pub fn write(&self, document: &mut Document) -> Result<(), StoreError> {
        document.updated_on = Local::now().format(UPDATED_ON_FORMAT).to_string();
        document.objects_count = document.objects.len();

        let json = to_tab_json(document)?;
        write_atomic(&self.path, &json)?;

        log::debug!(
            "Cached {} objects to {}",
            document.objects_count,
            self.path.display()
        );
        Ok(())
    }

    /// Loads a cached document
    ///
    /// The document carries no source text, so it cannot be re-rendered.
    pub fn read(&self) -> Result<Document, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound(self.path.clone()));
        }
        let content = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&content)?)
    }
}

fn to_tab_json(document: &Document) -> Result<Vec<u8>, StoreError> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"\t"));
    document.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}
