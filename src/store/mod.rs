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

//! Layout file access with backup and atomic rewrite
//!
//! This module is the only part of the crate that touches the filesystem:
//!
//! - **Loading**: reads a layout file and parses it with a `LayoutParser`
//! - **Rewriting**: when naming injection edited the document, the original
//!   is copied to a timestamped backup and the new text replaces it atomically
//! - **Caching**: the parsed document round-trips through a JSON side file
//! - **Filters**: naming class exclusions can be read from a text file
//!
//! # Example
//!
//! ```no_run
//! use glade_layout::core::{LayoutParser, NamingOptions, ParseOptions};
//! use glade_layout::store::LayoutFile;
//!
//! let options = ParseOptions {
//!     naming: NamingOptions { enabled: true, ..NamingOptions::default() },
//!     ..ParseOptions::default()
//! };
//!
//! let file = LayoutFile::new("window.glade".into())?;
//! let loaded = file.load(&LayoutParser::new(options))?;
//!
//! if let Some(backup) = loaded.backup {
//!     println!("Original saved to {}", backup.display());
//! }
//! # Ok::<(), glade_layout::store::StoreError>(())
//! ```

use chrono::Local;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::{Document, LayoutParser};

pub mod cache;
mod error;
pub mod filters;
pub mod transaction;

pub use cache::LayoutCache;
pub use error::StoreError;
pub use filters::{load_class_filters, parse_class_filters};
pub use transaction::RewriteTransaction;

#[cfg(test)]
mod tests;

/// Timestamp format used in backup file names
pub const BACKUP_TIMESTAMP: &str = "%Y-%m-%d_%H%M%S";

/// A parsed layout and, when it was rewritten, the backup of the original
#[derive(Debug)]
pub struct LoadedLayout {
    pub document: Document,
    pub backup: Option<PathBuf>,
}

/// A layout file on disk.
#[derive(Debug)]
pub struct LayoutFile {
    path: PathBuf,
}

impl LayoutFile {
    /// Opens a layout file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the file doesn't exist.
    pub fn new(path: PathBuf) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::NotFound(path));
        }

        if path.read_link().is_ok() {
            log::warn!(
                "{} is a symlink; a rewrite replaces the link with a regular file",
                path.display()
            );
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw file content.
    pub fn read(&self) -> Result<Vec<u8>, StoreError> {
        Ok(fs::read(&self.path)?)
    }

    /// Parses the file, rewriting it when naming injection changed it.
    ///
    /// The rewrite goes through a `RewriteTransaction`: backup first, then
    /// an atomic replace. If the replace fails the original is untouched.
    pub fn load(&self, parser: &LayoutParser) -> Result<LoadedLayout, StoreError> {
        let bytes = self.read()?;
        let document = parser.parse_bytes(&bytes, &self.path.display().to_string())?;

        log::info!(
            "Parsed {}: {} objects, requires {}",
            self.path.display(),
            document.objects_count,
            document.requires
        );

        if !document.is_modified() {
            return Ok(LoadedLayout {
                document,
                backup: None,
            });
        }

        let transaction = RewriteTransaction::begin(self)?;
        let backup = transaction.backup_path().to_path_buf();
        transaction.commit(&document.render())?;

        log::info!(
            "Rewrote {} (backup at {})",
            self.path.display(),
            backup.display()
        );

        Ok(LoadedLayout {
            document,
            backup: Some(backup),
        })
    }

    /// Copies the file to `<file>.<timestamp>.bak` next to it.
    ///
    /// A numeric suffix is added when a backup with the same timestamp
    /// already exists, so earlier backups are never overwritten.
    pub fn create_timestamped_backup(&self) -> Result<PathBuf, StoreError> {
        let timestamp = Local::now().format(BACKUP_TIMESTAMP).to_string();

        let original_name = self
            .path
            .file_name()
            .ok_or_else(|| {
                StoreError::BackupFailed(format!("{} has no file name", self.path.display()))
            })?
            .to_string_lossy();

        let mut backup_path = self.path.with_file_name(format!("{}.{}.bak", original_name, timestamp));
        let mut attempt = 1;
        while backup_path.exists() {
            backup_path = self
                .path
                .with_file_name(format!("{}.{}.{}.bak", original_name, timestamp, attempt));
            attempt += 1;
        }

        fs::copy(&self.path, &backup_path).map_err(|e| {
            StoreError::BackupFailed(format!("{}: {}", backup_path.display(), e))
        })?;

        Ok(backup_path)
    }
}
