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

//! Layout rewrite transaction with automatic backup
//!
//! Replaces a layout file's content atomically after copying the original.

use atomic_write_file::AtomicWriteFile;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::store::{LayoutFile, StoreError};

/// Atomic layout rewrite with a backup taken up front.
///
/// # Lifecycle
///
/// 1. `begin()` - Copies the original to a timestamped backup
/// 2. `commit()` - Writes the new content atomically, or
/// 3. `rollback()` - Restores the backup content
///
/// The atomic write keeps the original file's permission bits.
///
/// # Example
///
/// ```no_run
/// use glade_layout::store::{LayoutFile, RewriteTransaction};
///
/// let file = LayoutFile::new("window.glade".into())?;
/// let tx = RewriteTransaction::begin(&file)?;
///
/// match tx.commit("<interface/>\n") {
///     Ok(()) => println!("Layout updated"),
///     Err(e) => eprintln!("Rewrite failed: {}", e),
/// }
/// # Ok::<(), glade_layout::store::StoreError>(())
/// ```
pub struct RewriteTransaction<'a> {
    file: &'a LayoutFile,
    backup_path: PathBuf,
}

impl<'a> RewriteTransaction<'a> {
    /// Begins a rewrite by creating the backup.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::BackupFailed` if the copy cannot be made; the
    /// original is untouched in that case.
    pub fn begin(file: &'a LayoutFile) -> Result<Self, StoreError> {
        let backup_path = file.create_timestamped_backup()?;
        log::debug!("Backup created at {}", backup_path.display());

        Ok(Self { file, backup_path })
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Atomically replaces the file content.
    ///
    /// Consumes the transaction. On error the original file is unchanged
    /// and the backup stays available.
    pub fn commit(self, new_content: &str) -> Result<(), StoreError> {
        write_atomic(self.file.path(), new_content.as_bytes())
    }

    /// Restores the content saved by `begin()`.
    pub fn rollback(&self) -> Result<(), StoreError> {
        let backup_content = fs::read(&self.backup_path)?;
        write_atomic(self.file.path(), &backup_content)
    }
}

/// Temp file plus rename, so readers never see a half-written file
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> Result<(), StoreError> {
    let mut file = AtomicWriteFile::options().open(path).map_err(|e| {
        StoreError::WriteFailed(format!("Failed to open for atomic write: {}", e))
    })?;

    file.write_all(content)
        .map_err(|e| StoreError::WriteFailed(format!("Failed to write content: {}", e)))?;

    file.commit()
        .map_err(|e| StoreError::WriteFailed(format!("Failed to commit atomic write: {}", e)))?;

    Ok(())
}
