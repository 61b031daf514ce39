// ABOUTME: Request-owned temporary storage for uploaded meal photos
// ABOUTME: Persists an upload under a unique name and removes it exactly once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Temporary upload files
//!
//! A [`TempUpload`] is owned by the request that created it. [`TempUpload::release`]
//! consumes the value, so the file can be released at most once; if the
//! request unwinds before reaching that point, `Drop` removes the file.

use mealwise_core::errors::{AppError, AppResult};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Uploaded image stored on disk for the duration of one request
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
    released: bool,
}

impl TempUpload {
    /// Write `bytes` to a fresh file under `dir`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the directory or file cannot be written
    pub async fn persist(dir: &Path, bytes: &[u8]) -> AppResult<Self> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::storage(format!("Failed to create upload directory: {e}")))?;

        let path = dir.join(format!("{}.upload", Uuid::new_v4()));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::storage(format!("Failed to store upload: {e}")))?;

        debug!(path = %path.display(), size = bytes.len(), "Upload stored");
        Ok(Self {
            path,
            released: false,
        })
    }

    /// Location of the stored file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the stored file
    ///
    /// A file that is already gone counts as released.
    ///
    /// # Errors
    ///
    /// Returns a storage error if removal fails for any other reason
    pub async fn release(mut self) -> AppResult<()> {
        self.released = true;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Upload released");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!("Failed to remove upload: {e}"))),
        }
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), "Failed to remove abandoned upload: {e}");
            }
        }
    }
}
