//! Call-scoped staging of asset bytes on local disk.
//!
//! A [`StagedAsset`] owns one uniquely named temporary file. It is removed by
//! [`StagedAsset::release`] on the normal path, and by `Drop` if the owning
//! future is cancelled or unwinds before release is reached.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::error::CoreError;

/// Filename prefix for every staged file.
pub const STAGING_FILE_PREFIX: &str = "mintpress-";

/// Longest original extension carried over to the staged file name.
const MAX_EXTENSION_LEN: usize = 8;

#[derive(Debug)]
pub struct StagedAsset {
    file: NamedTempFile,
    token: Uuid,
}

impl StagedAsset {
    /// Create a staged file in `dir` holding `bytes`.
    ///
    /// The file name embeds `token`, so concurrent publishes sharing a staging
    /// directory never collide.
    pub async fn create(
        dir: &Path,
        token: Uuid,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<Self, CoreError> {
        let prefix = format!("{STAGING_FILE_PREFIX}{token}-");
        let suffix = staged_suffix(original_name);

        let file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(&suffix)
            .tempfile_in(dir)
            .map_err(|e| {
                CoreError::Staging(format!("cannot create file in {}: {e}", dir.display()))
            })?;

        // On failure `file` is dropped here, which removes it.
        tokio::fs::write(file.path(), bytes)
            .await
            .map_err(|e| CoreError::Staging(format!("cannot write staged bytes: {e}")))?;

        Ok(Self { file, token })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn token(&self) -> Uuid {
        self.token
    }

    /// Delete the staged file, reporting any filesystem error.
    ///
    /// A file that is already gone (a store may consume it) counts as
    /// released.
    pub fn release(self) -> Result<(), (PathBuf, io::Error)> {
        let path = self.file.path().to_path_buf();
        match self.file.close() {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err((path, e)),
        }
    }
}

/// `.ext` of the original upload name when it is a short alphanumeric
/// extension, otherwise empty.
fn staged_suffix(original_name: &str) -> String {
    match Path::new(original_name).extension().and_then(|e| e.to_str()) {
        Some(ext)
            if !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!(".{}", ext.to_ascii_lowercase())
        }
        _ => String::new(),
    }
}
