//! Asset publication pipeline.
//!
//! [`PublicationPipeline::publish`] validates a request, stages the asset
//! bytes in a call-scoped temp file, hands a [`MetadataEnvelope`] to the
//! injected [`AssetStore`] exactly once, and removes the staged file before
//! returning. Retry and timeout policy belong to the caller.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CoreError;
use crate::staging::StagedAsset;
use crate::types::{AssetDescriptor, Locator, MetadataEnvelope};

/// Opaque failure reported by an [`AssetStore`].
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// A content-addressed storage network.
///
/// Implementations must treat each call as non-idempotent: one call, one
/// upload. The returned locator is passed to callers without inspection.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn store(&self, envelope: &MetadataEnvelope<'_>) -> Result<Locator, StoreError>;
}

pub struct PublicationPipeline {
    store: Arc<dyn AssetStore>,
    staging_dir: PathBuf,
}

impl PublicationPipeline {
    pub fn new(store: Arc<dyn AssetStore>, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            staging_dir: staging_dir.into(),
        }
    }

    pub fn staging_dir(&self) -> &std::path::Path {
        &self.staging_dir
    }

    /// Publish one asset with its descriptive metadata.
    ///
    /// Invalid input is rejected before any file or network I/O. Otherwise
    /// exactly one staged file is created and removed, and the store is called
    /// exactly once.
    pub async fn publish(
        &self,
        descriptor: &AssetDescriptor,
        name: &str,
        description: &str,
    ) -> Result<Locator, CoreError> {
        let (name, description) = validate_request(descriptor, name, description)?;

        let token = Uuid::new_v4();
        let staged = StagedAsset::create(
            &self.staging_dir,
            token,
            &descriptor.original_name,
            &descriptor.raw_bytes,
        )
        .await?;

        tracing::debug!(
            %token,
            path = %staged.path().display(),
            bytes = descriptor.len(),
            mime_type = %descriptor.mime_type,
            "Asset staged, submitting to store"
        );

        let envelope = MetadataEnvelope {
            name,
            description,
            asset: descriptor,
            staged_path: staged.path(),
        };
        let outcome = self.store.store(&envelope).await;
        let cleanup = staged.release();

        match (outcome, cleanup) {
            (Ok(locator), Ok(())) => {
                tracing::info!(%token, %locator, "Asset published");
                Ok(locator)
            }
            (Ok(locator), Err((path, e))) => {
                tracing::warn!(
                    %token,
                    %locator,
                    path = %path.display(),
                    error = %e,
                    "Asset published but staged file was not removed"
                );
                Err(CoreError::Cleanup {
                    path: path.display().to_string(),
                    message: e.to_string(),
                    locator: Some(locator.into_string()),
                })
            }
            (Err(e), cleanup) => {
                let cleanup = cleanup.err().map(|(path, cleanup_err)| {
                    tracing::warn!(
                        %token,
                        path = %path.display(),
                        error = %cleanup_err,
                        "Staged file was not removed after store failure"
                    );
                    format!("{}: {cleanup_err}", path.display())
                });
                tracing::warn!(%token, error = %e, "Asset store failed");
                Err(CoreError::Storage {
                    message: e.to_string(),
                    cleanup,
                })
            }
        }
    }
}

/// Check publish preconditions and return the trimmed name and description.
pub fn validate_request<'a>(
    descriptor: &AssetDescriptor,
    name: &'a str,
    description: &'a str,
) -> Result<(&'a str, &'a str), CoreError> {
    let name = name.trim();
    let description = description.trim();

    if name.is_empty() {
        return Err(CoreError::Validation("name must not be empty".into()));
    }
    if description.is_empty() {
        return Err(CoreError::Validation("description must not be empty".into()));
    }
    if descriptor.is_empty() {
        return Err(CoreError::Validation("asset must not be empty".into()));
    }

    Ok((name, description))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
