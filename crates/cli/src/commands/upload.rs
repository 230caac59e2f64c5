use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use mintpress_core::publication::PublicationPipeline;
use mintpress_core::types::AssetDescriptor;
use mintpress_storage::{NftStorageClient, StorageConfig};

#[derive(Args)]
pub struct UploadArgs {
    /// Path to the image file
    pub image: PathBuf,

    /// Asset name
    pub name: String,

    /// Asset description
    pub description: String,

    /// MIME type (default: inferred from the file extension)
    #[arg(long)]
    pub mime_type: Option<String>,

    /// Directory for the staged copy of the image
    #[arg(long, env = "STAGING_DIR")]
    pub staging_dir: Option<PathBuf>,
}

pub async fn run(args: UploadArgs) -> Result<()> {
    let raw_bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("Failed to read {}", args.image.display()))?;

    let original_name = args
        .image
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let mime_type = args
        .mime_type
        .unwrap_or_else(|| mime_for_path(&args.image).to_string());
    let asset = AssetDescriptor::new(raw_bytes, original_name, mime_type);

    let storage_config = StorageConfig::from_env().context("Storage is not configured")?;
    let store = NftStorageClient::new(&storage_config)?;
    let staging_dir = args.staging_dir.unwrap_or_else(std::env::temp_dir);
    let pipeline = PublicationPipeline::new(Arc::new(store), staging_dir);

    tracing::info!(
        file = %args.image.display(),
        size = asset.len(),
        mime_type = %asset.mime_type,
        "Uploading asset"
    );

    let locator = pipeline
        .publish(&asset, &args.name, &args.description)
        .await?;

    println!("Metadata URI: {locator}");
    Ok(())
}

/// Guess a MIME type from the file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
