//! HTTP client for the nft.storage content-addressed storage API.
//!
//! [`NftStorageClient`] implements [`mintpress_core::publication::AssetStore`]
//! so it can be injected into a publication pipeline.

pub mod client;
pub mod config;

pub use client::{NftStorageClient, StorageClientError};
pub use config::StorageConfig;
