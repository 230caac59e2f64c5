//! Core domain logic for mintpress.
//!
//! Two independent halves live here: the publication pipeline that stages an
//! asset and hands it to an [`publication::AssetStore`], and the pure batch
//! cost estimator. Transport layers (HTTP, CLI) only adapt these contracts.

pub mod config;
pub mod error;
pub mod estimation;
pub mod publication;
pub mod staging;
pub mod types;
