use anyhow::{Context, Result};
use std::path::PathBuf;
use terr50::{TerrainService, TerrainServiceBuilder};

pub mod info;
pub mod profile;
pub mod query;

/// Build the terrain service from the --index flag or the environment.
pub(crate) fn build_service(index: Option<PathBuf>, no_verify: bool) -> Result<TerrainService> {
    let builder = match index {
        Some(path) => TerrainServiceBuilder::new(path),
        None => TerrainServiceBuilder::from_env()
            .context("TERR50_INDEX environment variable not set. Use --index or set TERR50_INDEX")?,
    };

    Ok(builder.verify_signature(!no_verify).build())
}
