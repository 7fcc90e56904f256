use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use super::build_service;

#[derive(Serialize)]
struct ElevationResponse {
    easting: u32,
    northing: u32,
    elevation: f64,
}

pub fn run(
    index: Option<PathBuf>,
    no_verify: bool,
    easting: u32,
    northing: u32,
    json: bool,
) -> Result<()> {
    let service = build_service(index, no_verify)?;

    let elevation = service
        .lookup_point(easting, northing)
        .context("Failed to get elevation")?;

    if json {
        let response = ElevationResponse {
            easting,
            northing,
            elevation,
        };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        println!("{:.1}", elevation);
    }

    Ok(())
}
