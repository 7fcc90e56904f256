use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use terr50::Location;

use super::build_service;

#[allow(clippy::too_many_arguments)]
pub fn run(
    index: Option<PathBuf>,
    no_verify: bool,
    input: PathBuf,
    output: Option<PathBuf>,
    infill: bool,
    easting_col: String,
    northing_col: String,
) -> Result<()> {
    let service = build_service(index, no_verify)?;

    // Read the coordinate rows
    let mut reader = csv::Reader::from_path(&input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;

    let headers = reader.headers().context("Failed to read CSV headers")?.clone();
    let easting_idx = headers
        .iter()
        .position(|h| h == easting_col)
        .with_context(|| format!("Column '{}' not found in input", easting_col))?;
    let northing_idx = headers
        .iter()
        .position(|h| h == northing_col)
        .with_context(|| format!("Column '{}' not found in input", northing_col))?;

    let mut locations = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.context("Failed to read CSV record")?;
        let easting: u32 = record
            .get(easting_idx)
            .unwrap_or("")
            .trim()
            .parse()
            .with_context(|| format!("Invalid easting on data row {}", row + 1))?;
        let northing: u32 = record
            .get(northing_idx)
            .unwrap_or("")
            .trim()
            .parse()
            .with_context(|| format!("Invalid northing on data row {}", row + 1))?;
        locations.push(Location::new(easting, northing));
    }

    if locations.is_empty() {
        bail!("No coordinate rows found in {}", input.display());
    }

    // One batch lookup resolves the whole profile
    let resolved = service.lookup(&locations, infill).context("Lookup failed")?;

    // Write results
    let out: Box<dyn Write> = match &output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([easting_col.as_str(), northing_col.as_str(), "elevation"])?;

    let bar = ProgressBar::new(resolved.len() as u64);
    bar.set_style(ProgressStyle::default_bar());

    for point in &resolved {
        writer.write_record([
            point.easting.to_string(),
            point.northing.to_string(),
            format!("{:.1}", point.elevation.unwrap_or(0.0)),
        ])?;
        bar.inc(1);
    }

    writer.flush()?;
    bar.finish_and_clear();

    eprintln!(
        "Resolved {} point(s) from {} input row(s)",
        resolved.len(),
        locations.len()
    );

    Ok(())
}
