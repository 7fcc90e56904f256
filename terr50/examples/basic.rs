//! Basic example demonstrating terr50 library usage.
//!
//! Run with: cargo run --example basic -- /path/to/gb.terr50

use std::env;

use terr50::{Terr50Error, TerrainService};

fn main() -> Result<(), Terr50Error> {
    // Get the index path from the command line
    let index_path = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example basic -- /path/to/gb.terr50");
        std::process::exit(1);
    });

    let service = TerrainService::new(&index_path);

    // Query some well-known summits by their grid coordinates
    let summits = [
        ("Ben Nevis", 216_600u32, 771_200u32),
        ("Scafell Pike", 321_540, 507_210),
        ("Yr Wyddfa (Snowdon)", 260_993, 354_380),
    ];

    println!("Elevation queries:");
    println!("{:-<50}", "");

    for (name, easting, northing) in &summits {
        match service.lookup_point(*easting, *northing) {
            Ok(elevation) => println!("{}: {:.1}m", name, elevation),
            Err(e) => println!("{}: error - {}", name, e),
        }
    }

    // Resolve a short route into a dense profile
    let route = [
        terr50::Location::new(260_500, 354_000),
        terr50::Location::new(261_000, 354_500),
    ];
    let profile = service.lookup(&route, true)?;

    println!("\nProfile points: {}", profile.len());
    if let (Some(first), Some(last)) = (profile.first(), profile.last()) {
        println!(
            "  {},{} -> {},{}",
            first.easting, first.northing, last.easting, last.northing
        );
    }

    Ok(())
}
