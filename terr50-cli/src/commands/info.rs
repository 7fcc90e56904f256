use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use terr50::{Terr50Error, TerrainIndex};

pub fn run(index: Option<PathBuf>) -> Result<()> {
    let path = match index {
        Some(path) => path,
        None => {
            let path = std::env::var("TERR50_INDEX").context(
                "TERR50_INDEX environment variable not set. Use --index or set TERR50_INDEX",
            )?;
            PathBuf::from(path)
        }
    };

    let size = fs::metadata(&path)
        .with_context(|| format!("Failed to stat index file: {}", path.display()))?
        .len();

    let (signature_ok, index_file) = match TerrainIndex::open(&path) {
        Ok(idx) => (true, idx),
        Err(Terr50Error::InvalidSignature) => (false, TerrainIndex::open_unverified(&path)?),
        Err(e) => return Err(e).context("Failed to open index"),
    };

    let summaries = index_file
        .grid_summaries()
        .context("Failed to read header section")?;

    println!("{:<6} {:>10}", "CELL", "SUB-CELLS");
    println!("{}", "-".repeat(17));

    let mut populated_cells = 0;
    let mut populated_sub_cells: u32 = 0;
    for summary in &summaries {
        if summary.populated == 0 {
            continue;
        }
        populated_cells += 1;
        populated_sub_cells += summary.populated;
        println!("{:<6} {:>10}", summary.ident_str(), summary.populated);
    }

    // Summary
    println!();
    println!("Summary:");
    println!("  Index file: {}", path.display());
    println!("  Size: {}", format_size(size));
    println!(
        "  Signature: {}",
        if signature_ok { "valid" } else { "INVALID" }
    );
    println!(
        "  100km cells with data: {}/{}",
        populated_cells,
        summaries.len()
    );
    println!("  10km sub-cells with data: {}", populated_sub_cells);

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
