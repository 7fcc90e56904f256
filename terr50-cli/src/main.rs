use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// GB terrain elevation CLI tool
#[derive(Parser)]
#[command(name = "terr50")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the compiled terrain index file
    #[arg(short, long, env = "TERR50_INDEX", global = true)]
    index: Option<PathBuf>,

    /// Skip the index signature check
    #[arg(long, global = true)]
    no_verify: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query elevation for a single grid coordinate
    Query {
        /// Easting in metres
        #[arg(long)]
        easting: u32,

        /// Northing in metres
        #[arg(long)]
        northing: u32,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Resolve elevations for coordinates from a CSV file
    Profile {
        /// Input CSV file with easting/northing columns
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Synthesise 50 m infill points between consecutive rows
        #[arg(long)]
        infill: bool,

        /// Column name for easting
        #[arg(long, default_value = "easting")]
        easting_col: String,

        /// Column name for northing
        #[arg(long, default_value = "northing")]
        northing_col: String,
    },

    /// Display information about the terrain index file
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            easting,
            northing,
            json,
        } => commands::query::run(cli.index, cli.no_verify, easting, northing, json),
        Commands::Profile {
            input,
            output,
            infill,
            easting_col,
            northing_col,
        } => commands::profile::run(
            cli.index,
            cli.no_verify,
            input,
            output,
            infill,
            easting_col,
            northing_col,
        ),
        Commands::Info => commands::info::run(cli.index),
    }
}
