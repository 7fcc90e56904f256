//! # terr50 - Great-Britain terrain elevation lookups
//!
//! Library for querying terrain elevation at Great-Britain national grid
//! coordinates from a pre-compiled binary index built offline from the
//! OS Terrain 50 dataset.
//!
//! ## Features
//!
//! - **Fast**: memory-mapped index, three integer divisions per point
//! - **Dense profiles**: optional 50 m infill points between path coordinates
//! - **Offline**: one local index file, no internet required
//!
//! ## Quick Start
//!
//! ```ignore
//! use terr50::{Location, TerrainService};
//!
//! let service = TerrainService::new("/data/gb.terr50");
//!
//! // Resolve a walking route into a dense elevation profile
//! let profile = service.lookup(
//!     &[Location::new(260_993, 354_380), Location::new(261_500, 354_900)],
//!     true,
//! )?;
//! for point in &profile {
//!     println!("{},{}: {:?}m", point.easting, point.northing, point.elevation);
//! }
//! ```
//!
//! ## Index Format
//!
//! The index is a single binary file produced by the offline compiler from
//! OS Terrain 50 ASCII grids:
//!
//! - a 10-byte ASCII signature,
//! - one 402-byte header block per 100 km grid cell, row-major across the
//!   7-cell-wide GB grid: a 2-byte cell identifier followed by 100
//!   little-endian 4-byte data-block addresses, one per 10 km sub-cell
//!   (address 0 = no data, i.e. sea or excluded landmass),
//! - data blocks of 200 x 200 little-endian 2-byte samples (elevation x 10,
//!   signed), row-major at 50 m spacing.

pub mod address;
pub mod decode;
pub mod error;
pub mod index;
pub mod infill;
pub mod location;
pub mod service;

// Re-export main types at crate root for convenience
pub use error::{Result, Terr50Error};
pub use index::{GridSummary, TerrainIndex};
pub use location::Location;
pub use service::{TerrainService, TerrainServiceBuilder};
