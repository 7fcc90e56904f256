//! Batch elevation lookup.
//!
//! This module provides [`TerrainService`], the high-level interface that
//! ties the pieces together: it optionally expands the caller's locations
//! into a dense profile, opens the index once for the whole batch, and
//! resolves every point through the address arithmetic, the store and the
//! sample decoder.

use std::path::{Path, PathBuf};

use crate::address;
use crate::decode::decode_sample;
use crate::error::{Result, Terr50Error};
use crate::index::TerrainIndex;
use crate::infill::infill_points;
use crate::location::Location;

/// Elevation lookup service over one compiled terrain index.
///
/// The service is stateless between calls: each lookup maps the index
/// read-only, resolves the whole batch and releases the file again, so any
/// number of services or threads may point at the same file.
///
/// # Example
///
/// ```ignore
/// use terr50::{Location, TerrainService};
///
/// let service = TerrainService::new("/data/gb.terr50");
/// let route = [Location::new(260_993, 354_380), Location::new(262_100, 355_000)];
/// let profile = service.lookup(&route, true)?;
/// ```
pub struct TerrainService {
    /// Path of the compiled index file.
    index_path: PathBuf,
    /// Whether to check the file signature on open.
    verify_signature: bool,
}

impl TerrainService {
    /// Create a service reading from the given index file.
    pub fn new<P: AsRef<Path>>(index_path: P) -> Self {
        Self {
            index_path: index_path.as_ref().to_path_buf(),
            verify_signature: true,
        }
    }

    /// Create a builder for more configuration options.
    pub fn builder<P: AsRef<Path>>(index_path: P) -> TerrainServiceBuilder {
        TerrainServiceBuilder::new(index_path)
    }

    /// Resolve elevations for a batch of locations.
    ///
    /// With `infill` set and more than one location supplied, the input is
    /// first replaced by the 50 m profile over each consecutive pair, so
    /// the output can be longer than the input. Every returned location has
    /// its elevation populated; sub-cells without data resolve to exactly
    /// 0.
    ///
    /// # Errors
    ///
    /// Returns [`Terr50Error::EmptyLocations`] for an empty batch. Any open
    /// or read failure aborts the whole batch; there are no partial
    /// results.
    pub fn lookup(&self, locations: &[Location], infill: bool) -> Result<Vec<Location>> {
        if locations.is_empty() {
            return Err(Terr50Error::EmptyLocations);
        }

        let index = self.open_index()?;

        let points: Vec<Location> = if infill && locations.len() > 1 {
            let mut expanded = Vec::new();
            for (i, pair) in locations.windows(2).enumerate() {
                expanded.extend(infill_points(&pair[0], &pair[1], i == 0));
            }
            expanded
        } else {
            locations.to_vec()
        };

        let mut resolved = Vec::with_capacity(points.len());
        for point in points {
            let elevation = Self::sample(&index, point.easting, point.northing)?;
            resolved.push(Location {
                elevation: Some(elevation),
                ..point
            });
        }

        Ok(resolved)
    }

    /// Resolve the elevation of a single coordinate (a batch of one).
    pub fn lookup_point(&self, easting: u32, northing: u32) -> Result<f64> {
        let index = self.open_index()?;
        Self::sample(&index, easting, northing)
    }

    /// Path of the index file this service reads.
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    fn open_index(&self) -> Result<TerrainIndex> {
        if self.verify_signature {
            TerrainIndex::open(&self.index_path)
        } else {
            TerrainIndex::open_unverified(&self.index_path)
        }
    }

    /// One point through the resolve -> address read -> decode chain.
    fn sample(index: &TerrainIndex, easting: u32, northing: u32) -> Result<f64> {
        let addr = address::resolve(easting, northing);
        match index.read_block_address(addr.slot_offset)? {
            // absent data block: sea or excluded landmass, 0 m by convention
            None => Ok(0.0),
            Some(base) => {
                let raw = index.read_sample(base, addr.sample_offset)?;
                Ok(decode_sample(raw))
            }
        }
    }
}

/// Builder for creating [`TerrainService`] with custom configuration.
///
/// # Example
///
/// ```ignore
/// use terr50::TerrainServiceBuilder;
///
/// let service = TerrainServiceBuilder::new("/data/gb.terr50")
///     .verify_signature(false)
///     .build();
/// ```
pub struct TerrainServiceBuilder {
    index_path: PathBuf,
    verify_signature: bool,
}

impl TerrainServiceBuilder {
    /// Create a new builder with the specified index file path.
    pub fn new<P: AsRef<Path>>(index_path: P) -> Self {
        Self {
            index_path: index_path.as_ref().to_path_buf(),
            verify_signature: true,
        }
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `TERR50_INDEX` | Path to the compiled index file | Required |
    /// | `TERR50_VERIFY` | Check the file signature on open | true |
    ///
    /// # Errors
    ///
    /// Returns an error if `TERR50_INDEX` is not set.
    pub fn from_env() -> Result<Self> {
        let index_path = std::env::var("TERR50_INDEX").map_err(|_| {
            Terr50Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "TERR50_INDEX environment variable not set",
            ))
        })?;

        let verify_signature = std::env::var("TERR50_VERIFY")
            .map(|v| !(v.eq_ignore_ascii_case("false") || v == "0"))
            .unwrap_or(true);

        Ok(Self {
            index_path: PathBuf::from(index_path),
            verify_signature,
        })
    }

    /// Set the index file path.
    ///
    /// Overrides the path set in the constructor or from environment.
    pub fn index_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.index_path = path.as_ref().to_path_buf();
        self
    }

    /// Enable or disable the signature check on open. Enabled by default.
    pub fn verify_signature(mut self, verify: bool) -> Self {
        self.verify_signature = verify;
        self
    }

    /// Build the [`TerrainService`].
    pub fn build(self) -> TerrainService {
        TerrainService {
            index_path: self.index_path,
            verify_signature: self.verify_signature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{DATA_BLOCK_LEN, GRID_COLS, GRID_ROWS, HEADER_BLOCK_LEN, SIGNATURE};
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    /// Build index bytes: full header section plus one data block per
    /// distinct populated sub-cell.
    fn build_index_bytes(samples: &[(u32, u32, i16)]) -> Vec<u8> {
        let header_len =
            SIGNATURE.len() as u64 + u64::from(GRID_COLS * GRID_ROWS) * HEADER_BLOCK_LEN;
        let mut data = vec![0u8; header_len as usize];
        data[..SIGNATURE.len()].copy_from_slice(SIGNATURE);

        for &(easting, northing, tenths) in samples {
            let addr = address::resolve(easting, northing);
            let slot = addr.slot_offset as usize;
            let mut base = u32::from_le_bytes(data[slot..slot + 4].try_into().unwrap());
            if base == 0 {
                base = data.len() as u32;
                data[slot..slot + 4].copy_from_slice(&base.to_le_bytes());
                data.resize(data.len() + DATA_BLOCK_LEN as usize, 0);
            }
            let pos = base as usize + addr.sample_offset as usize;
            data[pos..pos + 2].copy_from_slice(&tenths.to_le_bytes());
        }

        data
    }

    fn write_index(dir: &Path, samples: &[(u32, u32, i16)]) -> PathBuf {
        let path = dir.join("gb.terr50");
        let mut file = File::create(&path).unwrap();
        file.write_all(&build_index_bytes(samples)).unwrap();
        path
    }

    #[test]
    fn test_lookup_single_point() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_index(temp_dir.path(), &[(260_993, 354_380, 3_040)]);
        let service = TerrainService::new(&path);

        let result = service
            .lookup(&[Location::new(260_993, 354_380)], false)
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].easting, 260_993);
        assert_eq!(result[0].northing, 354_380);
        assert_eq!(result[0].elevation, Some(304.0));
    }

    #[test]
    fn test_lookup_empty_input() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_index(temp_dir.path(), &[]);
        let service = TerrainService::new(&path);

        assert!(matches!(
            service.lookup(&[], false),
            Err(Terr50Error::EmptyLocations)
        ));
        assert!(matches!(
            service.lookup(&[], true),
            Err(Terr50Error::EmptyLocations)
        ));
    }

    #[test]
    fn test_absent_sub_cell_resolves_to_zero() {
        // header-only index: a sample read for any point would run past the
        // end of the file, so a clean 0.0 proves the read is skipped
        let temp_dir = TempDir::new().unwrap();
        let path = write_index(temp_dir.path(), &[]);
        let service = TerrainService::new(&path);

        let result = service.lookup(&[Location::new(100, 100)], false).unwrap();
        assert_eq!(result[0].elevation, Some(0.0));
    }

    #[test]
    fn test_negative_elevation() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_index(temp_dir.path(), &[(446_000, 349_000, -7)]);
        let service = TerrainService::new(&path);

        assert_eq!(service.lookup_point(446_000, 349_000).unwrap(), -0.7);
    }

    #[test]
    fn test_infill_expands_batch() {
        let temp_dir = TempDir::new().unwrap();
        // endpoints and all infill points share one 10 km sub-cell
        let path = write_index(temp_dir.path(), &[(260_000, 354_000, 1_000)]);
        let service = TerrainService::new(&path);

        let route = [
            Location::new(260_000, 354_000),
            Location::new(260_200, 354_000),
        ];
        let result = service.lookup(&route, true).unwrap();

        assert_eq!(result.len(), 5);
        assert_eq!(result[0].easting, 260_000);
        assert_eq!(result[1].easting, 260_050);
        assert_eq!(result[4].easting, 260_200);
        assert!(result.iter().all(|p| p.elevation.is_some()));
        assert_eq!(result[0].elevation, Some(100.0));
    }

    #[test]
    fn test_no_infill_preserves_input_length() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_index(temp_dir.path(), &[(260_000, 354_000, 1_000)]);
        let service = TerrainService::new(&path);

        let route = [
            Location::new(260_000, 354_000),
            Location::new(260_200, 354_000),
        ];
        let result = service.lookup(&route, false).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_single_location_ignores_infill() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_index(temp_dir.path(), &[(260_000, 354_000, 1_000)]);
        let service = TerrainService::new(&path);

        let result = service
            .lookup(&[Location::new(260_000, 354_000)], true)
            .unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_missing_index_file() {
        let service = TerrainService::new("/nonexistent/gb.terr50");
        assert!(matches!(
            service.lookup_point(0, 0),
            Err(Terr50Error::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_bad_signature() {
        let temp_dir = TempDir::new().unwrap();
        let mut bytes = build_index_bytes(&[]);
        bytes[0] = b'X';
        let path = temp_dir.path().join("gb.terr50");
        let mut file = File::create(&path).unwrap();
        file.write_all(&bytes).unwrap();

        let service = TerrainService::new(&path);
        assert!(matches!(
            service.lookup_point(100, 100),
            Err(Terr50Error::InvalidSignature)
        ));

        // the check can be disabled for indexes with older signatures
        let relaxed = TerrainService::builder(&path).verify_signature(false).build();
        assert_eq!(relaxed.lookup_point(100, 100).unwrap(), 0.0);
    }

    #[test]
    fn test_truncated_index_fails_batch() {
        let temp_dir = TempDir::new().unwrap();
        let bytes = build_index_bytes(&[]);
        let path = temp_dir.path().join("gb.terr50");
        let mut file = File::create(&path).unwrap();
        file.write_all(&bytes[..1_000]).unwrap();

        let service = TerrainService::new(&path);
        let result = service.lookup(&[Location::new(260_993, 354_380)], false);
        assert!(matches!(result, Err(Terr50Error::Truncated { .. })));
    }

    #[test]
    fn test_builder_overrides() {
        let service = TerrainServiceBuilder::new("/a")
            .index_path("/data/gb.terr50")
            .build();
        assert_eq!(service.index_path(), Path::new("/data/gb.terr50"));
    }

    #[test]
    fn test_from_env() {
        // set and unset are exercised in one test so no other test races
        // on the variable
        let original = std::env::var("TERR50_INDEX").ok();

        std::env::remove_var("TERR50_INDEX");
        assert!(TerrainServiceBuilder::from_env().is_err());

        std::env::set_var("TERR50_INDEX", "/data/gb.terr50");
        let builder = TerrainServiceBuilder::from_env().unwrap();
        assert_eq!(builder.index_path, PathBuf::from("/data/gb.terr50"));
        assert!(builder.verify_signature);

        match original {
            Some(v) => std::env::set_var("TERR50_INDEX", v),
            None => std::env::remove_var("TERR50_INDEX"),
        }
    }
}
