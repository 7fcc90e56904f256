//! Terrain index file access.
//!
//! This module provides [`TerrainIndex`], a read-only memory map of a
//! compiled index file. It answers the two reads the lookup path needs: the
//! 4-byte data-block address of a 10 km sub-cell and the raw 2-byte sample
//! inside a data block. The map is dropped with the value, so every exit
//! path releases the file.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use memmap2::Mmap;

use crate::address::{
    ADDRESS_LEN, CELL_IDENT_LEN, GRID_COLS, GRID_ROWS, HEADER_BLOCK_LEN, SIGNATURE,
    SUB_CELLS_PER_BLOCK,
};
use crate::error::{Result, Terr50Error};

/// Population summary for one 100 km grid block, as reported by
/// [`TerrainIndex::grid_summaries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSummary {
    /// Two-byte cell identifier from the header (e.g. `b"SH"`).
    pub ident: [u8; 2],
    /// Number of 10 km sub-cells with a data block.
    pub populated: u32,
}

impl GridSummary {
    /// The identifier as text, with non-UTF-8 bytes replaced.
    pub fn ident_str(&self) -> String {
        String::from_utf8_lossy(&self.ident).into_owned()
    }
}

/// A memory-mapped terrain index.
///
/// # Example
///
/// ```ignore
/// use terr50::{address, TerrainIndex};
///
/// let index = TerrainIndex::open("/data/gb.terr50")?;
/// let addr = address::resolve(260_993, 354_380);
/// if let Some(base) = index.read_block_address(addr.slot_offset)? {
///     let raw = index.read_sample(base, addr.sample_offset)?;
/// }
/// ```
pub struct TerrainIndex {
    /// Memory-mapped file data
    data: Mmap,
}

impl TerrainIndex {
    /// Open an index file and verify its signature.
    ///
    /// # Errors
    ///
    /// Returns [`Terr50Error::FileNotFound`] if the file does not exist,
    /// [`Terr50Error::Io`] if it cannot be opened or mapped, and
    /// [`Terr50Error::InvalidSignature`] if it does not start with the
    /// index signature.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let index = Self::open_unverified(path)?;
        if index.data.get(..SIGNATURE.len()) != Some(SIGNATURE) {
            return Err(Terr50Error::InvalidSignature);
        }
        Ok(index)
    }

    /// Open an index file without checking the signature.
    pub fn open_unverified<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Terr50Error::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => Terr50Error::Io(e),
        })?;

        // SAFETY: the file is opened read-only and never mutated while
        // mapped; the mapping is not exposed outside this type.
        let data = unsafe { Mmap::map(&file)? };

        Ok(Self { data })
    }

    /// Read the data-block address in the sub-cell slot at `slot_offset`.
    ///
    /// Returns `None` for the zero address, the format's marker for a
    /// sub-cell with no data (sea or excluded landmass). Callers must not
    /// attempt a sample read for such sub-cells.
    pub fn read_block_address(&self, slot_offset: u64) -> Result<Option<u32>> {
        let raw: [u8; 4] = self.bytes_at(slot_offset)?;
        match u32::from_le_bytes(raw) {
            0 => Ok(None),
            base => Ok(Some(base)),
        }
    }

    /// Read the raw sample at `relative_offset` inside the data block based
    /// at `base`.
    pub fn read_sample(&self, base: u32, relative_offset: u64) -> Result<[u8; 2]> {
        self.bytes_at(u64::from(base) + relative_offset)
    }

    /// Length of the mapped file in bytes.
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whether the mapped file is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Walk the header section and summarise every 100 km grid block.
    ///
    /// # Errors
    ///
    /// Returns [`Terr50Error::Truncated`] if the file is shorter than the
    /// full header section.
    pub fn grid_summaries(&self) -> Result<Vec<GridSummary>> {
        let blocks = u64::from(GRID_COLS * GRID_ROWS);
        let mut summaries = Vec::with_capacity(blocks as usize);

        for block in 0..blocks {
            let header_offset = SIGNATURE.len() as u64 + block * HEADER_BLOCK_LEN;
            let ident: [u8; 2] = self.bytes_at(header_offset)?;

            let mut populated = 0;
            for slot in 0..SUB_CELLS_PER_BLOCK {
                let slot_offset = header_offset + CELL_IDENT_LEN + slot * ADDRESS_LEN;
                if self.read_block_address(slot_offset)?.is_some() {
                    populated += 1;
                }
            }

            summaries.push(GridSummary { ident, populated });
        }

        Ok(summaries)
    }

    /// Fixed-width read with the truncation check.
    fn bytes_at<const N: usize>(&self, offset: u64) -> Result<[u8; N]> {
        let truncated = || Terr50Error::Truncated {
            offset,
            expected: N,
        };

        let start = usize::try_from(offset).map_err(|_| truncated())?;
        let end = start.checked_add(N).ok_or_else(truncated)?;
        let slice = self.data.get(start..end).ok_or_else(truncated)?;

        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }
}
