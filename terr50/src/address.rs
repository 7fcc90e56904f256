//! Byte-offset resolution for the terrain index.
//!
//! The index is addressed in three tiers: a 100 km grid block in the header
//! section, a 4-byte data-block address slot for the 10 km sub-cell within
//! that block, and a 2-byte sample within the data block. All arithmetic is
//! integer division and modulo on the raw metre coordinates; no floating
//! point is involved.

/// ASCII signature at offset 0 of every index file.
pub const SIGNATURE: &[u8] = b"TERR50IDX1";

/// Width of the 100 km grid in cells (the GB envelope is 7 cells wide).
pub const GRID_COLS: u32 = 7;

/// Height of the 100 km grid in cells (northing 0 to 1,300,000).
pub const GRID_ROWS: u32 = 13;

/// Side length of a 100 km grid cell in metres.
pub const GRID_CELL_METRES: u32 = 100_000;

/// Side length of a 10 km sub-cell in metres.
pub const SUB_CELL_METRES: u32 = 10_000;

/// Distance between adjacent elevation samples in metres.
pub const SAMPLE_SPACING_METRES: u32 = 50;

/// Length of the cell identifier at the start of each header block.
pub const CELL_IDENT_LEN: u64 = 2;

/// Sub-cells per header-block row.
pub const SUB_CELLS_PER_ROW: u32 = 10;

/// Sub-cell address slots per header block.
pub const SUB_CELLS_PER_BLOCK: u64 = 100;

/// Width of one sub-cell address slot in bytes.
pub const ADDRESS_LEN: u64 = 4;

/// Samples per data-block row (10,000 m / 50 m).
pub const SAMPLES_PER_ROW: u64 = 200;

/// Width of one elevation sample in bytes.
pub const SAMPLE_LEN: u64 = 2;

/// Size of one header block: identifier plus 100 address slots.
pub const HEADER_BLOCK_LEN: u64 = CELL_IDENT_LEN + SUB_CELLS_PER_BLOCK * ADDRESS_LEN;

/// Size of one data block: 200 x 200 samples.
pub const DATA_BLOCK_LEN: u64 = SAMPLES_PER_ROW * SAMPLES_PER_ROW * SAMPLE_LEN;

/// Resolved byte offsets for one grid coordinate.
///
/// `header_offset` and `slot_offset` are absolute file offsets.
/// `sample_offset` is relative to the data block the slot points at, which
/// is only known once the slot has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleAddress {
    /// Offset of the 100 km grid-block header.
    pub header_offset: u64,
    /// Offset of the 4-byte data-block address slot within that header.
    pub slot_offset: u64,
    /// Offset of the sample relative to the data block's base address.
    pub sample_offset: u64,
}

/// Resolve a coordinate pair to its index offsets.
///
/// Deterministic for all inputs. Coordinates outside the GB envelope still
/// resolve; the offsets they produce either land on a zero address slot or
/// fail the bounds check in [`TerrainIndex`](crate::TerrainIndex). Bounding
/// inputs is the caller's responsibility.
pub fn resolve(easting: u32, northing: u32) -> SampleAddress {
    let grid_col = easting / GRID_CELL_METRES;
    let grid_row = northing / GRID_CELL_METRES;
    let header_offset =
        SIGNATURE.len() as u64 + u64::from(grid_row * GRID_COLS + grid_col) * HEADER_BLOCK_LEN;

    let east_rem = easting % GRID_CELL_METRES;
    let north_rem = northing % GRID_CELL_METRES;
    let sub_col = east_rem / SUB_CELL_METRES;
    let sub_row = north_rem / SUB_CELL_METRES;
    let slot_offset = header_offset
        + CELL_IDENT_LEN
        + u64::from(sub_row * SUB_CELLS_PER_ROW + sub_col) * ADDRESS_LEN;

    let east_fine = east_rem % SUB_CELL_METRES;
    let north_fine = north_rem % SUB_CELL_METRES;
    let sample_col = east_fine / SAMPLE_SPACING_METRES;
    let sample_row = north_fine / SAMPLE_SPACING_METRES;
    let sample_offset =
        (u64::from(sample_row) * SAMPLES_PER_ROW + u64::from(sample_col)) * SAMPLE_LEN;

    SampleAddress {
        header_offset,
        slot_offset,
        sample_offset,
    }
}
