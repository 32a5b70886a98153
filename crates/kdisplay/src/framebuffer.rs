//! The 80×25 text grid: (row, column) to byte offset, with a bounds check.
//!
//! The framebuffer keeps no contents of its own. It translates coordinates
//! and hands the write to [`Cell::draw`] on the region it was given.

use crate::cell::Cell;
use crate::region::TextRegion;
use crate::DrawError;

pub const COLUMNS: usize = 80;
pub const ROWS: usize = 25;
pub const BYTES_PER_CELL: usize = 2;
pub const ROW_STRIDE: usize = COLUMNS * BYTES_PER_CELL;
/// Bytes covered by the visible grid.
pub const GRID_BYTES: usize = ROWS * ROW_STRIDE;

/// Which coordinates [`FrameBuffer::draw_cell`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// Reject only `row > 25` or `column > 80`.
    ///
    /// Row 25 and column 80 are one past the last visible index and are
    /// still accepted. Their writes land after the visible grid: column 80
    /// aliases column 0 of the next row, and row 25 is off-screen memory.
    AsWritten,
    /// Reject anything outside rows 0–24 and columns 0–79.
    Strict,
}

impl BoundsPolicy {
    pub const fn accepts(self, row: usize, column: usize) -> bool {
        match self {
            BoundsPolicy::AsWritten => row <= ROWS && column <= COLUMNS,
            BoundsPolicy::Strict => row < ROWS && column < COLUMNS,
        }
    }
}

/// `AsWritten`, or `Strict` with the `strict-bounds` feature.
impl Default for BoundsPolicy {
    fn default() -> Self {
        if cfg!(feature = "strict-bounds") {
            BoundsPolicy::Strict
        } else {
            BoundsPolicy::AsWritten
        }
    }
}

/// Byte offset of a cell: `row * 160 + column * 2`.
pub const fn cell_offset(row: usize, column: usize) -> usize {
    row * ROW_STRIDE + column * BYTES_PER_CELL
}

/// A coordinate translator over a display region.
pub struct FrameBuffer<'a> {
    region: TextRegion<'a>,
    policy: BoundsPolicy,
}

impl<'a> FrameBuffer<'a> {
    /// A framebuffer with the default bounds policy.
    pub fn new(region: TextRegion<'a>) -> Self {
        Self::with_policy(region, BoundsPolicy::default())
    }

    pub fn with_policy(region: TextRegion<'a>, policy: BoundsPolicy) -> Self {
        Self { region, policy }
    }

    pub fn policy(&self) -> BoundsPolicy {
        self.policy
    }

    /// The byte offset `draw_cell` would write to, if the policy accepts it.
    pub fn offset_of(&self, row: usize, column: usize) -> Option<usize> {
        if self.policy.accepts(row, column) {
            Some(cell_offset(row, column))
        } else {
            None
        }
    }

    /// Draw `cell` at (`row`, `column`).
    ///
    /// A rejected coordinate writes nothing. Errors are returned, never
    /// acted on; the caller decides what a failed draw means.
    #[must_use = "a rejected cell is reported only through this result"]
    pub fn draw_cell(&mut self, row: usize, column: usize, cell: Cell) -> Result<(), DrawError> {
        let Some(offset) = self.offset_of(row, column) else {
            log::trace!("framebuffer: rejected cell ({}, {})", row, column);
            return Err(DrawError::OutOfGrid { row, column });
        };
        cell.draw(&mut self.region, offset)
    }

    pub fn region(&self) -> &TextRegion<'a> {
        &self.region
    }

    pub fn region_mut(&mut self) -> &mut TextRegion<'a> {
        &mut self.region
    }

    pub fn into_region(self) -> TextRegion<'a> {
        self.region
    }
}
