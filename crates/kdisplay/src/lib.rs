//! VGA text-mode display.
//!
//! Cells are packed into (character, attribute) byte pairs and written into
//! a [`TextRegion`] through an 80×25 [`FrameBuffer`]. Nothing here owns the
//! screen: every operation is handed the region (or port space) it touches.
#![cfg_attr(not(test), no_std)]

use core::fmt;

pub mod cell;
pub mod color;
pub mod console;
pub mod cursor;
pub mod framebuffer;
pub mod region;

pub use cell::Cell;
pub use color::{Attribute, Color};
pub use framebuffer::{BoundsPolicy, FrameBuffer};
pub use region::TextRegion;

/// Why a cell was not drawn. Nothing is written in either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawError {
    /// The coordinates fail the framebuffer's bounds policy.
    OutOfGrid { row: usize, column: usize },
    /// The cell's two bytes do not fit in the display region.
    OutOfRegion { offset: usize, len: usize },
}

impl DrawError {
    /// Negative status code for C callers. Success is 0.
    pub const fn status(self) -> i32 {
        match self {
            DrawError::OutOfGrid { .. } => -1,
            DrawError::OutOfRegion { .. } => -2,
        }
    }
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::OutOfGrid { row, column } => {
                write!(f, "cell ({}, {}) is outside the grid", row, column)
            }
            DrawError::OutOfRegion { offset, len } => {
                write!(f, "offset {} does not fit a {}-byte region", offset, len)
            }
        }
    }
}
