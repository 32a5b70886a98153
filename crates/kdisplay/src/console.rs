//! Whole-screen helpers built on [`FrameBuffer::draw_cell`].

use crate::cell::Cell;
use crate::color::Color;
use crate::framebuffer::{FrameBuffer, COLUMNS, ROWS};
use crate::DrawError;

/// Row the welcome banner is drawn on.
pub const BANNER_ROW: usize = 12;

/// Boot banner. Fixed at 18 bytes.
///
/// The last byte is a blank (0x20). Older boot code drew the 17-character
/// text plus its NUL terminator, putting glyph 0x00 at (12, 38) instead;
/// both render as an empty cell.
pub const WELCOME_MESSAGE: &[u8; 18] = b"Welcome to osOS!! ";

/// Background and text color of the blank screen.
pub const CLEAR_COLORS: (Color, Color) = (Color::Green, Color::Red);

/// Background and text color of the welcome banner.
pub const BANNER_COLORS: (Color, Color) = (Color::Red, Color::Green);

/// Fill all 25×80 cells with a blank in [`CLEAR_COLORS`].
pub fn clear_screen(fb: &mut FrameBuffer<'_>) -> Result<(), DrawError> {
    let (background, text_color) = CLEAR_COLORS;
    let blank = Cell::new(b' ', background, text_color);
    for row in 0..ROWS {
        for column in 0..COLUMNS {
            fb.draw_cell(row, column, blank)?;
        }
    }
    log::debug!("console: cleared {}x{}", COLUMNS, ROWS);
    Ok(())
}

/// First column of a banner of `len` bytes: `COLUMNS / 2 - len - 1`.
///
/// Saturates at column 0 for text longer than half the screen.
pub const fn banner_start(len: usize) -> usize {
    (COLUMNS / 2).saturating_sub(len).saturating_sub(1)
}

/// Draw `text` on `row` starting at [`banner_start`].
///
/// Stops at the end of `text` or at the right edge, whichever comes first.
/// Returns the number of cells written.
pub fn draw_banner(
    fb: &mut FrameBuffer<'_>,
    row: usize,
    text: &[u8],
    (background, text_color): (Color, Color),
) -> Result<usize, DrawError> {
    let start = banner_start(text.len());
    let mut written = 0;
    for (column, &character) in (start..COLUMNS).zip(text) {
        fb.draw_cell(row, column, Cell::new(character, background, text_color))?;
        written += 1;
    }
    Ok(written)
}

/// The boot banner on row 12.
pub fn welcome_message(fb: &mut FrameBuffer<'_>) -> Result<usize, DrawError> {
    draw_banner(fb, BANNER_ROW, WELCOME_MESSAGE, BANNER_COLORS)
}

/// Mark the four corners of the screen with the default cell.
pub fn test_corners(fb: &mut FrameBuffer<'_>) -> Result<(), DrawError> {
    for (row, column) in [(0, 0), (0, COLUMNS - 1), (ROWS - 1, COLUMNS - 1), (ROWS - 1, 0)] {
        fb.draw_cell(row, column, Cell::default())?;
    }
    Ok(())
}
