//! Hardware text cursor, driven through the CRT controller ports.

use khal::port::OutPort;

use crate::framebuffer::COLUMNS;

/// CRTC index register.
pub const COMMAND_PORT: u16 = 0x3D4;
/// CRTC data register.
pub const DATA_PORT: u16 = 0x3D5;
/// Index of the cursor location high byte.
pub const HIGH_BYTE_COMMAND: u8 = 14;
/// Index of the cursor location low byte.
pub const LOW_BYTE_COMMAND: u8 = 15;

/// Linear cursor position of a grid cell.
pub const fn cursor_position(row: u16, column: u16) -> u16 {
    row.wrapping_mul(COLUMNS as u16).wrapping_add(column)
}

/// Move the cursor to linear cell `position`: high byte, then low byte.
pub fn move_cursor<P: OutPort>(ports: &mut P, position: u16) {
    ports.outb(COMMAND_PORT, HIGH_BYTE_COMMAND);
    ports.outb(DATA_PORT, ((position >> 8) & 0x00FF) as u8);
    ports.outb(COMMAND_PORT, LOW_BYTE_COMMAND);
    ports.outb(DATA_PORT, (position & 0x00FF) as u8);
}

/// Move the cursor to the top-left cell.
pub fn reset_cursor<P: OutPort>(ports: &mut P) {
    move_cursor(ports, 0);
}
