//! Unmangled entry points for the boot code.
//!
//! Every function here is a translation: raw C arguments in, typed HAL call,
//! status code out. All of them assume early boot: identity-mapped VGA
//! memory, a single core, interrupts off.
#![cfg_attr(not(test), no_std)]

use kdisplay::{console, Cell, Color, DrawError, FrameBuffer, TextRegion};
use log::LevelFilter;

/// Status returned to C on success.
pub const STATUS_OK: i32 = 0;

/// Logger verbosity chosen at build time.
pub const LOG_LEVEL: LevelFilter = if cfg!(debug_assertions) {
    LevelFilter::Trace
} else {
    LevelFilter::Info
};

/// Build a cell from C arguments. Only the low nibble of each color is used.
///
/// `foreground` goes to the attribute's high nibble and `background` to the
/// low one. Earlier boot code passed `foreground` through as the background,
/// so callers written against it will see the two colors swapped.
pub fn cell_from_raw(character: u8, foreground: u8, background: u8) -> Cell {
    Cell::new(
        character,
        Color::from_nibble(background),
        Color::from_nibble(foreground),
    )
}

/// `0` on success, the error's negative status otherwise.
pub fn status<T>(result: Result<T, DrawError>) -> i32 {
    match result {
        Ok(_) => STATUS_OK,
        Err(err) => {
            log::trace!("kentry: {}", err);
            err.status()
        }
    }
}

fn screen() -> FrameBuffer<'static> {
    // SAFETY: boot-time contract of this crate; see the module docs.
    FrameBuffer::new(unsafe { TextRegion::vga() })
}

/// Write one cell at raw byte offset `location` of the VGA window.
///
/// `foreground` is the text color (high nibble), `background` the low
/// nibble; see [`cell_from_raw`] for the swap relative to earlier callers.
///
/// # Safety
///
/// VGA memory must be identity-mapped and not in use by anything else.
#[no_mangle]
pub unsafe extern "C" fn frame_buffer_write_cell(
    location: u32,
    c: u8,
    foreground: u8,
    background: u8,
) -> i32 {
    let mut region = TextRegion::vga();
    status(cell_from_raw(c, foreground, background).draw(&mut region, location as usize))
}

/// Draw one cell by grid position. Negative on rejected coordinates.
///
/// # Safety
///
/// As [`frame_buffer_write_cell`].
#[no_mangle]
pub unsafe extern "C" fn frame_buffer_draw_cell(
    row: u8,
    column: u8,
    c: u8,
    foreground: u8,
    background: u8,
) -> i32 {
    let cell = cell_from_raw(c, foreground, background);
    status(screen().draw_cell(usize::from(row), usize::from(column), cell))
}

/// # Safety
///
/// As [`frame_buffer_write_cell`].
#[no_mangle]
pub unsafe extern "C" fn clear_screen() -> i32 {
    status(console::clear_screen(&mut screen()))
}

/// # Safety
///
/// As [`frame_buffer_write_cell`].
#[no_mangle]
pub unsafe extern "C" fn welcome_message() -> i32 {
    status(console::welcome_message(&mut screen()))
}

/// # Safety
///
/// As [`frame_buffer_write_cell`].
#[no_mangle]
pub unsafe extern "C" fn test_corners() -> i32 {
    status(console::test_corners(&mut screen()))
}

#[cfg(target_arch = "x86_64")]
mod ports {
    use kdisplay::cursor;
    use khal::fixed::U16;
    use khal::serial::{self, UartConfig};
    use khal::IoSpace;

    use super::{LOG_LEVEL, STATUS_OK};

    /// # Safety
    ///
    /// Writes the CRTC ports 0x3D4/0x3D5; see [`IoSpace::new`].
    #[no_mangle]
    pub unsafe extern "C" fn move_framebuffer_cursor(position: u16) {
        cursor::move_cursor(&mut IoSpace::new(), position);
    }

    /// # Safety
    ///
    /// As [`move_framebuffer_cursor`].
    #[no_mangle]
    pub unsafe extern "C" fn reset_cursor() {
        cursor::reset_cursor(&mut IoSpace::new());
    }

    /// Program a UART divisor. Both arguments are narrowed to 16 bits.
    ///
    /// # Safety
    ///
    /// `com_port` must be a UART base the caller owns.
    #[no_mangle]
    pub unsafe extern "C" fn configure_serial_baud_rate(com_port: u32, divisor: u32) {
        serial::configure_baud_rate(&mut IoSpace::new(), U16::new(com_port), U16::new(divisor));
    }

    /// Set up the UART and route `log` output to it. `-1` if a logger is
    /// already installed, in which case no port is written.
    ///
    /// # Safety
    ///
    /// As [`configure_serial_baud_rate`].
    #[no_mangle]
    pub unsafe extern "C" fn serial_logger_init(com_port: u32, divisor: u32) -> i32 {
        let config = UartConfig::new(U16::new(com_port), U16::new(divisor));
        match klog::init(config, LOG_LEVEL) {
            Ok(()) => STATUS_OK,
            Err(_) => -1,
        }
    }
}

#[cfg(target_arch = "x86_64")]
pub use ports::{configure_serial_baud_rate, move_framebuffer_cursor, reset_cursor, serial_logger_init};
