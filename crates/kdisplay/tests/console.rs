//! Screen-level behavior against a simulated VGA window.

use kdisplay::console::{self, BANNER_ROW, WELCOME_MESSAGE};
use kdisplay::framebuffer::{cell_offset, COLUMNS, GRID_BYTES, ROWS};
use kdisplay::region::VGA_WINDOW_LEN;
use kdisplay::{BoundsPolicy, Cell, Color, DrawError, FrameBuffer, TextRegion};

fn window() -> Vec<u8> {
    vec![0u8; VGA_WINDOW_LEN]
}

fn cell_at(memory: &[u8], row: usize, column: usize) -> (u8, u8) {
    let offset = cell_offset(row, column);
    (memory[offset], memory[offset + 1])
}

#[test]
fn clear_screen_fills_every_cell() {
    let mut memory = window();
    let mut fb = FrameBuffer::new(TextRegion::from_slice(&mut memory));
    console::clear_screen(&mut fb).unwrap();
    drop(fb);

    let blank = (b' ', 0x42);
    assert_eq!(cell_at(&memory, 0, 0), blank);
    assert_eq!(cell_at(&memory, 12, 40), blank);
    assert_eq!(cell_at(&memory, 24, 79), blank);

    let pairs: Vec<_> = memory[..GRID_BYTES].chunks(2).collect();
    assert_eq!(pairs.len(), ROWS * COLUMNS);
    assert!(pairs.iter().all(|pair| *pair == [b' ', 0x42]));
    assert!(memory[GRID_BYTES..].iter().all(|&b| b == 0));
}

#[test]
fn welcome_banner_spans_columns_21_to_38() {
    let mut memory = window();
    let mut fb = FrameBuffer::new(TextRegion::from_slice(&mut memory));
    assert_eq!(console::welcome_message(&mut fb), Ok(18));
    drop(fb);

    for (i, &expected) in WELCOME_MESSAGE.iter().enumerate() {
        assert_eq!(cell_at(&memory, BANNER_ROW, 21 + i), (expected, 0x24));
    }
    assert_eq!(cell_at(&memory, BANNER_ROW, 20), (0, 0));
    assert_eq!(cell_at(&memory, BANNER_ROW, 39), (0, 0));

    let written = memory.iter().filter(|&&b| b != 0).count();
    assert_eq!(written, 2 * WELCOME_MESSAGE.len());
}

#[test]
fn corners_over_cleared_screen() {
    let mut memory = window();
    let mut fb = FrameBuffer::new(TextRegion::from_slice(&mut memory));
    console::clear_screen(&mut fb).unwrap();
    console::test_corners(&mut fb).unwrap();
    drop(fb);

    for (row, column) in [(0, 0), (0, 79), (24, 79), (24, 0)] {
        assert_eq!(cell_at(&memory, row, column), (b'T', 0x20));
    }
    assert_eq!(cell_at(&memory, 0, 1), (b' ', 0x42));
}

#[test]
fn recolor_then_draw() {
    let mut memory = window();
    let mut fb = FrameBuffer::with_policy(TextRegion::from_slice(&mut memory), BoundsPolicy::Strict);

    let mut cell = Cell::new(b'A', Color::Blue, Color::Red);
    assert_eq!(cell.attribute().bits(), 0x41);
    cell.set_background(Color::Green);
    assert_eq!(cell.attribute().bits(), 0x42);
    cell.set_text_color(Color::White);
    assert_eq!(cell.attribute().bits(), 0xF2);

    fb.draw_cell(3, 7, cell).unwrap();
    drop(fb);
    assert_eq!(cell_at(&memory, 3, 7), (b'A', 0xF2));
}

#[test]
fn both_policies_at_the_boundary() {
    let mut memory = window();
    let mut fb = FrameBuffer::with_policy(TextRegion::from_slice(&mut memory), BoundsPolicy::AsWritten);
    assert_eq!(fb.draw_cell(25, 80, Cell::default()), Ok(()));
    assert_eq!(
        fb.draw_cell(26, 80, Cell::default()),
        Err(DrawError::OutOfGrid { row: 26, column: 80 })
    );
    drop(fb);
    assert_eq!((memory[4160], memory[4161]), (b'T', 0x20));

    let mut memory = window();
    let mut fb = FrameBuffer::with_policy(TextRegion::from_slice(&mut memory), BoundsPolicy::Strict);
    assert_eq!(
        fb.draw_cell(25, 80, Cell::default()),
        Err(DrawError::OutOfGrid { row: 25, column: 80 })
    );
    drop(fb);
    assert!(memory.iter().all(|&b| b == 0));
}
