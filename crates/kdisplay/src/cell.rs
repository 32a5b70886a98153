//! One character cell: a glyph code and its attribute byte.

use crate::color::{Attribute, Color};
use crate::region::TextRegion;
use crate::DrawError;

/// A character cell, built fresh for each draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    character: u8,
    attribute: Attribute,
}

impl Cell {
    /// `character` is stored as given; no printability check is made.
    pub const fn new(character: u8, background: Color, text_color: Color) -> Self {
        Self {
            character,
            attribute: Attribute::new(text_color, background),
        }
    }

    pub const fn character(&self) -> u8 {
        self.character
    }

    pub const fn attribute(&self) -> Attribute {
        self.attribute
    }

    pub fn set_character(&mut self, character: u8) {
        self.character = character;
    }

    pub fn set_background(&mut self, background: Color) {
        self.attribute.set_background(background);
    }

    pub fn set_text_color(&mut self, text_color: Color) {
        self.attribute.set_foreground(text_color);
    }

    /// Write the character at `offset` and the attribute at `offset + 1`.
    ///
    /// `offset` is a raw byte offset; whether it names a visible cell is the
    /// caller's concern. The region only refuses writes past its own end.
    pub fn draw(&self, region: &mut TextRegion<'_>, offset: usize) -> Result<(), DrawError> {
        region.write_pair(offset, self.character, self.attribute.bits())
    }
}

/// `'T'`, green on black. Used to mark cells during bring-up.
impl Default for Cell {
    fn default() -> Self {
        Self::new(b'T', Color::Black, Color::Green)
    }
}
