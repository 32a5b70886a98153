//! The 16-color text-mode palette and the packed attribute byte.

/// Text-mode palette index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGrey = 7,
    DarkGrey = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    LightBrown = 14,
    White = 15,
}

impl Color {
    const PALETTE: [Color; 16] = [
        Color::Black,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::Red,
        Color::Magenta,
        Color::Brown,
        Color::LightGrey,
        Color::DarkGrey,
        Color::LightBlue,
        Color::LightGreen,
        Color::LightCyan,
        Color::LightRed,
        Color::LightMagenta,
        Color::LightBrown,
        Color::White,
    ];

    /// The color for the low nibble of `value`. High bits are ignored.
    pub const fn from_nibble(value: u8) -> Self {
        Self::PALETTE[(value & 0x0F) as usize]
    }

    pub const fn nibble(self) -> u8 {
        self as u8
    }
}

/// Attribute byte: bits 7–4 foreground, bits 3–0 background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute(u8);

impl Attribute {
    const HALF_BYTE: u32 = 4;
    const LOW: u8 = 0b0000_1111;
    const HIGH: u8 = 0b1111_0000;

    pub const fn new(foreground: Color, background: Color) -> Self {
        Self(
            ((foreground.nibble() & Self::LOW) << Self::HALF_BYTE)
                | (background.nibble() & Self::LOW),
        )
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn foreground(self) -> Color {
        Color::from_nibble(self.0 >> Self::HALF_BYTE)
    }

    pub const fn background(self) -> Color {
        Color::from_nibble(self.0)
    }

    /// Replace the high nibble; the background is kept.
    pub fn set_foreground(&mut self, color: Color) {
        self.0 = (self.0 & Self::LOW) | ((color.nibble() & Self::LOW) << Self::HALF_BYTE);
    }

    /// Replace the low nibble; the foreground is kept.
    pub fn set_background(&mut self, color: Color) {
        self.0 = (self.0 & Self::HIGH) | (color.nibble() & Self::LOW);
    }
}
