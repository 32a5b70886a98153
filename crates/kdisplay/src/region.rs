//! Display memory as an explicit capability.
//!
//! A [`TextRegion`] is a base address plus a length. The framebuffer writes
//! through it instead of through a hardcoded pointer, so the same code drives
//! real VGA memory at boot and a plain byte array in tests.

use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::DrawError;

/// Physical address of the VGA color text window.
pub const VGA_TEXT_BASE: usize = 0x000B_8000;

/// Size of the VGA color text window (0xB8000..0xC0000). The visible 80×25
/// grid uses the first 4000 bytes; the rest is off-screen pages.
pub const VGA_WINDOW_LEN: usize = 0x8000;

/// Writable display memory of `len` bytes starting at `base`.
pub struct TextRegion<'a> {
    base: NonNull<u8>,
    len: usize,
    _memory: PhantomData<&'a mut [u8]>,
}

impl<'a> TextRegion<'a> {
    /// A region backed by ordinary memory.
    pub fn from_slice(buffer: &'a mut [u8]) -> Self {
        let len = buffer.len();
        Self {
            base: NonNull::from(buffer).cast(),
            len,
            _memory: PhantomData,
        }
    }

    /// A region over raw memory. Returns `None` for a null `base`.
    ///
    /// # Safety
    ///
    /// `base..base + len` must be mapped, writable and not aliased by any
    /// other live reference for `'a`.
    pub unsafe fn from_raw(base: *mut u8, len: usize) -> Option<Self> {
        Some(Self {
            base: NonNull::new(base)?,
            len,
            _memory: PhantomData,
        })
    }

    /// The VGA text window, assuming it is identity-mapped.
    ///
    /// # Safety
    ///
    /// Same as [`TextRegion::from_raw`]: physical 0xB8000 must be mapped at
    /// the same virtual address, and nothing else may be writing to it.
    pub unsafe fn vga() -> TextRegion<'static> {
        TextRegion {
            base: NonNull::new_unchecked(VGA_TEXT_BASE as *mut u8),
            len: VGA_WINDOW_LEN,
            _memory: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Write `first` at `offset` and `second` at `offset + 1`.
    ///
    /// Both bytes land or neither does. Writes are volatile: display memory
    /// is read by hardware, not by this program.
    pub fn write_pair(&mut self, offset: usize, first: u8, second: u8) -> Result<(), DrawError> {
        match offset.checked_add(1) {
            Some(last) if last < self.len => {}
            _ => {
                return Err(DrawError::OutOfRegion {
                    offset,
                    len: self.len,
                })
            }
        }

        // SAFETY: offset + 1 < len, and the constructor guarantees
        // base..base + len is writable for 'a.
        unsafe {
            let cell = self.base.as_ptr().add(offset);
            cell.write_volatile(first);
            cell.add(1).write_volatile(second);
        }
        Ok(())
    }

    /// Read one byte back, or `None` past the end of the region.
    pub fn read(&self, offset: usize) -> Option<u8> {
        if offset >= self.len {
            return None;
        }
        // SAFETY: offset < len.
        Some(unsafe { self.base.as_ptr().add(offset).read_volatile() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_land_at_offset() {
        let mut memory = [0u8; 8];
        let mut region = TextRegion::from_slice(&mut memory);

        region.write_pair(2, b'A', 0x41).unwrap();
        assert_eq!(region.read(2), Some(b'A'));
        assert_eq!(region.read(3), Some(0x41));
        assert_eq!(region.read(8), None);
        drop(region);

        assert_eq!(memory, [0, 0, b'A', 0x41, 0, 0, 0, 0]);
    }

    #[test]
    fn refuses_pair_crossing_the_end() {
        let mut memory = [0u8; 4];
        let mut region = TextRegion::from_slice(&mut memory);

        assert_eq!(
            region.write_pair(3, b'X', 0x0F),
            Err(DrawError::OutOfRegion { offset: 3, len: 4 })
        );
        assert_eq!(
            region.write_pair(usize::MAX, b'X', 0x0F),
            Err(DrawError::OutOfRegion {
                offset: usize::MAX,
                len: 4
            })
        );
        drop(region);

        assert_eq!(memory, [0; 4]);
    }

    #[test]
    fn raw_constructor_rejects_null() {
        let region = unsafe { TextRegion::from_raw(core::ptr::null_mut(), 4000) };
        assert!(region.is_none());
    }

    #[test]
    fn raw_constructor_over_buffer() {
        let mut memory = [0u8; 4];
        let mut region = unsafe { TextRegion::from_raw(memory.as_mut_ptr(), memory.len()) }.unwrap();
        assert_eq!(region.len(), 4);
        assert!(!region.is_empty());
        region.write_pair(0, b'k', 0x20).unwrap();
        assert_eq!(region.read(0), Some(b'k'));
    }
}
