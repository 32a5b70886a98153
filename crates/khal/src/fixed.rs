//! Integers constrained to an exact bit width.
//!
//! Hardware register fields are rarely a whole primitive wide: a UART base
//! address is 16 bits, a color is 4. [`FixedWidth`] wraps a primitive and
//! guarantees the stored value fits in `BITS` bits, using plain shift and
//! mask arithmetic rather than any compiler-specific bit-field layout.
//!
//! # Narrowing policy
//!
//! Construction never fails. A value that does not fit is narrowed:
//!
//! * unsigned primitives keep the low `BITS` bits (modulo 2^BITS);
//! * signed primitives keep the low `BITS` bits and sign-extend from the
//!   new top bit (two's-complement truncation).
//!
//! There is no overflow error path. `U16::new(0x1FFFF)` is `0xFFFF`, not an
//! error, so a caller passing a port number or divisor out of range gets a
//! silently different register value.

use core::fmt;
use core::ops::{Add, Div, Mul, Sub};

/// Primitive integers that [`FixedWidth`] can wrap.
///
/// Requires the four basic arithmetic operations; the wrapper itself does
/// not implement them.
pub trait Primitive:
    Copy
    + Eq
    + fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Width of the primitive in bits.
    const BITS: u32;
    const ZERO: Self;

    /// Keep the low `bits` bits of `self` according to the narrowing policy.
    ///
    /// Total for any `bits`: zero keeps nothing, and a width at or above
    /// the primitive's own returns `self` unchanged.
    fn narrow(self, bits: u32) -> Self;
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl Primitive for $t {
            const BITS: u32 = <$t>::BITS;
            const ZERO: Self = 0;

            #[inline]
            fn narrow(self, bits: u32) -> Self {
                if bits >= Self::BITS {
                    self
                } else {
                    self & ((1 << bits) - 1)
                }
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl Primitive for $t {
            const BITS: u32 = <$t>::BITS;
            const ZERO: Self = 0;

            #[inline]
            fn narrow(self, bits: u32) -> Self {
                if bits == 0 {
                    return 0;
                }
                let shift = Self::BITS.saturating_sub(bits);
                // Arithmetic right shift sign-extends from the new top bit.
                self.wrapping_shl(shift).wrapping_shr(shift)
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64, usize);
impl_signed!(i8, i16, i32, i64, isize);

/// A `T` whose value always fits in `BITS` bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedWidth<T: Primitive, const BITS: u32> {
    inner: T,
}

impl<T: Primitive, const BITS: u32> FixedWidth<T, BITS> {
    const WIDTH_OK: () = assert!(
        BITS >= 1 && BITS <= T::BITS,
        "width must be between 1 and the primitive's own width"
    );

    /// Narrows `primitive` to `BITS` bits. Never fails; see the module docs.
    #[inline]
    pub fn new(primitive: T) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::WIDTH_OK;
        Self {
            inner: primitive.narrow(BITS),
        }
    }

    /// The stored value as its primitive type.
    #[inline]
    pub fn raw(self) -> T {
        self.inner
    }
}

impl<T: Primitive, const BITS: u32> Default for FixedWidth<T, BITS> {
    fn default() -> Self {
        Self::new(T::ZERO)
    }
}

impl<T: Primitive, const BITS: u32> From<T> for FixedWidth<T, BITS> {
    fn from(primitive: T) -> Self {
        Self::new(primitive)
    }
}

impl<T: Primitive, const BITS: u32> fmt::Debug for FixedWidth<T, BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedWidth<{}>({:?})", BITS, self.inner)
    }
}

pub type U8 = FixedWidth<u8, 8>;
pub type I8 = FixedWidth<i8, 8>;
pub type U16 = FixedWidth<u32, 16>;
pub type I16 = FixedWidth<i32, 16>;

impl U16 {
    /// The value as a port number or register word. Lossless, since the
    /// stored value already fits in 16 bits.
    #[inline]
    pub fn as_u16(self) -> u16 {
        self.inner as u16
    }
}
