//! Unsigned slot widths and the result type of a cursor read.
//!
//! Bits are consumed MSB-first: the first bit read ends up as the most
//! significant bit of the right-aligned result.

use std::fmt::Debug;

/// Unsigned integer a [crate::BitCursor] can read into.
pub trait Unsigned: Copy + Default + Debug + Into<u64> {
    /// Capacity in bits.
    const BITS: u32;

    /// Truncates `value` to this width.
    fn from_u64(value: u64) -> Self;
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {
        $(
            impl Unsigned for $t {
                const BITS: u32 = <$t>::BITS;

                #[inline]
                fn from_u64(value: u64) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_unsigned!(u8, u16, u32, u64);

/// Whether a read got every bit it asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Complete,
    /// The source ended; the accompanying value holds fewer bits than requested.
    Exhausted,
}

/// A value read from the stream together with how many of its bits are real.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<T> {
    pub value: T,
    /// Valid bits in `value`, right-aligned.
    pub bits: usize,
    pub status: Status,
}

impl<T> Extracted<T> {
    pub(crate) fn complete(value: T, bits: usize) -> Self {
        Extracted {
            value,
            bits,
            status: Status::Complete,
        }
    }

    pub(crate) fn exhausted(value: T, bits: usize) -> Self {
        Extracted {
            value,
            bits,
            status: Status::Exhausted,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.status == Status::Exhausted
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extracted<U> {
        Extracted {
            value: f(self.value),
            bits: self.bits,
            status: self.status,
        }
    }
}

/// Right-aligns the top `n` bits of a left-aligned byte. `n` must be in `0..=8`.
#[inline]
pub(crate) fn high_bits(byte: u8, n: u32) -> u8 {
    if n == 0 {
        0
    } else {
        byte >> (8 - n)
    }
}

/// Shifts a byte left, yielding 0 once every bit has been shifted out.
#[inline]
pub(crate) fn shl_byte(byte: u8, n: u32) -> u8 {
    byte.checked_shl(n).unwrap_or(0)
}
