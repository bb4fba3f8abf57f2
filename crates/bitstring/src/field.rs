//! Schema entries: one declared bit width per output slot.

use std::{convert::Infallible, fmt, str::FromStr};

use crate::errors::PopulateError;

/// Name given to padding fields.
pub const PADDING: &str = "_";

/// A single entry of a [crate::Schema].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Key of the value in the populated record.
    pub name: String,
    /// Bits consumed from the stream for this field.
    pub bits: u32,
    /// Slot the bits are read into.
    pub kind: Kind,
    /// Padding: the bits are consumed but never stored.
    pub skip: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, bits: u32, kind: Kind) -> Self {
        Field {
            name: name.into(),
            bits,
            kind,
            skip: false,
        }
    }

    pub fn padding(bits: u32, kind: Kind) -> Self {
        Field {
            name: PADDING.to_string(),
            bits,
            kind,
            skip: true,
        }
    }

    pub fn u8(name: impl Into<String>, bits: u32) -> Self {
        Field::new(name, bits, Kind::U8)
    }

    pub fn u16(name: impl Into<String>, bits: u32) -> Self {
        Field::new(name, bits, Kind::U16)
    }

    pub fn u32(name: impl Into<String>, bits: u32) -> Self {
        Field::new(name, bits, Kind::U32)
    }

    pub fn u64(name: impl Into<String>, bits: u32) -> Self {
        Field::new(name, bits, Kind::U64)
    }

    /// A byte-array field of `len` whole bytes. Lengths past `u32::MAX / 8`
    /// saturate, and [Field::check] rejects the result as a partial byte.
    pub fn bytes(name: impl Into<String>, len: u32) -> Self {
        Field::new(name, len.saturating_mul(8), Kind::Bytes)
    }

    /// Checks the declared width against the slot kind.
    pub fn check(&self) -> Result<(), PopulateError> {
        match &self.kind {
            Kind::Other(kind) => Err(PopulateError::UnsupportedKind {
                field: self.name.clone(),
                kind: kind.clone(),
            }),
            Kind::Bytes if self.bits % 8 != 0 => Err(PopulateError::PartialByte {
                field: self.name.clone(),
                bits: self.bits,
            }),
            Kind::Bytes => Ok(()),
            kind => match kind.capacity() {
                Some(capacity) if self.bits > capacity => Err(PopulateError::SizeOverflow {
                    field: self.name.clone(),
                    requested: self.bits,
                    capacity,
                }),
                _ => Ok(()),
            },
        }
    }
}

/// The storage kind of an output slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    U8,
    U16,
    U32,
    U64,
    /// Whole bytes, read at any bit alignment.
    Bytes,
    /// A kind named by a schema that no reader exists for (e.g. `i32`).
    Other(String),
}

impl Kind {
    /// Maximum bits a numeric slot of this kind holds.
    pub fn capacity(&self) -> Option<u32> {
        match self {
            Kind::U8 => Some(u8::BITS),
            Kind::U16 => Some(u16::BITS),
            Kind::U32 => Some(u32::BITS),
            Kind::U64 => Some(u64::BITS),
            Kind::Bytes | Kind::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Bytes => "bytes",
            Kind::Other(name) => name,
        }
    }
}

impl FromStr for Kind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "u8" => Kind::U8,
            "u16" => Kind::U16,
            "u32" => Kind::U32,
            "u64" => Kind::U64,
            "bytes" => Kind::Bytes,
            other => Kind::Other(other.to_string()),
        })
    }
}

impl From<&str> for Kind {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
