//! Error types for bit extraction and record population.
//!
//! Running out of input is not an error: it is reported as
//! [crate::Status::Exhausted] next to whatever partial data was read.

use std::io;

use thiserror::Error;

/// Errors produced by [crate::BitCursor] reads.
#[derive(Debug, Error)]
pub enum ReadError {
    /// More bits were requested than the target integer can hold.
    #[error("requested {requested} bits but the target holds at most {capacity}")]
    SizeOverflow { requested: u32, capacity: u32 },
    /// The byte source failed with something other than end-of-input.
    #[error("byte source failed: {0}")]
    Source(#[from] io::Error),
}

/// Errors produced while populating a record from a schema.
#[derive(Debug, Error)]
pub enum PopulateError {
    /// A field declares more bits than its slot kind can hold.
    #[error("field `{field}` declares {requested} bits but its slot holds at most {capacity}")]
    SizeOverflow {
        field: String,
        requested: u32,
        capacity: u32,
    },
    /// A byte-array field whose width is not a whole number of bytes.
    #[error("field `{field}` is a byte array of {bits} bits, not a multiple of 8")]
    PartialByte { field: String, bits: u32 },
    /// The schema names a slot kind the populator cannot fill.
    #[error("field `{field}` has unsupported kind `{kind}`")]
    UnsupportedKind { field: String, kind: String },
    /// The byte source failed with something other than end-of-input.
    #[error("byte source failed: {0}")]
    Source(#[from] io::Error),
}

impl PopulateError {
    /// Attaches the name of the field being read to a cursor error.
    pub(crate) fn from_read(err: ReadError, field: &str) -> Self {
        match err {
            ReadError::SizeOverflow {
                requested,
                capacity,
            } => PopulateError::SizeOverflow {
                field: field.to_string(),
                requested,
                capacity,
            },
            ReadError::Source(err) => PopulateError::Source(err),
        }
    }
}

impl From<ReadError> for PopulateError {
    fn from(err: ReadError) -> Self {
        PopulateError::from_read(err, "")
    }
}
