//! Fills a [Sink] field by field from a [BitCursor].
//!
//! Each call walks the fields in declaration order, reading every field's
//! declared width with the reader for its slot kind:
//!
//! ```text
//! Idle -> Reading (per field) -> Idle | Exhausted | Failed
//! ```
//!
//! Width and kind are checked before the cursor is touched, so a bad field
//! never consumes input. When the source runs dry the field being read still
//! receives the partial value and the call stops with [Status::Exhausted].

use tracing::{debug, trace};

use crate::{
    bits::{Extracted, Status},
    cursor::BitCursor,
    errors::PopulateError,
    field::{Field, Kind},
    record::{Sink, Value},
    source::ByteSource,
};

/// Populates `sink` from `fields`. On error, fields before the failing one
/// stay assigned.
pub fn populate_into<S, R>(
    fields: &[Field],
    cursor: &mut BitCursor<S>,
    sink: &mut R,
) -> Result<Status, PopulateError>
where
    S: ByteSource,
    R: Sink + ?Sized,
{
    for (index, field) in fields.iter().enumerate() {
        let extracted = read_field(field, cursor)?;
        let status = extracted.status;

        trace!(
            field = field.name.as_str(),
            bits = extracted.bits,
            skip = field.skip,
            "read field"
        );

        if !field.skip {
            sink.assign(field, extracted.value)?;
        }

        if status == Status::Exhausted {
            debug!(
                field = field.name.as_str(),
                position = index,
                remaining = fields.len() - index - 1,
                "input exhausted mid-record"
            );
            return Ok(Status::Exhausted);
        }
    }

    Ok(Status::Complete)
}

fn read_field<S: ByteSource>(
    field: &Field,
    cursor: &mut BitCursor<S>,
) -> Result<Extracted<Value>, PopulateError> {
    field.check()?;

    let named = |err| PopulateError::from_read(err, &field.name);
    let extracted = match field.kind {
        Kind::U8 => cursor.read_u8(field.bits).map_err(named)?.map(Value::U8),
        Kind::U16 => cursor.read_u16(field.bits).map_err(named)?.map(Value::U16),
        Kind::U32 => cursor.read_u32(field.bits).map_err(named)?.map(Value::U32),
        Kind::U64 => cursor.read_u64(field.bits).map_err(named)?.map(Value::U64),
        Kind::Bytes => cursor
            .read_bytes(field.bits as usize / 8)
            .map_err(named)?
            .map(Value::Bytes),
        // rejected by `check`
        Kind::Other(ref kind) => {
            return Err(PopulateError::UnsupportedKind {
                field: field.name.clone(),
                kind: kind.clone(),
            });
        }
    };

    Ok(extracted)
}
