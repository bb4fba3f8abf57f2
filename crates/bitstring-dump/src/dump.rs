use std::io::{Read, Write};

use anyhow::{Context, Result, bail};
use bitstring::{BitCursor, Schema, Status};
use tracing::{debug, warn};

use crate::convert::record_to_json;

pub struct DumpOptions {
    /// Bytes sliced off the input per record.
    pub record_size: usize,
    /// Render byte fields as text.
    pub text: bool,
    /// Fail on a trailing partial record.
    pub strict: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub records: usize,
    /// Bytes left over after the last whole record.
    pub trailing_bytes: usize,
}

/// Slices `input` into records of `record_size` bytes and writes each one,
/// populated through `schema`, as a JSON line.
pub fn dump<R: Read, W: Write>(
    schema: &Schema,
    input: R,
    out: &mut W,
    options: &DumpOptions,
) -> Result<Summary> {
    if options.record_size == 0 {
        bail!("record size must be at least one byte");
    }
    if (options.record_size as u64) * 8 < schema.total_bits() {
        warn!(
            record_size = options.record_size,
            schema_bits = schema.total_bits(),
            "records are shorter than the schema; trailing fields will be cut"
        );
    }

    let mut cursor = BitCursor::new(input);
    let mut summary = Summary::default();

    loop {
        let chunk = cursor
            .read_bytes(options.record_size)
            .context("failed to read input")?;

        if chunk.is_exhausted() {
            summary.trailing_bytes = chunk.value.len();
            if summary.trailing_bytes > 0 {
                if options.strict {
                    bail!(
                        "input ends with a partial record of {} bytes",
                        summary.trailing_bytes
                    );
                }
                warn!(bytes = summary.trailing_bytes, "ignoring trailing partial record");
            }
            break;
        }

        let mut record_cursor = BitCursor::new(chunk.value.as_slice());
        let (record, status) = schema
            .populate(&mut record_cursor)
            .with_context(|| format!("failed to populate record {}", summary.records))?;
        if status == Status::Exhausted {
            debug!(record = summary.records, "record ran out before the schema did");
        }

        serde_json::to_writer(&mut *out, &record_to_json(&record, options.text))?;
        out.write_all(b"\n")?;
        summary.records += 1;
    }

    Ok(summary)
}
