//! # bitstring
//!
//! Reads unsigned bit fields of 1 to 64 bits from a byte stream and fills
//! records from declarative bit-width schemas.
//!
//! A [BitCursor] pulls one byte at a time from any [std::io::Read] and hands
//! out MSB-first values, carrying unused bits of a byte over to the next
//! read. A [Schema] lists the fields of a record (width, slot kind, padding)
//! and populates a [Record] from a cursor. Running out of input is reported
//! as [Status::Exhausted] next to the partial data, not as an error.
//!
//! ## Example
//!
//! ```
//! use bitstring::{BitCursor, Field, Kind, Schema, Status, Value};
//!
//! let schema = Schema::compile(&[
//!     Field::u8("version", 3),
//!     Field::padding(5, Kind::U8),
//!     Field::u16("length", 12),
//! ])
//! .unwrap();
//!
//! let data = [0b0100_0000, 0x12, 0x34];
//! let mut cursor = BitCursor::new(&data[..]);
//! let (record, status) = schema.populate(&mut cursor).unwrap();
//!
//! assert_eq!(status, Status::Complete);
//! assert_eq!(record.get("version"), Some(&Value::U8(2)));
//! assert_eq!(record.get("length"), Some(&Value::U16(0x123)));
//! ```

pub mod bits;
pub mod cursor;
pub mod errors;
pub mod field;
pub mod populate;
pub mod record;
pub mod schema;
#[cfg(feature = "serde")]
pub mod serde;
pub mod source;
pub mod typed;

pub use bits::{Extracted, Status, Unsigned};
pub use cursor::BitCursor;
pub use errors::{PopulateError, ReadError};
pub use field::{Field, Kind};
pub use populate::populate_into;
pub use record::{Record, Sink, Slot, Value};
pub use schema::Schema;
pub use source::ByteSource;
pub use typed::FromBits;
