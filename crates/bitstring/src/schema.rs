//! Schema: ordered list of fields used to populate records from a bit stream.

use crate::{
    bits::Status,
    cursor::BitCursor,
    errors::PopulateError,
    field::Field,
    populate::populate_into,
    record::{Record, Sink},
    source::ByteSource,
};

/// An ordered set of [Field]s. Build one with [Schema::new] or, to reject bad
/// widths and kinds upfront, [Schema::compile]; then [Schema::populate] records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Wraps `fields` without validation; bad fields fail when reached.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Validates every field before accepting the schema.
    pub fn compile(fields: &[Field]) -> Result<Self, PopulateError> {
        for field in fields {
            field.check()?;
        }

        Ok(Self {
            fields: fields.to_vec(),
        })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Bits one record spans, padding included.
    pub fn total_bits(&self) -> u64 {
        self.fields.iter().map(|field| u64::from(field.bits)).sum()
    }

    /// Whole bytes one record spans, rounding up.
    pub fn record_len(&self) -> usize {
        self.total_bits().div_ceil(8) as usize
    }

    /// Populates a fresh [Record]. Any error discards the partial record;
    /// use [Schema::populate_into] to keep it.
    pub fn populate<S: ByteSource>(
        &self,
        cursor: &mut BitCursor<S>,
    ) -> Result<(Record, Status), PopulateError> {
        let mut record = Record::new();
        let status = self.populate_into(cursor, &mut record)?;
        Ok((record, status))
    }

    pub fn populate_into<S, R>(
        &self,
        cursor: &mut BitCursor<S>,
        sink: &mut R,
    ) -> Result<Status, PopulateError>
    where
        S: ByteSource,
        R: Sink + ?Sized,
    {
        populate_into(&self.fields, cursor, sink)
    }
}

impl From<Vec<Field>> for Schema {
    fn from(fields: Vec<Field>) -> Self {
        Schema::new(fields)
    }
}
