//! JSON-deserializable schema description.
//!
//! These types describe the layout of a record in a config file shipped with
//! an application and convert into core `bitstring` types:
//!
//! ```json
//! {
//!   "fields": [
//!     { "name": "type", "bits": 16, "kind": "u16" },
//!     { "bits": 16, "kind": "u16", "skip": true },
//!     { "name": "user", "bits": 256, "kind": "bytes" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    errors::PopulateError,
    field::{Field, Kind, PADDING},
    schema::Schema,
};

/// Top-level schema definition.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchemaDef {
    /// Fields in stream order.
    pub fields: Vec<FieldDef>,
}

/// Description of a single field.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FieldDef {
    /// Key in the populated record; padding fields may leave it out.
    #[serde(default = "padding_name")]
    pub name: String,
    /// Bits consumed from the stream.
    pub bits: u32,
    /// `u8`, `u16`, `u32`, `u64` or `bytes`. Anything else is accepted here
    /// and rejected when the schema is compiled.
    pub kind: String,
    /// Consume the bits without storing them.
    #[serde(default)]
    pub skip: bool,
}

fn padding_name() -> String {
    PADDING.to_string()
}

impl From<FieldDef> for Field {
    fn from(value: FieldDef) -> Self {
        Field {
            name: value.name,
            bits: value.bits,
            kind: Kind::from(value.kind.as_str()),
            skip: value.skip,
        }
    }
}

impl From<&Field> for FieldDef {
    fn from(value: &Field) -> Self {
        FieldDef {
            name: value.name.clone(),
            bits: value.bits,
            kind: value.kind.to_string(),
            skip: value.skip,
        }
    }
}

impl TryFrom<SchemaDef> for Schema {
    type Error = PopulateError;

    fn try_from(value: SchemaDef) -> Result<Self, Self::Error> {
        let fields: Vec<Field> = value.fields.into_iter().map(Into::into).collect();
        Schema::compile(&fields)
    }
}

impl From<&Schema> for SchemaDef {
    fn from(value: &Schema) -> Self {
        SchemaDef {
            fields: value.fields().iter().map(Into::into).collect(),
        }
    }
}
