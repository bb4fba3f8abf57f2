//! Typed records: structs whose layout is fixed at compile time.
//!
//! [bit_record!](crate::bit_record) declares a struct, its [Schema] and its
//! [Sink] in one place. Slot kinds come from the field types, so a field of
//! a type without a [crate::Slot] impl does not compile.

use crate::{
    bits::Status, cursor::BitCursor, errors::PopulateError, record::Sink, schema::Schema,
    source::ByteSource,
};

/// A record type with a static layout.
pub trait FromBits: Sink + Default {
    fn schema() -> Schema;

    /// Reads one record. On [Status::Exhausted] the returned value holds the
    /// fields read before the input ran out.
    fn from_bits<S: ByteSource>(
        cursor: &mut BitCursor<S>,
    ) -> Result<(Self, Status), PopulateError> {
        let mut record = Self::default();
        let status = Self::schema().populate_into(cursor, &mut record)?;
        Ok((record, status))
    }
}

/// Declares a struct populated from a bit stream.
///
/// Every field is written `name: type = bits`; padding is written
/// `_: type = bits` and consumes its bits without a struct field. The
/// struct derives `Debug`, `Clone`, `Default`, `PartialEq` and `Eq`.
///
/// ```
/// use bitstring::{BitCursor, FromBits, bit_record};
///
/// bit_record! {
///     pub struct Header {
///         pub version: u8 = 3,
///         _: u8 = 5,
///         pub length: u16 = 12,
///         pub tag: Vec<u8> = 8,
///     }
/// }
///
/// let data = [0b0100_0000, 0x12, 0x34, 0x41];
/// let (header, _) = Header::from_bits(&mut BitCursor::new(&data[..])).unwrap();
/// assert_eq!(header.version, 2);
/// assert_eq!(header.length, 0x123);
/// assert_eq!(header.tag, b"D");
/// ```
#[macro_export]
macro_rules! bit_record {
    (@munch [$($meta:tt)*] [$($vis:tt)*] $name:ident
        fields: [$($fields:tt)*]
        layout: [$($layout:tt)*]
        rest: _ : $ty:ty = $bits:expr $(, $($rest:tt)*)?
    ) => {
        $crate::bit_record!(@munch [$($meta)*] [$($vis)*] $name
            fields: [$($fields)*]
            layout: [$($layout)* $crate::Field::padding($bits, <$ty as $crate::Slot>::KIND),]
            rest: $($($rest)*)?
        );
    };

    (@munch [$($meta:tt)*] [$($vis:tt)*] $name:ident
        fields: [$($fields:tt)*]
        layout: [$($layout:tt)*]
        rest: $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty = $bits:expr $(, $($rest:tt)*)?
    ) => {
        $crate::bit_record!(@munch [$($meta)*] [$($vis)*] $name
            fields: [$($fields)* { [$(#[$fmeta])*] [$fvis] $field : $ty }]
            layout: [$($layout)* $crate::Field::new(stringify!($field), $bits, <$ty as $crate::Slot>::KIND),]
            rest: $($($rest)*)?
        );
    };

    (@munch [$($meta:tt)*] [$($vis:tt)*] $name:ident
        fields: [$({ [$($fmeta:tt)*] [$($fvis:tt)*] $field:ident : $ty:ty })*]
        layout: [$($layout:tt)*]
        rest:
    ) => {
        $($meta)*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        $($vis)* struct $name {
            $($($fmeta)* $($fvis)* $field: $ty,)*
        }

        impl $crate::FromBits for $name {
            fn schema() -> $crate::Schema {
                $crate::Schema::new(::std::vec![$($layout)*])
            }
        }

        impl $crate::Sink for $name {
            #[allow(unused_variables)]
            fn assign(
                &mut self,
                field: &$crate::Field,
                value: $crate::Value,
            ) -> ::core::result::Result<(), $crate::PopulateError> {
                match field.name.as_str() {
                    $(
                        stringify!($field) => {
                            let kind = value.kind();
                            self.$field = <$ty as $crate::Slot>::from_value(value).ok_or_else(|| {
                                $crate::PopulateError::UnsupportedKind {
                                    field: field.name.clone(),
                                    kind: kind.to_string(),
                                }
                            })?;
                        }
                    )*
                    _ => {}
                }
                ::core::result::Result::Ok(())
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($body:tt)*
        }
    ) => {
        $crate::bit_record!(@munch [$(#[$meta])*] [$vis] $name
            fields: []
            layout: []
            rest: $($body)*
        );
    };
}
