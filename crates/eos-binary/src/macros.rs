//! Record declarations.

/// Declares a struct whose wire layout is its field list, in order.
///
/// Generates [`Decode`](crate::codec::Decode),
/// [`Encode`](crate::codec::Encode) and
/// [`Describe`](crate::codec::Describe) impls, plus a `descriptor()`
/// function returning the record's
/// [`TypeDescriptor`](crate::model::TypeDescriptor), built on first use and
/// shared afterwards. Every field type must implement all three traits.
///
/// ```rust
/// use eos_binary::{binary_struct, decode_rows, Name};
///
/// binary_struct! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Currency {
///         pub precision: u8,
///         pub name: Name,
///     }
/// }
///
/// binary_struct! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Balance {
///         pub currency: Currency,
///         pub balance: u64,
///     }
/// }
///
/// let mut rows: Vec<Balance> = Vec::new();
/// decode_rows(&["040000000000ea30550a00000000000000"], &mut rows).unwrap();
/// assert_eq!(rows[0].currency.name.to_string(), "eosio");
/// assert_eq!(rows[0].balance, 10);
/// assert_eq!(Balance::descriptor().to_string(), "Balance { currency: Currency, balance: uint64 }");
/// ```
#[macro_export]
macro_rules! binary_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $name {
            /// Wire layout of this record.
            pub fn descriptor() -> ::std::sync::Arc<$crate::model::TypeDescriptor> {
                $crate::__private::lazy_static! {
                    static ref DESCRIPTOR: ::std::sync::Arc<$crate::model::TypeDescriptor> =
                        $crate::model::TypeDescriptor::builder(stringify!($name))
                            $(
                                .field(
                                    stringify!($field),
                                    <$ty as $crate::codec::Describe>::field_kind(),
                                )
                            )*
                            .build_shared();
                }
                ::std::sync::Arc::clone(&DESCRIPTOR)
            }
        }

        impl $crate::codec::Decode for $name {
            const MIN_WIDTH: usize = 0 $(+ <$ty as $crate::codec::Decode>::MIN_WIDTH)*;

            fn decode(
                #[allow(unused_variables)] reader: &mut $crate::codec::Reader<'_>,
                _context: &'static str,
            ) -> ::std::result::Result<Self, $crate::DecodeError> {
                // Struct literal fields evaluate in source order, which is wire order.
                ::std::result::Result::Ok(Self {
                    $(
                        $field: <$ty as $crate::codec::Decode>::decode(reader, stringify!($field))?,
                    )*
                })
            }
        }

        impl $crate::codec::Encode for $name {
            fn encode(&self, #[allow(unused_variables)] writer: &mut $crate::codec::Writer) {
                $(
                    $crate::codec::Encode::encode(&self.$field, writer);
                )*
            }
        }

        impl $crate::codec::Describe for $name {
            fn field_kind() -> $crate::model::FieldKind {
                $crate::model::FieldKind::Record(Self::descriptor())
            }
        }
    };
}
