//! User-defined composite types.
//!
//! Two registration styles, both through [`composite!`](crate::composite!):
//!
//! - **Field list**: `composite!(Player { name, hp, pos })`. The wire form is
//!   each listed field's encoding, in list order, with no tags or names.
//!   Decoding builds a fresh value reading fields in the same order; the first
//!   field that fails aborts the decode and drops whatever was already read.
//!   Tuple structs list indices: `composite!(Meters { 0 })`.
//! - **Custom routine**: implement [`CustomCodec`] and register with
//!   `composite!(Inventory => custom)`. The routine owns the wire form.
//!
//! `composite!(Waypoint { label, pos } => custom)` declares both. The routine
//! wins; the field list survives only in [`Shape`] metadata. A type cannot be
//! registered twice, so there is never a runtime choice between the two.
//!
//! `composite!(Settings { volume, muted } ..Default)` lists a subset of the
//! fields; the rest are not on the wire and decode as `Default::default()`.
//!
//! Tuples up to arity 8 are composites with positional fields.

use crate::{
    error::Result,
    io::{ByteSink, ByteSource},
    shape::{CompositeStyle, Shape, Shaped},
    wire::{Decode, Encode},
};

/// Hand-written wire routine for a composite type.
///
/// `read` must consume exactly the bytes `write` produced and rebuild an equal
/// value. Nested values should go through [`Encode`] / [`Decode`] so they keep
/// their own representation.
pub trait CustomCodec: Sized {
    /// Write `self` to the sink.
    fn write<S: ByteSink + ?Sized>(&self, sink: &mut S);

    /// Read a value written by [`write`](Self::write).
    fn read<R: ByteSource + ?Sized>(source: &mut R) -> Result<Self>;
}

/// Register a composite type. See the [module docs](crate::composite).
///
/// ```
/// #[derive(Debug, PartialEq)]
/// struct Account {
///     id: u64,
///     owner: String,
///     frozen: bool,
/// }
///
/// shapewire::composite!(Account { id, owner, frozen });
///
/// let account = Account { id: 7, owner: "ann".into(), frozen: false };
/// let bytes = shapewire::to_vec(&account);
/// assert_eq!(bytes.len(), 8 + (size_of::<usize>() + 3) + 1);
/// assert_eq!(shapewire::from_slice::<Account>(&bytes), Ok(account));
/// ```
#[macro_export]
macro_rules! composite {
    ($ty:ident => custom) => {
        $crate::composite!(@custom $ty, []);
    };
    ($ty:ident { $($field:tt),+ $(,)? } => custom) => {
        $crate::composite!(@custom $ty, [$($field),+]);
    };
    ($ty:ident { $($field:tt),+ $(,)? } ..Default) => {
        $crate::composite!(@fields $ty, [$($field),+], { ..::core::default::Default::default() });
    };
    ($ty:ident { $($field:tt),+ $(,)? }) => {
        $crate::composite!(@fields $ty, [$($field),+], {});
    };

    (@fields $ty:ident, [$($field:tt),+], { $($rest:tt)* }) => {
        impl $crate::Shaped for $ty {
            const SHAPE: $crate::Shape = $crate::Shape::Composite($crate::CompositeStyle::Fields {
                names: &[$(::core::stringify!($field)),+],
            });
        }

        impl $crate::Encode for $ty {
            fn encode<S: $crate::ByteSink + ?Sized>(&self, sink: &mut S) {
                $( $crate::Encode::encode(&self.$field, sink); )+
            }
        }

        impl $crate::Decode for $ty {
            fn decode<R: $crate::ByteSource + ?Sized>(
                source: &mut R,
            ) -> ::core::result::Result<Self, $crate::DecodeError> {
                ::core::result::Result::Ok(Self {
                    $( $field: $crate::Decode::decode(source)?, )+
                    $($rest)*
                })
            }
        }
    };

    (@custom $ty:ident, [$($field:tt),*]) => {
        impl $crate::Shaped for $ty {
            const SHAPE: $crate::Shape = $crate::Shape::Composite($crate::CompositeStyle::Custom {
                fields: &[$(::core::stringify!($field)),*],
            });
        }

        impl $crate::Encode for $ty {
            #[inline]
            fn encode<S: $crate::ByteSink + ?Sized>(&self, sink: &mut S) {
                $crate::CustomCodec::write(self, sink);
            }
        }

        impl $crate::Decode for $ty {
            #[inline]
            fn decode<R: $crate::ByteSource + ?Sized>(
                source: &mut R,
            ) -> ::core::result::Result<Self, $crate::DecodeError> {
                <Self as $crate::CustomCodec>::read(source)
            }
        }
    };
}

macro_rules! tuple_codec {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: Shaped),+> Shaped for ($($name,)+) {
            const SHAPE: Shape = Shape::Composite(CompositeStyle::Fields {
                names: &[$(stringify!($idx)),+],
            });
        }

        impl<$($name: Encode),+> Encode for ($($name,)+) {
            fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
                $( self.$idx.encode(sink); )+
            }
        }

        impl<$($name: Decode),+> Decode for ($($name,)+) {
            fn decode<R: ByteSource + ?Sized>(source: &mut R) -> Result<Self> {
                Ok(($( $name::decode(source)?, )+))
            }
        }
    };
}

tuple_codec!(A.0);
tuple_codec!(A.0, B.1);
tuple_codec!(A.0, B.1, C.2);
tuple_codec!(A.0, B.1, C.2, D.3);
tuple_codec!(A.0, B.1, C.2, D.3, E.4);
tuple_codec!(A.0, B.1, C.2, D.3, E.4, F.5);
tuple_codec!(A.0, B.1, C.2, D.3, E.4, F.5, G.6);
tuple_codec!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);
