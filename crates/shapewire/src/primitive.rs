//! Fixed-size raw codec.
//!
//! A primitive is written as its in-memory bytes, `size_of::<T>()` of them,
//! with no framing and no byte-order conversion: the host layout is the wire
//! layout. Layout safety comes from zerocopy. A type may only be registered
//! with [`primitive!`](crate::primitive!) if it is `IntoBytes + FromBytes +
//! Immutable`, which rules out padding, pointers and types with invalid bit
//! patterns at compile time.
//!
//! `bool` and `char` have invalid bit patterns, so they get hand-written impls
//! that still classify as Primitive: `bool` is one byte (nonzero reads as
//! true), `char` is its `u32` scalar value and fails to decode if the scalar
//! is invalid.

use std::iter;

use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::{
    error::{DecodeError, Result},
    io::{ByteSink, ByteSource},
    shape::{Shape, Shaped},
    wire::{Decode, Encode, admits_count},
};

/// Register bitwise-copyable types as Primitive.
///
/// The type must be padding-free and valid for every bit pattern. For a
/// struct that means `#[repr(C)]` (or `transparent`) and deriving zerocopy's
/// `FromBytes`, `IntoBytes`, `Immutable` and `KnownLayout`:
///
/// ```
/// use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
///
/// #[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
/// #[repr(C)]
/// struct Vec3 {
///     x: f32,
///     y: f32,
///     z: f32,
/// }
///
/// shapewire::primitive!(Vec3);
///
/// let v = Vec3 { x: 1.0, y: 2.0, z: 3.0 };
/// let bytes = shapewire::to_vec(&v);
/// assert_eq!(bytes.len(), 12);
/// assert_eq!(shapewire::from_slice::<Vec3>(&bytes), Ok(v));
/// ```
///
/// A type that does not meet the layout requirements fails to compile.
#[macro_export]
macro_rules! primitive {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Shaped for $ty {
                const SHAPE: $crate::Shape =
                    $crate::Shape::Primitive { size: ::core::mem::size_of::<$ty>() };
            }

            impl $crate::Encode for $ty {
                #[inline]
                fn encode<S: $crate::ByteSink + ?Sized>(&self, sink: &mut S) {
                    $crate::primitive::write_raw(self, sink);
                }

                #[inline]
                fn encode_slice<S: $crate::ByteSink + ?Sized>(items: &[Self], sink: &mut S) {
                    $crate::primitive::write_raw_slice(items, sink);
                }
            }

            impl $crate::Decode for $ty {
                #[inline]
                fn decode<R: $crate::ByteSource + ?Sized>(
                    source: &mut R,
                ) -> ::core::result::Result<Self, $crate::DecodeError> {
                    $crate::primitive::read_raw(source)
                }

                #[inline]
                fn decode_many<R: $crate::ByteSource + ?Sized>(
                    count: usize,
                    source: &mut R,
                ) -> ::core::result::Result<::std::vec::Vec<Self>, $crate::DecodeError> {
                    $crate::primitive::read_raw_vec(count, source)
                }
            }
        )+
    };
}

/// Write the raw bytes of one value.
#[inline]
pub fn write_raw<T, S>(value: &T, sink: &mut S)
where
    T: IntoBytes + Immutable,
    S: ByteSink + ?Sized,
{
    sink.put(value.as_bytes());
}

/// Write the raw bytes of a slice as one block.
#[inline]
pub fn write_raw_slice<T, S>(items: &[T], sink: &mut S)
where
    T: IntoBytes + Immutable,
    S: ByteSink + ?Sized,
{
    sink.put(items.as_bytes());
}

/// Read one value from exactly `size_of::<T>()` bytes.
#[inline]
pub fn read_raw<T, R>(source: &mut R) -> Result<T>
where
    T: FromBytes + IntoBytes,
    R: ByteSource + ?Sized,
{
    let mut value = T::new_zeroed();
    if source.fill(value.as_mut_bytes()) { Ok(value) } else { Err(DecodeError) }
}

/// Read `count` values as one block of `count * size_of::<T>()` bytes.
///
/// The byte total is checked against the source before anything is
/// allocated; an overflowing total fails. Zero-sized `T` is capped at
/// [`MAX_ZERO_SIZED_LEN`](crate::wire::MAX_ZERO_SIZED_LEN) elements.
pub fn read_raw_vec<T, R>(count: usize, source: &mut R) -> Result<Vec<T>>
where
    T: FromBytes + IntoBytes,
    R: ByteSource + ?Sized,
{
    let total = count.checked_mul(size_of::<T>()).ok_or(DecodeError)?;
    if !admits_count::<T>(count) || !source.admit_bytes(total) {
        return Err(DecodeError);
    }
    let mut items: Vec<T> = iter::repeat_with(T::new_zeroed).take(count).collect();
    if source.fill(items.as_mut_slice().as_mut_bytes()) { Ok(items) } else { Err(DecodeError) }
}

primitive!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, ());

impl Shaped for bool {
    const SHAPE: Shape = Shape::Primitive { size: 1 };
}

impl Encode for bool {
    #[inline]
    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        sink.put(&[u8::from(*self)]);
    }

    #[inline]
    fn encode_slice<S: ByteSink + ?Sized>(items: &[Self], sink: &mut S) {
        write_raw_slice(items, sink);
    }
}

impl Decode for bool {
    #[inline]
    fn decode<R: ByteSource + ?Sized>(source: &mut R) -> Result<Self> {
        u8::decode(source).map(|byte| byte != 0)
    }

    fn decode_many<R: ByteSource + ?Sized>(count: usize, source: &mut R) -> Result<Vec<Self>> {
        let raw = u8::decode_many(count, source)?;
        Ok(raw.into_iter().map(|byte| byte != 0).collect())
    }
}

impl Shaped for char {
    const SHAPE: Shape = Shape::Primitive { size: size_of::<u32>() };
}

impl Encode for char {
    #[inline]
    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        u32::from(*self).encode(sink);
    }
}

impl Decode for char {
    #[inline]
    fn decode<R: ByteSource + ?Sized>(source: &mut R) -> Result<Self> {
        char::from_u32(u32::decode(source)?).ok_or(DecodeError)
    }
}
