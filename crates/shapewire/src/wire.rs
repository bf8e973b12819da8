//! The dispatch engine.
//!
//! [`Encode`] and [`Decode`] are the only entry points the codecs use to
//! recurse: a `Vec<Player>` encodes its count, then asks `Player` to encode
//! each element, which asks each of its fields in turn. Which representation a
//! type gets is decided by its impl, and that impl is chosen by the compiler,
//! so dispatch costs nothing at runtime.
//!
//! # Slice hooks
//!
//! A sequence of primitives is written as one raw block, a sequence of
//! anything else element by element. Rather than specialising `Vec<T>`, the
//! element type carries the decision: [`Encode::encode_slice`] and
//! [`Decode::decode_many`] default to the per-element loop, and primitive
//! impls override them with a block copy.

use crate::{
    error::{DecodeError, Result},
    io::{ByteSink, ByteSource},
    shape::Shaped,
};

/// Upper bound on elements reserved ahead of decoding a general sequence.
///
/// The declared count comes off the wire; the vector grows past this only as
/// elements actually decode.
pub(crate) const MAX_PREALLOC: usize = 4096;

/// Largest element count accepted for a sequence of zero-sized values.
///
/// Zero-sized elements consume no input, so neither the remaining bytes nor a
/// byte budget bound how many of them a declared count can ask for.
pub const MAX_ZERO_SIZED_LEN: usize = 1 << 16;

/// Whether `count` elements of `T` may be materialised.
#[inline]
pub(crate) const fn admits_count<T>(count: usize) -> bool {
    size_of::<T>() != 0 || count <= MAX_ZERO_SIZED_LEN
}

/// Types that can be written to a [`ByteSink`].
pub trait Encode: Shaped {
    /// Write `self` at the sink's current position.
    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S);

    /// Write every item of `items` in order, without a count.
    ///
    /// Primitive types override this with a single raw copy.
    #[doc(hidden)]
    fn encode_slice<S: ByteSink + ?Sized>(items: &[Self], sink: &mut S)
    where
        Self: Sized,
    {
        for item in items {
            item.encode(sink);
        }
    }
}

/// Types that can be reconstructed from a [`ByteSource`].
pub trait Decode: Shaped + Sized {
    /// Read one value from the source's current position.
    fn decode<R: ByteSource + ?Sized>(source: &mut R) -> Result<Self>;

    /// Read exactly `count` values in order.
    ///
    /// Stops at the first failure; values already read are dropped. Primitive
    /// types override this with a single raw read.
    #[doc(hidden)]
    fn decode_many<R: ByteSource + ?Sized>(count: usize, source: &mut R) -> Result<Vec<Self>> {
        if !admits_count::<Self>(count) {
            return Err(DecodeError);
        }
        let mut items = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            items.push(Self::decode(source)?);
        }
        Ok(items)
    }
}

impl<T: Shaped + ?Sized> Shaped for &T {
    const SHAPE: crate::Shape = T::SHAPE;
}

impl<T: Encode + ?Sized> Encode for &T {
    #[inline]
    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        (**self).encode(sink);
    }
}

impl<T: Shaped + ?Sized> Shaped for Box<T> {
    const SHAPE: crate::Shape = T::SHAPE;
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    #[inline]
    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        (**self).encode(sink);
    }
}

impl<T: Decode> Decode for Box<T> {
    #[inline]
    fn decode<R: ByteSource + ?Sized>(source: &mut R) -> Result<Self> {
        T::decode(source).map(Box::new)
    }
}

/// Read the `usize` count that prefixes every variable-length sequence and
/// check it against the source's limits.
///
/// Exposed for [`CustomCodec`](crate::CustomCodec) implementations that frame
/// their own collections.
pub fn decode_len<R: ByteSource + ?Sized>(source: &mut R) -> Result<usize> {
    let len = usize::decode(source)?;
    if source.admit_len(len) { Ok(len) } else { Err(DecodeError) }
}

/// Write a sequence count prefix.
pub fn encode_len<S: ByteSink + ?Sized>(len: usize, sink: &mut S) {
    len.encode(sink);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    #[derive(Debug, PartialEq)]
    struct Counted(u8);

    impl Shaped for Counted {
        const SHAPE: Shape = Shape::Composite(crate::CompositeStyle::Custom { fields: &[] });
    }

    impl Decode for Counted {
        fn decode<R: ByteSource + ?Sized>(source: &mut R) -> Result<Self> {
            u8::decode(source).map(Counted)
        }
    }

    #[test]
    fn decode_many_stops_at_first_failure() {
        let mut source: &[u8] = &[1, 2];
        assert_eq!(Counted::decode_many(3, &mut source), Err(DecodeError));
        assert!(source.is_empty());
    }

    #[test]
    fn decode_many_zero_reads_nothing() {
        let mut source: &[u8] = &[7];
        assert_eq!(Counted::decode_many(0, &mut source), Ok(Vec::new()));
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn boxed_value_is_transparent() {
        let mut sink = Vec::new();
        Box::new(7u16).encode(&mut sink);
        assert_eq!(sink, 7u16.to_ne_bytes());

        let mut source: &[u8] = &sink;
        assert_eq!(Box::<u16>::decode(&mut source), Ok(Box::new(7)));
    }

    #[test]
    fn len_prefix_is_native_usize() {
        let mut sink = Vec::new();
        encode_len(5, &mut sink);
        assert_eq!(sink, 5usize.to_ne_bytes());

        let mut source: &[u8] = &sink;
        assert_eq!(decode_len(&mut source), Ok(5));
    }
}
