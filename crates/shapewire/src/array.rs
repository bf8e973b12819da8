//! Fixed-size arrays `[T; N]`.
//!
//! `N` is part of the type, so no count is written: the wire form is the `N`
//! element encodings back to back. An array of primitives classifies as
//! Primitive itself and goes out as one raw block.

use crate::{
    error::{DecodeError, Result},
    io::{ByteSink, ByteSource},
    shape::{Shape, Shaped},
    wire::{Decode, Encode},
};

impl<T: Shaped, const N: usize> Shaped for [T; N] {
    const SHAPE: Shape = T::SHAPE.array_of(N);
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    #[inline]
    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        T::encode_slice(self, sink);
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode<R: ByteSource + ?Sized>(source: &mut R) -> Result<Self> {
        let items = T::decode_many(N, source)?;
        // `decode_many` returns exactly N items on success.
        Self::try_from(items).map_err(|_| DecodeError)
    }
}
