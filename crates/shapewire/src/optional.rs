//! `Option<T>`: one `bool` presence byte, then the payload if present.

use crate::{
    error::Result,
    io::{ByteSink, ByteSource},
    shape::{Shape, Shaped},
    wire::{Decode, Encode},
};

impl<T: Shaped> Shaped for Option<T> {
    const SHAPE: Shape = Shape::Optional;
}

impl<T: Encode> Encode for Option<T> {
    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        match self {
            Some(value) => {
                true.encode(sink);
                value.encode(sink);
            },
            None => false.encode(sink),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode<R: ByteSource + ?Sized>(source: &mut R) -> Result<Self> {
        if bool::decode(source)? { T::decode(source).map(Some) } else { Ok(None) }
    }
}
