//! Structural binary codec for statically-known Rust types.
//!
//! A value is encoded according to the *shape* of its type, decided at compile
//! time; nothing about the type is written to the wire. Producer and consumer
//! must agree on the type. There is no header, version, tag or checksum.
//!
//! # Shapes
//!
//! | Shape | Types | Wire form |
//! |---|---|---|
//! | Composite | `composite!` types, tuples | fields in declared order |
//! | Primitive | integers, floats, `bool`, `char`, `primitive!` types, arrays of these | raw host-layout bytes |
//! | Optional | `Option<T>` | `bool` flag, payload if present |
//! | Sequence | `Vec<T>`, `[T]`, `String`, `str` | `usize` count, elements |
//! | FixedSequence | `[T; N]` of non-primitives | `N` elements, no count |
//!
//! See [`shape`] for how overlapping rules are resolved.
//!
//! # Host layout
//!
//! Primitives are written in native byte order and counts as native `usize`.
//! An encoding is only meaningful to a reader with the same endianness and
//! pointer width.
//!
//! # Errors
//!
//! Encoding cannot fail. Decoding fails with a bare [`DecodeError`] the moment
//! any read comes up short; no partial value is ever returned. Wrap the source
//! in [`Tracked`] to learn where.
//!
//! # Example
//!
//! ```
//! use shapewire::{composite, from_slice, to_vec};
//!
//! #[derive(Debug, PartialEq)]
//! struct Entry {
//!     key: String,
//!     values: Vec<i32>,
//!     note: Option<String>,
//! }
//!
//! composite!(Entry { key, values, note });
//!
//! let entry = Entry { key: "k".into(), values: vec![1, 2, 3], note: None };
//! let bytes = to_vec(&entry);
//! assert_eq!(from_slice::<Entry>(&bytes), Ok(entry));
//! assert!(from_slice::<Entry>(&bytes[..bytes.len() - 1]).is_err());
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod array;
pub mod composite;
pub mod error;
pub mod instrument;
pub mod io;
pub mod limits;
mod optional;
pub mod primitive;
mod sequence;
pub mod shape;
pub mod wire;

use std::io::{Read, Write};

use bytes::{Bytes, BytesMut};

pub use composite::CustomCodec;
pub use error::{DecodeError, Result};
pub use instrument::{Tracked, decode_traced};
pub use io::{ByteCounter, ByteSink, ByteSource, IoSink, IoSource};
pub use limits::{DecodeLimits, Limited};
pub use shape::{CompositeStyle, SequenceLayout, Shape, Shaped, classify};
pub use wire::{Decode, Encode, decode_len, encode_len};

/// Encode `value` into `sink`.
#[inline]
pub fn encode<T, S>(value: &T, sink: &mut S)
where
    T: Encode + ?Sized,
    S: ByteSink + ?Sized,
{
    value.encode(sink);
}

/// Decode a `T` from `source`.
///
/// Bytes after the value are left in the source.
#[inline]
pub fn decode<T, R>(source: &mut R) -> Result<T>
where
    T: Decode,
    R: ByteSource + ?Sized,
{
    T::decode(source)
}

/// Encode `value` into a new vector.
pub fn to_vec<T: Encode + ?Sized>(value: &T) -> Vec<u8> {
    let mut sink = Vec::with_capacity(encoded_len(value));
    value.encode(&mut sink);
    sink
}

/// Encode `value` into a new [`Bytes`].
pub fn to_bytes<T: Encode + ?Sized>(value: &T) -> Bytes {
    let mut sink = BytesMut::with_capacity(encoded_len(value));
    value.encode(&mut sink);
    sink.freeze()
}

/// Number of bytes `value` encodes to.
pub fn encoded_len<T: Encode + ?Sized>(value: &T) -> usize {
    let mut counter = ByteCounter::new();
    value.encode(&mut counter);
    counter.count()
}

/// Encode `value` into `writer`.
///
/// The encode itself cannot fail; the writer's first error, if any, is
/// returned once encoding is done.
pub fn to_writer<T, W>(value: &T, writer: W) -> std::io::Result<()>
where
    T: Encode + ?Sized,
    W: Write,
{
    let mut sink = IoSink::new(writer);
    value.encode(&mut sink);
    sink.finish().map(drop)
}

/// Decode a `T` that occupies all of `bytes`.
///
/// Trailing bytes are a failure.
pub fn from_slice<T: Decode>(bytes: &[u8]) -> Result<T> {
    from_slice_with_limits(bytes, DecodeLimits::unbounded())
}

/// [`from_slice`] with explicit limits.
pub fn from_slice_with_limits<T: Decode>(bytes: &[u8], limits: DecodeLimits) -> Result<T> {
    let mut source = Limited::new(bytes, limits);
    let value = T::decode(&mut source)?;
    if source.into_inner().is_empty() { Ok(value) } else { Err(DecodeError) }
}

/// Decode a `T` from `reader` under [`DecodeLimits::default`].
///
/// Reads exactly the bytes of one value; the reader is not drained.
pub fn from_reader<T: Decode, R: Read>(reader: R) -> Result<T> {
    let mut source = Limited::new(IoSource::new(reader), DecodeLimits::default());
    T::decode(&mut source)
}
