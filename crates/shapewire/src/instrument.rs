//! Diagnostics for decode failures.
//!
//! [`DecodeError`](crate::DecodeError) says nothing about where or why a
//! decode failed. Wrapping the source in [`Tracked`] records the byte offset of
//! every read and the offset of the first failed one, and reports the failure
//! through `tracing`. [`decode_traced`] additionally opens a span naming the
//! target type and its shape.

use std::any::type_name;

use crate::{error::Result, io::ByteSource, wire::Decode};

/// Source wrapper that tracks the read offset.
#[derive(Debug, Clone)]
pub struct Tracked<S> {
    inner: S,
    offset: usize,
    reads: usize,
    failed_at: Option<usize>,
}

impl<S: ByteSource> Tracked<S> {
    /// Wrap `inner`, starting at offset zero.
    pub fn new(inner: S) -> Self {
        Self { inner, offset: 0, reads: 0, failed_at: None }
    }

    /// Bytes successfully read so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of fill requests seen, including failed ones.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Offset at which the first failed read was requested.
    pub fn failed_at(&self) -> Option<usize> {
        self.failed_at
    }

    /// Unwrap the inner source.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ByteSource> ByteSource for Tracked<S> {
    fn fill(&mut self, buf: &mut [u8]) -> bool {
        self.reads += 1;
        if self.inner.fill(buf) {
            self.offset += buf.len();
            return true;
        }
        tracing::debug!(offset = self.offset, requested = buf.len(), "short read");
        self.failed_at.get_or_insert(self.offset);
        false
    }

    fn admit_len(&mut self, len: usize) -> bool {
        let admitted = self.inner.admit_len(len);
        if !admitted {
            tracing::debug!(offset = self.offset, len, "declared length rejected");
            self.failed_at.get_or_insert(self.offset);
        }
        admitted
    }

    fn admit_bytes(&mut self, n: usize) -> bool {
        let admitted = self.inner.admit_bytes(n);
        if !admitted {
            tracing::debug!(offset = self.offset, requested = n, "byte count rejected");
            self.failed_at.get_or_insert(self.offset);
        }
        admitted
    }
}

/// Decode a `T` inside a `tracing` span that names the type and its shape.
pub fn decode_traced<T, S>(source: &mut Tracked<S>) -> Result<T>
where
    T: Decode,
    S: ByteSource,
{
    let shape = T::SHAPE;
    let span = tracing::debug_span!("decode", ty = type_name::<T>(), shape = ?shape);
    let _guard = span.enter();
    let result = T::decode(source);
    match &result {
        Ok(_) => tracing::trace!(consumed = source.offset(), "decoded"),
        Err(_) => tracing::debug!(failed_at = ?source.failed_at(), "decode failed"),
    }
    result
}
