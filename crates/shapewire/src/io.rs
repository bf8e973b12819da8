//! Byte sink and source capabilities.
//!
//! The codec never owns its destination or origin. Encoding writes into any
//! [`ByteSink`]; decoding pulls from any [`ByteSource`]. Both are single-call,
//! forward-only cursors.
//!
//! Sinks cannot fail. Growable buffers satisfy that by construction; for
//! `io::Write` destinations [`IoSink`] keeps the first error aside and hands
//! it back from [`IoSink::finish`].

use std::io::{self, Read, Write};

use bytes::{Buf, BytesMut};

/// Destination of encoded bytes.
pub trait ByteSink {
    /// Append `bytes` at the current write position.
    fn put(&mut self, bytes: &[u8]);
}

/// Origin of encoded bytes.
pub trait ByteSource {
    /// Fill all of `buf` from the current read position.
    ///
    /// Returns `false` if fewer than `buf.len()` bytes were available. The
    /// read position after a `false` return is unspecified.
    fn fill(&mut self, buf: &mut [u8]) -> bool;

    /// Whether a sequence declaring `len` elements may be decoded.
    ///
    /// Called after a length prefix is read and before anything is allocated
    /// for it.
    fn admit_len(&mut self, len: usize) -> bool {
        let _ = len;
        true
    }

    /// Whether `n` more bytes could possibly be supplied.
    ///
    /// Sources that know their remaining size answer exactly; others answer
    /// `true` and let [`fill`](Self::fill) report the shortfall.
    fn admit_bytes(&mut self, n: usize) -> bool {
        let _ = n;
        true
    }
}

impl ByteSink for Vec<u8> {
    #[inline]
    fn put(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

impl ByteSink for BytesMut {
    #[inline]
    fn put(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    #[inline]
    fn put(&mut self, bytes: &[u8]) {
        (**self).put(bytes);
    }
}

/// In-memory sources: `&[u8]`, `Bytes`, `io::Cursor<_>`, `&mut B` and the rest
/// of the `bytes::Buf` family.
impl<B: Buf> ByteSource for B {
    #[inline]
    fn fill(&mut self, buf: &mut [u8]) -> bool {
        if self.remaining() < buf.len() {
            return false;
        }
        self.copy_to_slice(buf);
        true
    }

    #[inline]
    fn admit_bytes(&mut self, n: usize) -> bool {
        self.remaining() >= n
    }
}

/// Sink that only counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteCounter {
    count: usize,
}

impl ByteCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written so far.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl ByteSink for ByteCounter {
    #[inline]
    fn put(&mut self, bytes: &[u8]) {
        self.count += bytes.len();
    }
}

/// Sink over an [`io::Write`].
///
/// The first write error is stored and every later `put` becomes a no-op, so
/// the encode call itself stays infallible. Call [`finish`](Self::finish) to
/// learn whether the output actually landed.
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
    written: usize,
    error: Option<io::Error>,
}

impl<W: Write> IoSink<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0, error: None }
    }

    /// Bytes accepted by the writer so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Whether a write has failed.
    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Flush and return the writer, or the first error seen.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> ByteSink for IoSink<W> {
    fn put(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        match self.inner.write_all(bytes) {
            Ok(()) => self.written += bytes.len(),
            Err(err) => {
                tracing::warn!(written = self.written, error = %err, "sink write failed, dropping remaining output");
                self.error = Some(err);
            },
        }
    }
}

/// Source over an [`io::Read`].
///
/// Short reads are retried until the buffer is full; end of stream and I/O
/// errors both report as a failed fill. The last error is kept for callers
/// that want it.
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
    last_error: Option<io::Error>,
}

impl<R: Read> IoSource<R> {
    /// Wrap a reader.
    pub fn new(inner: R) -> Self {
        Self { inner, last_error: None }
    }

    /// Take the error behind the most recent failed fill.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.last_error.take()
    }

    /// Unwrap the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for IoSource<R> {
    fn fill(&mut self, buf: &mut [u8]) -> bool {
        match self.inner.read_exact(buf) {
            Ok(()) => true,
            Err(err) => {
                self.last_error = Some(err);
                false
            },
        }
    }
}
