//! Fault-injecting byte sources, readers and writers.
//!
//! These model the ways a real stream misbehaves: it ends early, it hands out
//! data a byte at a time, or the destination goes away mid-write. They also
//! record how the codec used them, so tests can check that decoding stops
//! reading as soon as something fails.

use std::io::{self, Read, Write};

use shapewire::ByteSource;

/// Source over a byte slice that fails every read reaching past `fail_at`.
#[derive(Debug, Clone)]
pub struct FaultySource<'a> {
    data: &'a [u8],
    pos: usize,
    fail_at: usize,
    fills: usize,
    fills_after_failure: usize,
    failed: bool,
}

impl<'a> FaultySource<'a> {
    /// Source that serves all of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::truncated(data, data.len())
    }

    /// Source that behaves as if `data` ended after `len` bytes.
    pub fn truncated(data: &'a [u8], len: usize) -> Self {
        Self { data, pos: 0, fail_at: len.min(data.len()), fills: 0, fills_after_failure: 0, failed: false }
    }

    /// Bytes handed out so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left before the fault point.
    pub fn remaining(&self) -> usize {
        self.fail_at - self.pos
    }

    /// Fill requests seen, including failed ones.
    pub fn fills(&self) -> usize {
        self.fills
    }

    /// Fill requests made after a fill had already failed.
    pub fn fills_after_failure(&self) -> usize {
        self.fills_after_failure
    }

    /// Whether any fill has failed.
    pub fn has_failed(&self) -> bool {
        self.failed
    }
}

impl ByteSource for FaultySource<'_> {
    fn fill(&mut self, buf: &mut [u8]) -> bool {
        self.fills += 1;
        if self.failed {
            self.fills_after_failure += 1;
            return false;
        }
        if buf.len() > self.remaining() {
            self.failed = true;
            return false;
        }
        let end = self.pos + buf.len();
        buf.copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        true
    }
}

/// Reader that returns at most `chunk` bytes per call.
#[derive(Debug, Clone)]
pub struct StutteringReader<'a> {
    data: &'a [u8],
    chunk: usize,
    calls: usize,
}

impl<'a> StutteringReader<'a> {
    /// Reader over `data` yielding `chunk` bytes at a time (at least one).
    pub fn new(data: &'a [u8], chunk: usize) -> Self {
        Self { data, chunk: chunk.max(1), calls: 0 }
    }

    /// Number of `read` calls served.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Read for StutteringReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        let n = buf.len().min(self.chunk).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Writer that accepts `capacity` bytes, then fails with `BrokenPipe`.
#[derive(Debug, Clone, Default)]
pub struct ClosingWriter {
    accepted: Vec<u8>,
    capacity: usize,
}

impl ClosingWriter {
    /// Writer that closes after `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self { accepted: Vec::new(), capacity }
    }

    /// Bytes accepted before closing.
    pub fn accepted(&self) -> &[u8] {
        &self.accepted
    }
}

impl Write for ClosingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.capacity - self.accepted.len();
        if room == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer closed"));
        }
        let n = buf.len().min(room);
        self.accepted.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
