//! Decode-side limits.
//!
//! The format trusts declared lengths. In-memory sources already refuse a
//! length that exceeds what is left in the buffer, but a streaming source has
//! no idea how much is coming, so a corrupt count could ask for an enormous
//! allocation. [`Limited`] caps both the element count of any one sequence and
//! the total bytes a single decode may consume. Limits never change what goes
//! on the wire.

use crate::io::ByteSource;

/// Default byte budget for one decode (16 MiB).
pub const DEFAULT_MAX_TOTAL_BYTES: usize = 16 * 1024 * 1024;

/// Limits applied while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Largest element count any one sequence may declare.
    pub max_sequence_len: usize,
    /// Largest number of bytes a decode may consume in total.
    pub max_total_bytes: usize,
}

impl DecodeLimits {
    /// No limits beyond what the source itself enforces.
    pub const fn unbounded() -> Self {
        Self { max_sequence_len: usize::MAX, max_total_bytes: usize::MAX }
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self { max_sequence_len: DEFAULT_MAX_TOTAL_BYTES, max_total_bytes: DEFAULT_MAX_TOTAL_BYTES }
    }
}

/// Source wrapper that enforces [`DecodeLimits`].
#[derive(Debug, Clone)]
pub struct Limited<S> {
    inner: S,
    limits: DecodeLimits,
    consumed: usize,
}

impl<S: ByteSource> Limited<S> {
    /// Wrap `inner` with the given limits.
    pub fn new(inner: S, limits: DecodeLimits) -> Self {
        Self { inner, limits, consumed: 0 }
    }

    /// Bytes consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// The active limits.
    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }

    /// Unwrap the inner source.
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn within_budget(&self, n: usize) -> bool {
        self.consumed.checked_add(n).is_some_and(|total| total <= self.limits.max_total_bytes)
    }
}

impl<S: ByteSource> ByteSource for Limited<S> {
    fn fill(&mut self, buf: &mut [u8]) -> bool {
        if !self.within_budget(buf.len()) {
            return false;
        }
        let filled = self.inner.fill(buf);
        if filled {
            self.consumed += buf.len();
        }
        filled
    }

    fn admit_len(&mut self, len: usize) -> bool {
        len <= self.limits.max_sequence_len && self.inner.admit_len(len)
    }

    fn admit_bytes(&mut self, n: usize) -> bool {
        self.within_budget(n) && self.inner.admit_bytes(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decode, DecodeError, to_vec};

    #[test]
    fn default_limits_are_bounded() {
        let limits = DecodeLimits::default();
        assert_eq!(limits.max_total_bytes, DEFAULT_MAX_TOTAL_BYTES);
        assert!(limits.max_sequence_len < usize::MAX);
    }

    #[test]
    fn within_limits_decodes() {
        let bytes = to_vec(&vec![1u8, 2, 3]);
        let mut source = Limited::new(bytes.as_slice(), DecodeLimits::default());
        assert_eq!(Vec::<u8>::decode(&mut source), Ok(vec![1, 2, 3]));
        assert_eq!(source.consumed(), bytes.len());
        assert_eq!(source.limits(), DecodeLimits::default());
    }

    #[test]
    fn long_sequence_is_rejected_before_payload() {
        let bytes = to_vec(&vec![0u16; 10]);
        let limits = DecodeLimits { max_sequence_len: 4, ..DecodeLimits::unbounded() };
        let mut source = Limited::new(bytes.as_slice(), limits);
        assert_eq!(Vec::<u16>::decode(&mut source), Err(DecodeError));
        assert_eq!(source.consumed(), size_of::<usize>());
    }

    #[test]
    fn byte_budget_caps_total_consumption() {
        let value = (7u64, 9u64);
        let bytes = to_vec(&value);
        let limits = DecodeLimits { max_total_bytes: 12, ..DecodeLimits::unbounded() };
        let mut source = Limited::new(bytes.as_slice(), limits);
        assert_eq!(<(u64, u64)>::decode(&mut source), Err(DecodeError));
        assert_eq!(source.consumed(), 8);
    }
}
