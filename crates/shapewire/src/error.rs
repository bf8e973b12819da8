//! Decode failure type.
//!
//! Encoding cannot fail, so there is only one error type and it carries no
//! payload: a decode either produces a complete value or reports that the
//! required bytes (or a nested value) could not be obtained. Callers that need
//! an offset or a reason wrap their source in
//! [`Tracked`](crate::instrument::Tracked).

use thiserror::Error;

/// A decode could not produce a value.
///
/// Short reads, invalid `char` scalars, invalid UTF-8 and rejected declared
/// lengths all collapse into this one marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Error)]
#[error("decode failed: required bytes unavailable")]
pub struct DecodeError;

/// Result type for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_stable() {
        assert_eq!(DecodeError.to_string(), "decode failed: required bytes unavailable");
    }

    #[test]
    fn errors_compare_equal() {
        let a: Result<u8> = Err(DecodeError);
        let b: Result<u8> = Err(DecodeError::default());
        assert_eq!(a, b);
    }
}
