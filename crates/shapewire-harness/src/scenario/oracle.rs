//! Reusable oracles.
//!
//! Each function returns an [`OracleFn`] that checks one property over every
//! case in the [`World`]. Combine them with [`all_of`], or use
//! [`codec_laws`] for the full set every codec must satisfy.

use shapewire::Shape;

use crate::scenario::{OracleFn, World};

/// Every case decodes back to an equal value.
pub fn round_trips() -> OracleFn {
    Box::new(|world: &World| {
        for case in world.cases() {
            if !case.round_trip {
                return Err(format!("case '{}' ({}) did not round-trip", case.label, case.type_name));
            }
        }
        Ok(())
    })
}

/// Every full decode consumed exactly the bytes encoding produced.
pub fn consumes_exactly() -> OracleFn {
    Box::new(|world: &World| {
        for case in world.cases() {
            if !case.consumed_exactly {
                return Err(format!("case '{}' did not consume exactly its encoding", case.label));
            }
        }
        Ok(())
    })
}

/// Every strict prefix of every encoding fails to decode.
pub fn truncations_fail() -> OracleFn {
    Box::new(|world: &World| {
        for case in world.cases() {
            if let Some(cut) = case.truncation_successes.first() {
                return Err(format!(
                    "case '{}' decoded from a {}-byte prefix of its {}-byte encoding",
                    case.label,
                    cut,
                    case.encoded_len()
                ));
            }
        }
        Ok(())
    })
}

/// No decode issues a read after one has failed.
pub fn no_reads_after_failure() -> OracleFn {
    Box::new(|world: &World| {
        for case in world.cases() {
            if let Some(cut) = case.reads_after_failure.first() {
                return Err(format!(
                    "case '{}' kept reading after a failure (prefix of {} bytes)",
                    case.label, cut
                ));
            }
        }
        Ok(())
    })
}

/// `encoded_len` agrees with the actual output for every case.
pub fn predicted_lengths_match() -> OracleFn {
    Box::new(|world: &World| {
        for case in world.cases() {
            if case.predicted_len != case.encoded_len() {
                return Err(format!(
                    "case '{}' predicted {} bytes but encoded {}",
                    case.label,
                    case.predicted_len,
                    case.encoded_len()
                ));
            }
        }
        Ok(())
    })
}

/// The case labelled `label` encodes to exactly `len` bytes.
pub fn encoded_len(label: &'static str, len: usize) -> OracleFn {
    Box::new(move |world: &World| {
        let case = world.case(label).ok_or_else(|| format!("case '{label}' not found"))?;
        if case.encoded_len() == len {
            Ok(())
        } else {
            Err(format!("case '{label}' encoded to {} bytes, expected {len}", case.encoded_len()))
        }
    })
}

/// The case labelled `label` starts with `prefix`.
pub fn encoding_starts_with(label: &'static str, prefix: Vec<u8>) -> OracleFn {
    Box::new(move |world: &World| {
        let case = world.case(label).ok_or_else(|| format!("case '{label}' not found"))?;
        if case.encoded.starts_with(&prefix) {
            Ok(())
        } else {
            Err(format!("case '{label}' encoding does not start with {prefix:02x?}"))
        }
    })
}

/// The case labelled `label` classifies as `shape`.
pub fn shape_is(label: &'static str, shape: Shape) -> OracleFn {
    Box::new(move |world: &World| {
        let case = world.case(label).ok_or_else(|| format!("case '{label}' not found"))?;
        if case.shape == shape {
            Ok(())
        } else {
            Err(format!("case '{label}' has shape {:?}, expected {shape:?}", case.shape))
        }
    })
}

/// All of the given oracles must pass; the first failure is reported.
pub fn all_of(oracles: Vec<OracleFn>) -> OracleFn {
    Box::new(move |world: &World| {
        for oracle in &oracles {
            oracle(world)?;
        }
        Ok(())
    })
}

/// Round trip, exact consumption, truncation failure, fail-fast reads and
/// length prediction.
pub fn codec_laws() -> OracleFn {
    all_of(vec![
        round_trips(),
        consumes_exactly(),
        truncations_fail(),
        no_reads_after_failure(),
        predicted_lengths_match(),
    ])
}
