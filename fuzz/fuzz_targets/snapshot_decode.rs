//! Fuzz target: decode a full model snapshot from arbitrary bytes.
//!
//! Decoding must never panic or over-allocate. Anything that decodes must
//! re-encode to the same number of bytes, since the layout has no slack.

#![no_main]

use libfuzzer_sys::fuzz_target;
use shapewire::{DecodeLimits, from_slice_with_limits, to_vec};
use shapewire_harness::Snapshot;

fuzz_target!(|data: &[u8]| {
    if let Ok(snapshot) = from_slice_with_limits::<Snapshot>(data, DecodeLimits::default()) {
        // Flags read any nonzero byte as true, so the bytes may differ.
        assert_eq!(to_vec(&snapshot).len(), data.len());
    }
});
