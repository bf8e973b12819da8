//! Fuzz target: decode nested sequences through a streaming reader.
//!
//! Exercises the count-prefix path with the default limits, where declared
//! lengths are not bounded by the remaining input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use shapewire::{from_reader, to_vec};

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = from_reader::<Vec<(String, Option<Vec<u32>>)>, _>(data) {
        assert!(to_vec(&value).len() <= data.len());
    }
});
