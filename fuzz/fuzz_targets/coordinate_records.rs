//! Fuzz target for coordinate splitting.
//!
//! Arbitrary JSON arrays of integer records must either convert or fail
//! with an arity error, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tilestitch::coords::split_coordinates;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(records) = serde_json::from_slice::<Vec<Vec<i64>>>(data) {
        let _ = split_coordinates(&records);
    }
});
