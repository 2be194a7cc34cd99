//! Fuzz target for tile manifest parsing.
//!
//! Parsed manifests are also checked by the layout validator, which must
//! never panic whatever positions and grid sizes the manifest claims.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tilestitch::manifest::from_manifest_slice;
use tilestitch::validation::{validate_layout, ValidateOptions};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(manifest) = from_manifest_slice(data) {
        let layout = manifest.to_layout();
        let _ = validate_layout(&layout, &ValidateOptions::default());
    }
});
