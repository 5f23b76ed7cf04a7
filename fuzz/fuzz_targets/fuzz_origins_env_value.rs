//! Fuzz target: parsing of `BACKEND_CORS_ORIGINS` values.
//!
//! Arbitrary strings go through both the JSON-array and comma-separated
//! paths. Errors are expected; panics are not.

#![no_main]

use apigate_core::OriginsInput;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(input) = OriginsInput::from_env_value(raw.to_owned()) {
        if let Ok(origins) = input.resolve() {
            for o in &origins {
                assert!(matches!(o.url().scheme(), "http" | "https"));
                let _ = o.origin();
            }
        }
    }
});
