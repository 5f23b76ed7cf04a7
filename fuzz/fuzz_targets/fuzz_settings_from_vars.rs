//! Fuzz target: settings construction and the API key guard.
//!
//! Splits the input into a key and a header candidate and checks that the
//! guard admits exactly when they are equal.

#![no_main]

use apigate_core::{check_api_key, Settings};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (key, header) = text.split_once('\n').unwrap_or((text, ""));
    let Ok(settings) = Settings::from_vars([("API_KEY", key)]) else {
        let sendable = key.bytes().all(|b| (b' '..=b'~').contains(&b))
            && !key.starts_with(' ')
            && !key.ends_with(' ');
        assert!(
            key.is_empty() || !sendable,
            "only empty or unsendable keys may fail to load"
        );
        return;
    };
    let admitted = check_api_key(&settings, Some(header)).is_ok();
    assert_eq!(admitted, key == header);
});
