#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(Some(range)) = logpulse::fuzzing::parse_offpeak_input(input) {
            let rendered = range.to_string();
            debug_assert!(matches!(
                logpulse::fuzzing::parse_offpeak_input(&rendered),
                Ok(Some(reparsed)) if reparsed == range
            ));
        }
    }
});
