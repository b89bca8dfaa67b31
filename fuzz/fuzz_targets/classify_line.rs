#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Some(record) = logpulse::fuzzing::classify_line_input(input) {
            debug_assert!(record.is_total);
            debug_assert!(input.contains("01/Jan/2024:10:00"));
        }
        let counts = logpulse::fuzzing::count_lines_input(input);
        debug_assert_eq!(counts.success + counts.failure, counts.total);
        debug_assert!(counts.timestamps.len() as u64 <= counts.total);
    }
});
