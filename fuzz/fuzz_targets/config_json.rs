#![no_main]

use libfuzzer_sys::fuzz_target;
use logpulse::config::types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    let parsed: Option<ConfigFile> = serde_json::from_slice(data).ok();
    if let Ok(accepted) = logpulse::fuzzing::apply_config_from_json(data) {
        if let Some(services) = parsed.and_then(|config| config.services) {
            debug_assert!(accepted <= services.len());
        }
    }
});
