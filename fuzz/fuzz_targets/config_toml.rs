#![no_main]

use libfuzzer_sys::fuzz_target;
use logpulse::config::types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let parsed: Option<ConfigFile> = toml::from_str(input).ok();
        if let Ok(accepted) = logpulse::fuzzing::apply_config_from_toml(input) {
            if let Some(services) = parsed.and_then(|config| config.services) {
                debug_assert!(accepted <= services.len());
            }
        }
    }
});
