#![no_main]

use libfuzzer_sys::fuzz_target;
use opgram::config::NgramConfig;
use opgram::replay::replay_str;

fuzz_target!(|data: &[u8]| {
    // Convert arbitrary bytes to UTF-8 string
    if let Ok(input) = std::str::from_utf8(data) {
        // Replay must either succeed or report an error, never panic
        let _ = replay_str(input, NgramConfig::trigram());
    }
});
