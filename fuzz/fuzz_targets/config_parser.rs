#![no_main]

use libfuzzer_sys::fuzz_target;
use ptlx::SimulationConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(config) = SimulationConfig::from_toml_str(input) {
            let _ = config.validate();
        }
    }
});
