#![no_main]

use libfuzzer_sys::fuzz_target;
use ptlx::csv_output::CsvOutput;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Malformed input must surface as an error, never a panic
        if let Ok(batch) = CsvOutput::parse(input) {
            let _ = CsvOutput::new(&batch).to_csv();
        }
    }
});
