//! Fuzz target for the script parser.
//!
//! Goal: parsing and template recognition should **never panic** on any input.
//! Errors are fine; panics are not.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_script_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(doc) = sectionguard_script::parse(text) {
            for entry in doc.entries() {
                let _ = sectionguard_script::line_of(text, entry.span.start);
                let _ = text.get(entry.span.start..entry.span.end);
            }
        }

        let _ = sectionguard_repo::fuzz::parse_section_file(text);
        let _ = sectionguard_repo::fuzz::parse_technology_file(text);
    }
});
