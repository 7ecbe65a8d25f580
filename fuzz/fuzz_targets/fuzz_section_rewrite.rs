//! Fuzz target for span-based template rewriting.
//!
//! Deleting every modifier and technology reference must never panic, and neither
//! may re-parsing the rewritten text.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_section_rewrite
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(out) = sectionguard_repo::fuzz::rewrite_section_file(text)
    {
        let _ = sectionguard_repo::fuzz::parse_section_file(&out);
    }
});
