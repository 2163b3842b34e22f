// SPDX-License-Identifier: Apache-2.0

#![no_main]

use libfuzzer_sys::fuzz_target;
use orgwatch_core::github::parse_page;

fuzz_target!(|data: &[u8]| {
    // Any body must decode or fail cleanly, never panic.
    let _ = parse_page("fuzz", 1, data);
});
