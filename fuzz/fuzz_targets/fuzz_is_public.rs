//! Fuzz target: the `is_public` string parser.
//!
//! Only the exact strings "true" and "false" (modulo surrounding
//! whitespace) may parse.
#![no_main]

use laos_core::parse_is_public;
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data).into_owned();
    let trimmed = raw.trim().to_owned();
    match parse_is_public(Some(&Value::String(raw))) {
        Ok(flag) => assert_eq!(trimmed, if flag { "true" } else { "false" }),
        Err(_) => assert!(trimmed != "true" && trimmed != "false"),
    }
});
