//! Fuzz target: decoding server route documents.
//!
//! Arbitrary bytes that parse as JSON are fed to `Route::from_response` and
//! `Visibility::from_route_document`. Both may reject the input but must
//! never panic, and must agree on the visibility of any route that decodes.

#![no_main]

use laos_core::{Route, Visibility};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let visibility = Visibility::from_route_document(&doc);
    if let Ok(route) = Route::from_response(&doc) {
        if let Ok(vis) = visibility {
            assert_eq!(vis, route.visibility(), "typed and raw visibility must agree");
        }
    }
    let _ = Route::list_from_response(&doc);
});
