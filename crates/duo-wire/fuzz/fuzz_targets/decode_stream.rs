//! Fuzzing target for the draw stream decoder

#![no_main]
use libfuzzer_sys::fuzz_target;

use duo_wire::{decode, encode};

fuzz_target!(|data: &[u8]| {
    // Limit input size to prevent timeouts
    let data = if data.len() > 64 * 1024 {
        &data[..64 * 1024]
    } else {
        data
    };

    // Decoding must never panic; whatever decodes must survive a second trip.
    if let Ok(payload) = decode(data) {
        let bytes = encode(payload.canvas, &payload.commands).expect("re-encode decoded payload");
        let again = decode(&bytes).expect("decode re-encoded payload");
        assert_eq!(again, payload);
    }
});
