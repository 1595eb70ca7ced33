#![no_main]

use libfuzzer_sys::fuzz_target;
use wire::{frames, Limits};

fuzz_target!(|data: &[u8]| {
    let Ok(registry) = catalog::registry() else {
        return;
    };
    let limits = Limits::for_testing();

    for frame in frames(data) {
        let Ok(frame) = frame else {
            break;
        };
        if let Ok(mut msg) = registry.unpack_message(frame, &limits) {
            // Whatever decodes must encode back without panicking.
            let _ = msg.pack();
        }
    }
});
