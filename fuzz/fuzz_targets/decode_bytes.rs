#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtcodec::{decode_from_bytes, encode_to_bytes, DecodeOpts};

fuzz_target!(|data: &[u8]| {
    for preserve in [false, true] {
        let opts = DecodeOpts::new()
            .preserve_tag_type(preserve)
            .max_seq_len(100);
        if let Ok(Some(v)) = decode_from_bytes(data, &opts) {
            let name = v.name().map(str::to_owned);
            if let Some(native) = v.into_native() {
                // Decoded sequences can still mix kinds (e.g. a list of
                // lists whose inner lists differ), so encoding may fail.
                let _ = encode_to_bytes(&native, name.as_deref());
            }
        }
    }
});
