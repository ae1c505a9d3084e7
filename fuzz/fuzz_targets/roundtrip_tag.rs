#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtcodec::{decode_from_bytes, tag_to_bytes, DecodeOpts, Tag, TagId};

fuzz_target!(|tag: Tag| {
    let bytes = match tag_to_bytes(&tag) {
        Ok(bytes) => bytes,
        // Names and strings over 65535 bytes are rejected.
        Err(_) => return,
    };

    let opts = DecodeOpts::new()
        .preserve_tag_type(true)
        .root_has_name(tag.name().is_some());
    let back = decode_from_bytes(&bytes, &opts).unwrap();

    if tag.id() == TagId::End {
        assert!(back.is_none());
        return;
    }

    // Compare bytes rather than trees, NaN payloads are not equal to
    // themselves.
    let back = back.and_then(|d| d.into_tag()).unwrap();
    assert_eq!(tag_to_bytes(&back).unwrap(), bytes);
});
