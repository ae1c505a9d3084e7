use crate::{decode_from_bytes, error::ErrorKind, test::builder::Builder, DecodeOpts, TagId};

// Inputs shaped like the ones cargo-fuzz likes to find.

#[test]
fn partial_input_in_name() {
    let input = Builder::new().start_compound("some long name").build();
    let v = decode_from_bytes(&input[0..3], &DecodeOpts::new());
    assert!(v.unwrap_err().is_truncated());
}

#[test]
fn list_of_end_with_elements() {
    let input = Builder::new()
        .start_compound("")
        .start_list("", TagId::End, 1)
        .tag(TagId::End)
        .end_compound()
        .build();

    assert!(decode_from_bytes(&input, &DecodeOpts::new()).is_err());
}

#[test]
fn negative_list_length() {
    let input = Builder::new()
        .start_compound("")
        .start_list("", TagId::Long, -1)
        .end_compound()
        .build();

    let err = decode_from_bytes(&input, &DecodeOpts::new().max_seq_len(1 << 20)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ValueTooLarge);

    // Without a limit the length is taken as unsigned and the input runs out.
    let err = decode_from_bytes(&input, &DecodeOpts::new()).unwrap_err();
    assert!(err.is_truncated());
}

#[test]
fn deeply_nested_lists() {
    let mut builder = Builder::new().start_list("", TagId::List, 1);
    for _ in 0..10_000 {
        builder = builder.start_anon_list(TagId::List, 1);
    }
    let input = builder.build();

    let err = decode_from_bytes(&input, &DecodeOpts::new()).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ValueTooLarge);
}

fn nested_lists(depth: usize) -> Vec<u8> {
    // The root list and the innermost empty list count as two levels.
    let mut builder = Builder::new().start_list("", TagId::List, 1);
    for _ in 0..depth - 2 {
        builder = builder.start_anon_list(TagId::List, 1);
    }
    builder.start_anon_list(TagId::End, 0).build()
}

#[test]
fn nesting_at_default_limit() {
    let limit = DecodeOpts::new().max_depth;

    let v = decode_from_bytes(&nested_lists(limit), &DecodeOpts::new()).unwrap();
    assert!(v.is_some());

    let err = decode_from_bytes(&nested_lists(limit + 1), &DecodeOpts::new()).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ValueTooLarge);
}

#[test]
fn string_length_beyond_input() {
    let input = Builder::new()
        .tag(TagId::String)
        .name("")
        .raw_str_len(u16::MAX as usize)
        .raw_bytes(b"short")
        .build();

    assert!(decode_from_bytes(&input, &DecodeOpts::new())
        .unwrap_err()
        .is_truncated());
}
