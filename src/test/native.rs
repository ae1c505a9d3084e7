use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, Result};
use crate::{
    decode_from_bytes, from_native, native, to_bytes, to_native, DecodeOpts, Native, NativeMap,
    Tag, TagValue,
};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Player {
    name: String,
    health: f32,
    level: u8,
    pos: [f64; 3],
    tags: Vec<String>,
    gamemode: Gamemode,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
enum Gamemode {
    Survival,
    Creative,
    Hardcore { lives: i32 },
}

fn player() -> Player {
    Player {
        name: "Steve".to_owned(),
        health: 20.0,
        level: 12,
        pos: [0.5, 64.0, -3.5],
        tags: vec!["builder".to_owned()],
        gamemode: Gamemode::Creative,
    }
}

#[test]
fn struct_to_native() -> Result<()> {
    assert_eq!(
        to_native(&player())?,
        native!({
            "name": "Steve",
            "health": 20.0,
            "level": 12,
            "pos": [0.5, 64.0, -3.5],
            "tags": ["builder"],
            "gamemode": "Creative",
        })
    );
    Ok(())
}

#[test]
fn struct_through_nbt() -> Result<()> {
    let bytes = to_bytes(&player(), Some(""))?;
    let v = decode_from_bytes(&bytes, &DecodeOpts::new())?
        .and_then(|d| d.into_native())
        .unwrap();
    let back: Player = from_native(&v)?;
    assert_eq!(back, player());
    Ok(())
}

#[test]
fn struct_variant() -> Result<()> {
    let v = to_native(&Gamemode::Hardcore { lives: 3 })?;
    assert_eq!(v, native!({"Hardcore": {"lives": 3}}));

    let back: Gamemode = from_native(&v)?;
    assert_eq!(back, Gamemode::Hardcore { lives: 3 });
    Ok(())
}

#[test]
fn none_is_unsupported() {
    let err = to_native(&Option::<i32>::None).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnsupportedType);

    let err = to_native(&()).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnsupportedType);
}

#[test]
fn some_is_transparent() -> Result<()> {
    assert_eq!(to_native(&Some(5u8))?, Native::Int(5));

    let v: Option<u8> = from_native(&Native::Int(5))?;
    assert_eq!(v, Some(5));
    Ok(())
}

#[test]
fn non_string_keys() -> Result<()> {
    let mut ints = BTreeMap::new();
    ints.insert(1, "one");
    assert_eq!(to_native(&ints)?, native!({"1": "one"}));

    let mut bad = BTreeMap::new();
    bad.insert(vec![1u8], "one");
    let err = to_native(&bad).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnsupportedType);
    Ok(())
}

#[test]
fn huge_unsigned() {
    let err = to_native(&u128::MAX).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ValueTooLarge);
}

#[test]
fn bytes_via_serde_bytes() -> Result<()> {
    #[derive(Serialize, Deserialize)]
    struct Blob {
        #[serde(with = "serde_bytes")]
        data: Vec<u8>,
    }

    let v = to_native(&Blob { data: vec![1, 2] })?;
    assert_eq!(v["data"], Native::Bytes(vec![1, 2]));

    let back: Blob = from_native(&v)?;
    assert_eq!(back.data, [1, 2]);
    Ok(())
}

#[test]
fn explicit_tag_is_not_deserializable() {
    let v = Native::Tag(Tag::short(1));
    let err = from_native::<i16>(&v).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnsupportedType);
}

#[test]
fn json_preserves_order() {
    let v = native!({"z": 1, "a": [1.5, 2.5], "m": {"inner": "x"}});
    let json = serde_json::to_string(&v).unwrap();
    assert_eq!(json, r#"{"z":1,"a":[1.5,2.5],"m":{"inner":"x"}}"#);

    let back: Native = serde_json::from_str(&json).unwrap();
    assert_eq!(back, v);
}

#[test]
fn json_document_to_nbt() -> Result<()> {
    let json = r#"{"Data": {"LevelName": "world", "Version": {"Id": 3465}}}"#;
    let v: Native = serde_json::from_str(json).unwrap();

    let bytes = crate::encode_to_bytes(&v, Some(""))?;
    let back = decode_from_bytes(&bytes, &DecodeOpts::new())?.unwrap();
    assert_eq!(back.into_native(), Some(v));
    Ok(())
}

#[test]
fn tag_flattens_to_native() {
    let t = Tag::new(TagValue::short(3));
    assert_eq!(t.to_native(), Native::Int(3));
    assert_eq!(TagValue::End.to_native(), Native::Seq(vec![]));
    assert_eq!(TagValue::Float(0.5).to_native(), Native::Float(0.5));
}

#[test]
fn accessors() {
    let v = native!({"a": 1, "b": "x", "c": [1.0]});
    assert_eq!(v.get("a").and_then(Native::as_i128), Some(1));
    assert_eq!(v["b"].as_str(), Some("x"));
    assert_eq!(v["c"].as_seq().map(|s| s.len()), Some(1));
    assert_eq!(v.get("missing"), None);
    assert!(matches!(v.as_map(), Some(m) if m.len() == 3));
    assert_eq!(native!({}), Native::Map(NativeMap::new()));
}
