//! nbtcodec reads and writes NBT, the tagged binary tree format used by
//! *Minecraft: Java Edition* to store world data and player inventories.
//!
//! Data can be handled in two shapes:
//!
//! * [`Tag`] trees keep every wire type. Decoding with
//!   [`DecodeOpts::preserve_tag_type`] and re-encoding reproduces the input
//!   exactly.
//! * [`Native`] values are plain integers, floats, strings, sequences and
//!   maps. The encoder picks the narrowest wire type for each (see
//!   [`infer`]), and [`to_native`]/[`from_native`] bridge to serde types.
//!
//! The codec never compresses or decompresses. Wrap the reader or writer in
//! something like `flate2` for gzip'd files.
//!
//! ```toml
//! [dependencies]
//! nbtcodec = "0.1"
//! ```
//!
//! # Quick example
//!
//! ```
//! use nbtcodec::{decode_from_bytes, encode_to_bytes, native, DecodeOpts};
//!
//! let value = native!({"name": "test", "value": 42});
//! let bytes = encode_to_bytes(&value, Some("")).unwrap();
//! assert_eq!(&bytes[..3], &[0x0A, 0x00, 0x00]);
//!
//! let decoded = decode_from_bytes(&bytes, &DecodeOpts::new()).unwrap().unwrap();
//! assert_eq!(decoded.into_native(), Some(value));
//! ```
//!
//! # Keeping tag types
//!
//! ```
//! use nbtcodec::{decode_from_bytes, tag_to_bytes, Compound, DecodeOpts, LongArray, Tag};
//!
//! let mut root = Compound::new();
//! root.insert("seeds", LongArray::new(vec![1, -1, i64::MAX]));
//! root.insert("health", Tag::short(20));
//! let root = Tag::named("", root);
//!
//! let bytes = tag_to_bytes(&root).unwrap();
//! let opts = DecodeOpts::new().preserve_tag_type(true);
//! let back = decode_from_bytes(&bytes, &opts).unwrap().unwrap();
//! assert_eq!(back.into_tag(), Some(root));
//! ```

pub mod de;
pub mod error;
pub mod infer;
pub mod mutf8;
pub mod ser;

mod arrays;
mod int;
mod macros;
mod native;
mod tag;

pub use arrays::*;
pub use de::{decode, decode_from_bytes, decode_with, DecodeOpts, Decoded};
pub use int::IntWidth;
pub use native::*;
pub use ser::{encode, encode_tag, encode_to_bytes, tag_to_bytes, to_bytes};
pub use tag::*;

#[cfg(test)]
mod test;

use std::convert::TryFrom;

/// An NBT tag id. This does not carry the value or the name of the data.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum TagId {
    /// Represents the end of a Compound object.
    #[default]
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of values that all share one tag type.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

// Written by hand; the set of tag ids is fixed by the format.
impl TryFrom<u8> for TagId {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use TagId::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<TagId> for u8 {
    fn from(tag: TagId) -> Self {
        tag as u8
    }
}
