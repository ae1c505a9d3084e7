//! Encoding [`Tag`] trees and [`Native`] values to NBT.
//!
//! Tags are written exactly as they are. Native values have their wire
//! types chosen for them: integers take the narrowest integer tag that holds
//! them, floats become Doubles, and sequences are typed by
//! [`infer`][crate::infer].
//!
//! ```
//! use nbtcodec::{encode_to_bytes, native};
//!
//! let bytes = encode_to_bytes(&native!([200, 300]), None).unwrap();
//! // List (9) of Short (2), 2 elements.
//! assert_eq!(bytes, [9, 2, 0, 0, 0, 2, 0, 200, 1, 44]);
//! ```
//!
//! Some values have no NBT representation and produce an error rather than a
//! panic: sequences mixing kinds, integers wider than 64 bits, or strings
//! longer than 65535 encoded bytes.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};
use log::{debug, trace};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::infer::infer;
use crate::mutf8::write_length_prefixed_string;
use crate::{to_native, IntWidth, Kind, Native, Tag, TagId, TagValue};

/// Longest list or array the format can describe.
const MAX_LEN: usize = i32::MAX as usize;

pub(crate) trait WriteNbt: Write {
    fn write_tag(&mut self, tag: TagId) -> Result<()> {
        self.write_u8(tag as u8)?;
        Ok(())
    }

    fn write_size_prefixed_str(&mut self, s: &str) -> Result<()> {
        write_length_prefixed_string(self, s)
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        if len > MAX_LEN {
            return Err(Error::too_large(format!("list too long: {} elements", len)));
        }
        self.write_u32::<BigEndian>(len as u32)?;
        Ok(())
    }

    /// Write the low `width` bytes of `value`, big-endian.
    fn write_sized_int(&mut self, width: IntWidth, value: i128) -> Result<()> {
        let v = width.normalize(value);
        match width {
            IntWidth::Byte => self.write_i8(v as i8)?,
            IntWidth::Short => self.write_i16::<BigEndian>(v as i16)?,
            IntWidth::Int => self.write_i32::<BigEndian>(v as i32)?,
            IntWidth::Long => self.write_i64::<BigEndian>(v)?,
        }
        Ok(())
    }
}

impl<T> WriteNbt for T where T: Write {}

/// Writes tags and native values to a [`Write`]. Both paths can be mixed in
/// one tree through [`Native::Tag`].
pub struct Encoder<W: Write> {
    writer: W,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self, tag: TagId, name: Option<&str>, write_id: bool) -> Result<()> {
        if write_id {
            self.writer.write_tag(tag)?;
        }
        match name {
            // End tags never carry a name.
            Some(name) if tag != TagId::End => self.writer.write_size_prefixed_str(name)?,
            _ => {}
        }
        Ok(())
    }

    /// Write a typed value. `name` and the tag id are only written when
    /// given/asked for: list elements have neither.
    pub fn write_tagged(&mut self, value: &TagValue, name: Option<&str>, write_id: bool) -> Result<()> {
        self.write_header(value.id(), name, write_id)?;

        let w = &mut self.writer;
        match value {
            TagValue::End => {}
            TagValue::Byte(v) => w.write_i8(*v)?,
            TagValue::Short(v) => w.write_i16::<BigEndian>(*v)?,
            TagValue::Int(v) => w.write_i32::<BigEndian>(*v)?,
            TagValue::Long(v) => w.write_i64::<BigEndian>(*v)?,
            TagValue::Float(v) => w.write_f32::<BigEndian>(*v)?,
            TagValue::Double(v) => w.write_f64::<BigEndian>(*v)?,
            TagValue::ByteArray(v) => {
                w.write_len(v.len())?;
                w.write_all(&v.to_bytes())?;
            }
            TagValue::String(v) => w.write_size_prefixed_str(v)?,
            TagValue::List(list) => {
                trace!("list of {:?}, {} elements", list.element_type(), list.len());
                w.write_tag(list.element_type())?;
                w.write_len(list.len())?;
                for v in list {
                    self.write_tagged(v, None, false)?;
                }
            }
            TagValue::Compound(c) => {
                trace!("compound of {} entries", c.len());
                for (key, tag) in c.iter() {
                    if tag.id() == TagId::End {
                        return Err(end_in_compound(key));
                    }
                    self.write_tagged(tag.value(), Some(key), true)?;
                }
                self.writer.write_tag(TagId::End)?;
            }
            TagValue::IntArray(v) => {
                w.write_len(v.len())?;
                for i in v.iter() {
                    w.write_i32::<BigEndian>(*i)?;
                }
            }
            TagValue::LongArray(v) => {
                w.write_len(v.len())?;
                for i in v.iter() {
                    w.write_i64::<BigEndian>(*i)?;
                }
            }
        }
        Ok(())
    }

    /// Write an untyped value, choosing wire types for it.
    ///
    /// `hint` forces the width of an integer, and is how elements of an
    /// already typed list or array are written.
    pub fn write_native(
        &mut self,
        value: &Native,
        name: Option<&str>,
        write_id: bool,
        hint: Option<IntWidth>,
    ) -> Result<()> {
        match value {
            Native::Int(v) => {
                let width = match hint {
                    Some(w) => w,
                    None => IntWidth::narrowest(*v).ok_or_else(|| {
                        Error::too_large(format!("integer '{}' too large to be encoded", v))
                    })?,
                };
                self.write_header(width.tag_id(), name, write_id)?;
                self.writer.write_sized_int(width, *v)?;
            }
            Native::Float(v) => {
                self.write_header(TagId::Double, name, write_id)?;
                self.writer.write_f64::<BigEndian>(*v)?;
            }
            Native::String(v) => {
                self.write_header(TagId::String, name, write_id)?;
                self.writer.write_size_prefixed_str(v)?;
            }
            Native::Bytes(v) => {
                self.write_header(TagId::ByteArray, name, write_id)?;
                self.writer.write_len(v.len())?;
                self.writer.write_all(v)?;
            }
            Native::Seq(items) => {
                if items.len() > MAX_LEN {
                    return Err(Error::too_large(format!(
                        "list too long: {} elements",
                        items.len()
                    )));
                }

                let inferred = infer(value)?;
                trace!(
                    "inferred {:?} of {:?} for {} elements",
                    inferred.container,
                    inferred.element,
                    items.len()
                );
                self.write_header(inferred.container, name, write_id)?;

                if inferred.container == TagId::List {
                    self.writer.write_tag(inferred.element)?;
                    self.writer.write_len(items.len())?;
                    let hint = IntWidth::of_scalar(inferred.element);
                    for v in items {
                        self.write_element(v, hint)?;
                    }
                } else {
                    let width = IntWidth::of_array(inferred.container)
                        .ok_or_else(|| Error::unknown_tag(inferred.container as u8))?;
                    self.writer.write_len(items.len())?;
                    for v in items {
                        match v {
                            Native::Int(i) => self.writer.write_sized_int(width, *i)?,
                            other => {
                                return Err(Error::inference(format!(
                                    "expected integer in {:?}, found {:?}",
                                    inferred.container,
                                    other.kind()
                                )))
                            }
                        }
                    }
                }
            }
            Native::Map(m) => {
                self.write_header(TagId::Compound, name, write_id)?;
                for (k, v) in m {
                    if v.kind() == Kind::Tagged(TagId::End) {
                        return Err(end_in_compound(k));
                    }
                    self.write_native(v, Some(k), true, None)?;
                }
                self.writer.write_tag(TagId::End)?;
            }
            Native::Tag(t) => self.write_tagged(t.value(), name, write_id)?,
        }
        Ok(())
    }

    /// List elements carry neither a tag id nor a name.
    fn write_element(&mut self, value: &Native, hint: Option<IntWidth>) -> Result<()> {
        match value {
            Native::Tag(t) => self.write_tagged(t.value(), None, false),
            v => self.write_native(v, None, false, hint),
        }
    }
}

fn end_in_compound(key: &str) -> Error {
    Error::mismatch(format!("entry {:?} is an end tag, which would close the compound", key))
}

/// Encode a native value to `writer` with the given root name.
///
/// An explicit tag at the root is written with its own name instead, so a
/// decoded [`Tag`] tree is written back as it was read.
pub fn encode<W: Write>(writer: W, value: &Native, root_name: Option<&str>) -> Result<()> {
    let mut encoder = Encoder::new(writer);
    match value {
        Native::Tag(t) => {
            debug!("encoding tag root named {:?}", t.name());
            encoder.write_tagged(t.value(), t.name(), true)
        }
        v => {
            debug!("encoding {:?} root named {:?}", v.kind(), root_name);
            encoder.write_native(v, root_name, true, None)
        }
    }
}

/// Encode a native value into a new byte vector. See [`encode`].
pub fn encode_to_bytes(value: &Native, root_name: Option<&str>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode(&mut out, value, root_name)?;
    debug!("encoded {} bytes", out.len());
    Ok(out)
}

/// Encode a tag tree to `writer`. The root is written with the tag's name,
/// if it has one.
pub fn encode_tag<W: Write>(writer: W, tag: &Tag) -> Result<()> {
    debug!("encoding {:?} root named {:?}", tag.id(), tag.name());
    Encoder::new(writer).write_tagged(tag.value(), tag.name(), true)
}

/// Encode a tag tree into a new byte vector. See [`encode_tag`].
pub fn tag_to_bytes(tag: &Tag) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_tag(&mut out, tag)?;
    Ok(out)
}

/// Serialize any `T` with inferred wire types.
///
/// ```
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Level {
///     seed: i64,
///     name: String,
/// }
///
/// let level = Level { seed: 5, name: "world".to_owned() };
/// let bytes = nbtcodec::to_bytes(&level, Some("")).unwrap();
/// assert_eq!(bytes[0], 10);
/// ```
pub fn to_bytes<T>(value: &T, root_name: Option<&str>) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    encode_to_bytes(&to_native(value)?, root_name)
}
