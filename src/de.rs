//! Decoding NBT from any [`Read`] into a [`Tag`] tree or a [`Native`] value.
//!
//! The decoder is a single recursive parser. What it builds is decided by a
//! conversion policy, a [`Convert`] implementation with one method per tag
//! type that turns a raw payload into the output representation. Three
//! policies come with the crate and are picked from [`DecodeOpts`]:
//!
//! | options | policy | output |
//! | ------- | ------ | ------ |
//! | `preserve_tag_type(true)` | [`Tagged`] | [`Tag`] |
//! | default | [`Plain::bytes`] | [`Native`], byte arrays as [`Native::Bytes`] |
//! | `byte_array_as_bytes(false)` | [`Plain::ints`] | [`Native`], byte arrays as sequences of ints |
//!
//! Custom policies can be used with [`decode_with`].
//!
//! # Root names
//!
//! Files written by the game start with a named root tag, usually a
//! compound with an empty name. Network NBT omits the root name; use
//! [`DecodeOpts::network_nbt`] for it.
//!
//! ```
//! use nbtcodec::{decode_from_bytes, DecodeOpts, Native};
//!
//! // Int tag named "a" holding 7.
//! let data = [3, 0, 1, b'a', 0, 0, 0, 7];
//! let v = decode_from_bytes(&data, &DecodeOpts::new()).unwrap().unwrap();
//! assert_eq!(v.name(), Some("a"));
//! assert_eq!(v.into_native(), Some(Native::Int(7)));
//! ```

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, trace};

use crate::error::{Error, Result};
use crate::mutf8::read_length_prefixed_string;
use crate::{ByteArray, Compound, IntArray, List, LongArray, Native, NativeMap, Tag, TagId, TagValue};

/// Options for decoding.
///
/// ```
/// use nbtcodec::DecodeOpts;
///
/// let opts = DecodeOpts::new().preserve_tag_type(true).max_seq_len(1 << 20);
/// assert!(opts.root_has_name);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOpts {
    /// Produce a [`Tag`] tree rather than a [`Native`] value.
    pub preserve_tag_type: bool,

    /// Whether the root tag id is followed by a name.
    pub root_has_name: bool,

    /// When not preserving tag types, produce byte arrays as
    /// [`Native::Bytes`] rather than a sequence of integers.
    pub byte_array_as_bytes: bool,

    /// Lists and arrays declaring more elements than this fail before any
    /// element is read.
    pub max_seq_len: usize,

    /// Lists and compounds nested deeper than this fail, which keeps hostile
    /// input from exhausting the stack.
    pub max_depth: usize,
}

impl DecodeOpts {
    pub fn new() -> Self {
        Default::default()
    }

    /// Options for network NBT, where the root tag has no name.
    pub fn network_nbt() -> Self {
        Self::new().root_has_name(false)
    }

    pub fn preserve_tag_type(mut self, value: bool) -> Self {
        self.preserve_tag_type = value;
        self
    }

    pub fn root_has_name(mut self, value: bool) -> Self {
        self.root_has_name = value;
        self
    }

    pub fn byte_array_as_bytes(mut self, value: bool) -> Self {
        self.byte_array_as_bytes = value;
        self
    }

    pub fn max_seq_len(mut self, value: usize) -> Self {
        self.max_seq_len = value;
        self
    }

    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }
}

impl Default for DecodeOpts {
    fn default() -> Self {
        Self {
            preserve_tag_type: false,
            root_has_name: true,
            byte_array_as_bytes: true,
            max_seq_len: usize::MAX,
            max_depth: 128,
        }
    }
}

/// A conversion policy: turns each decoded payload into the output type.
///
/// Lists receive their declared element type so a policy can rebuild a
/// typed list. Compound entries arrive in wire order.
pub trait Convert {
    type Output;

    fn byte(&self, v: i8) -> Self::Output;
    fn short(&self, v: i16) -> Self::Output;
    fn int(&self, v: i32) -> Self::Output;
    fn long(&self, v: i64) -> Self::Output;
    fn float(&self, v: f32) -> Self::Output;
    fn double(&self, v: f64) -> Self::Output;
    fn byte_array(&self, v: Vec<u8>) -> Self::Output;
    fn string(&self, v: String) -> Self::Output;
    fn list(&self, element: TagId, items: Vec<Self::Output>) -> Self::Output;
    fn compound(&self, entries: Vec<(String, Self::Output)>) -> Self::Output;
    fn int_array(&self, v: Vec<i32>) -> Self::Output;
    fn long_array(&self, v: Vec<i64>) -> Self::Output;
}

/// Policy keeping every tag type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tagged;

impl Convert for Tagged {
    type Output = TagValue;

    fn byte(&self, v: i8) -> TagValue {
        TagValue::Byte(v)
    }

    fn short(&self, v: i16) -> TagValue {
        TagValue::Short(v)
    }

    fn int(&self, v: i32) -> TagValue {
        TagValue::Int(v)
    }

    fn long(&self, v: i64) -> TagValue {
        TagValue::Long(v)
    }

    fn float(&self, v: f32) -> TagValue {
        TagValue::Float(v)
    }

    fn double(&self, v: f64) -> TagValue {
        TagValue::Double(v)
    }

    fn byte_array(&self, v: Vec<u8>) -> TagValue {
        TagValue::ByteArray(ByteArray::from_bytes(&v))
    }

    fn string(&self, v: String) -> TagValue {
        TagValue::String(v)
    }

    fn list(&self, element: TagId, items: Vec<TagValue>) -> TagValue {
        TagValue::List(List::from_parts(element, items))
    }

    fn compound(&self, entries: Vec<(String, TagValue)>) -> TagValue {
        TagValue::Compound(entries.into_iter().collect::<Compound>())
    }

    fn int_array(&self, v: Vec<i32>) -> TagValue {
        TagValue::IntArray(IntArray::new(v))
    }

    fn long_array(&self, v: Vec<i64>) -> TagValue {
        TagValue::LongArray(LongArray::new(v))
    }
}

/// Policy producing plain host values.
#[derive(Debug, Clone, Copy)]
pub struct Plain {
    byte_array_as_bytes: bool,
}

impl Plain {
    /// Byte arrays become [`Native::Bytes`].
    pub fn bytes() -> Self {
        Self {
            byte_array_as_bytes: true,
        }
    }

    /// Byte arrays become sequences of signed integers.
    pub fn ints() -> Self {
        Self {
            byte_array_as_bytes: false,
        }
    }
}

impl Convert for Plain {
    type Output = Native;

    fn byte(&self, v: i8) -> Native {
        Native::Int(v.into())
    }

    fn short(&self, v: i16) -> Native {
        Native::Int(v.into())
    }

    fn int(&self, v: i32) -> Native {
        Native::Int(v.into())
    }

    fn long(&self, v: i64) -> Native {
        Native::Int(v.into())
    }

    fn float(&self, v: f32) -> Native {
        Native::Float(v.into())
    }

    fn double(&self, v: f64) -> Native {
        Native::Float(v)
    }

    fn byte_array(&self, v: Vec<u8>) -> Native {
        if self.byte_array_as_bytes {
            Native::Bytes(v)
        } else {
            Native::Seq(v.into_iter().map(|b| Native::Int(b.into())).collect())
        }
    }

    fn string(&self, v: String) -> Native {
        Native::String(v)
    }

    fn list(&self, _element: TagId, items: Vec<Native>) -> Native {
        Native::Seq(items)
    }

    fn compound(&self, entries: Vec<(String, Native)>) -> Native {
        Native::Map(entries.into_iter().collect::<NativeMap>())
    }

    fn int_array(&self, v: Vec<i32>) -> Native {
        Native::Seq(v.into_iter().map(|i| Native::Int(i.into())).collect())
    }

    fn long_array(&self, v: Vec<i64>) -> Native {
        Native::Seq(v.into_iter().map(|i| Native::Int(i.into())).collect())
    }
}

/// Result of [`decode`]: the shape depends on
/// [`DecodeOpts::preserve_tag_type`].
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The root tag, carrying the root name if there was one.
    Tag(Tag),
    /// The root name, if there was one, and the root value.
    Native(Option<String>, Native),
}

impl Decoded {
    pub fn name(&self) -> Option<&str> {
        match self {
            Decoded::Tag(t) => t.name(),
            Decoded::Native(name, _) => name.as_deref(),
        }
    }

    /// The tag tree, or `None` if tag types were not preserved.
    pub fn into_tag(self) -> Option<Tag> {
        match self {
            Decoded::Tag(t) => Some(t),
            Decoded::Native(..) => None,
        }
    }

    /// The native value. A tag tree is flattened with [`Tag::to_native`].
    pub fn into_native(self) -> Option<Native> {
        match self {
            Decoded::Tag(t) => Some(t.to_native()),
            Decoded::Native(_, v) => Some(v),
        }
    }
}

/// Decode one value from `reader`.
///
/// Returns `Ok(None)` if the input starts with an End tag, i.e. there is no
/// value. The reader is left positioned after the value.
pub fn decode<R: Read>(reader: R, opts: &DecodeOpts) -> Result<Option<Decoded>> {
    if opts.preserve_tag_type {
        debug!("decoding with tagged policy");
        Ok(decode_with(reader, &Tagged, opts)?.map(|(name, value)| {
            let mut tag = Tag::new(value);
            tag.set_name(name);
            Decoded::Tag(tag)
        }))
    } else {
        let policy = if opts.byte_array_as_bytes {
            Plain::bytes()
        } else {
            Plain::ints()
        };
        debug!("decoding with plain policy: {:?}", policy);
        Ok(decode_with(reader, &policy, opts)?.map(|(name, value)| Decoded::Native(name, value)))
    }
}

/// Decode one value from a byte slice. See [`decode`].
pub fn decode_from_bytes(data: &[u8], opts: &DecodeOpts) -> Result<Option<Decoded>> {
    decode(data, opts)
}

/// Decode one value with a custom conversion policy. Returns the root name
/// and the converted root value, or `None` for an End tag.
pub fn decode_with<R, P>(
    reader: R,
    policy: &P,
    opts: &DecodeOpts,
) -> Result<Option<(Option<String>, P::Output)>>
where
    R: Read,
    P: Convert,
{
    let mut decoder = Decoder {
        reader,
        policy,
        opts,
        depth: 0,
    };
    let decoded = decoder.decode_one(opts.root_has_name)?;
    if let Some((name, _)) = &decoded {
        debug!("decoded root value named {:?}", name);
    }
    Ok(decoded)
}

struct Decoder<'a, R, P> {
    reader: R,
    policy: &'a P,
    opts: &'a DecodeOpts,
    depth: usize,
}

impl<'a, R: Read, P: Convert> Decoder<'a, R, P> {
    /// Read a tag id, then a name if `named`, then the payload. `None` for an
    /// End tag, which has neither name nor payload.
    fn decode_one(&mut self, named: bool) -> Result<Option<(Option<String>, P::Output)>> {
        let tag = self.consume_tag()?;
        if tag == TagId::End {
            return Ok(None);
        }

        let name = if named {
            Some(read_length_prefixed_string(&mut self.reader)?)
        } else {
            None
        };

        Ok(Some((name, self.decode_payload(tag)?)))
    }

    fn decode_payload(&mut self, tag: TagId) -> Result<P::Output> {
        let policy = self.policy;
        Ok(match tag {
            TagId::Byte => policy.byte(self.reader.read_i8()?),
            TagId::Short => policy.short(self.reader.read_i16::<BigEndian>()?),
            TagId::Int => policy.int(self.reader.read_i32::<BigEndian>()?),
            TagId::Long => policy.long(self.reader.read_i64::<BigEndian>()?),
            TagId::Float => policy.float(self.reader.read_f32::<BigEndian>()?),
            TagId::Double => policy.double(self.reader.read_f64::<BigEndian>()?),
            TagId::ByteArray => {
                let len = self.consume_len()?;
                policy.byte_array(self.consume_bytes(len)?)
            }
            TagId::String => policy.string(read_length_prefixed_string(&mut self.reader)?),
            TagId::List => {
                let element = self.consume_tag()?;
                let len = self.consume_len()?;
                trace!("list of {:?}, {} elements", element, len);

                // End has no payload, so a non-empty list of End cannot be
                // read. Empty lists are commonly written with this type.
                if element == TagId::End && len != 0 {
                    return Err(Error::unknown_tag(u8::from(TagId::End)));
                }

                self.enter()?;
                let mut items = Vec::with_capacity(len.min(1024));
                for _ in 0..len {
                    items.push(self.decode_payload(element)?);
                }
                self.depth -= 1;

                policy.list(element, items)
            }
            TagId::Compound => {
                self.enter()?;
                let mut entries = Vec::new();
                while let Some((name, value)) = self.decode_one(true)? {
                    debug_assert!(name.is_some(), "compound entry decoded without a name");
                    let name = name.ok_or_else(|| Error::mismatch("compound entry without a name"))?;
                    entries.push((name, value));
                }
                self.depth -= 1;
                trace!("compound of {} entries", entries.len());

                policy.compound(entries)
            }
            TagId::IntArray => {
                let len = self.consume_len()?;
                let mut buf = Vec::with_capacity(len.min(1024));
                for _ in 0..len {
                    buf.push(self.reader.read_i32::<BigEndian>()?);
                }
                policy.int_array(buf)
            }
            TagId::LongArray => {
                let len = self.consume_len()?;
                let mut buf = Vec::with_capacity(len.min(1024));
                for _ in 0..len {
                    buf.push(self.reader.read_i64::<BigEndian>()?);
                }
                policy.long_array(buf)
            }
            TagId::End => return Err(Error::unknown_tag(u8::from(TagId::End))),
        })
    }

    fn consume_tag(&mut self) -> Result<TagId> {
        let tag = self.reader.read_u8()?;
        TagId::try_from(tag).map_err(|_| Error::unknown_tag(tag))
    }

    fn consume_len(&mut self) -> Result<usize> {
        let len = self.reader.read_u32::<BigEndian>()? as usize;
        if len > self.opts.max_seq_len {
            return Err(Error::too_large(format!(
                "size ({}) greater than max sequence length ({})",
                len, self.opts.max_seq_len,
            )));
        }
        Ok(len)
    }

    /// Read exactly `len` bytes without trusting `len` for the allocation.
    fn consume_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(1 << 16));
        (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
        if buf.len() != len {
            return Err(Error::truncated());
        }
        Ok(buf)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.opts.max_depth {
            return Err(Error::too_large(format!(
                "nesting deeper than {} levels",
                self.opts.max_depth
            )));
        }
        Ok(())
    }
}
