//! Modified UTF-8, the string encoding used on the wire.
//!
//! This is UTF-8 except that the NUL character is written as the overlong
//! two byte sequence `0xC0 0x80`, so encoded strings never contain a zero
//! byte. Strings on the wire are prefixed with their encoded length as a
//! big-endian `u16`.

use std::borrow::Cow;
use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Error, Result};

const NUL_PAIR: [u8; 2] = [0xC0, 0x80];

/// Decode modified UTF-8 into a `String`.
///
/// Input produced by Java may also encode characters outside the Basic
/// Multilingual Plane as surrogate pairs. That form is accepted as well.
pub fn decode_modified_utf8(data: &[u8]) -> Result<String> {
    let mut plain = Vec::with_capacity(data.len());
    let mut i = 0;
    while i < data.len() {
        if data[i..].starts_with(&NUL_PAIR) {
            plain.push(0);
            i += 2;
        } else {
            plain.push(data[i]);
            i += 1;
        }
    }

    match String::from_utf8(plain) {
        Ok(s) => Ok(s),
        Err(_) => cesu8::from_java_cesu8(data)
            .map(Cow::into_owned)
            .map_err(|_| Error::encoding(data)),
    }
}

/// Encode a string as modified UTF-8. Borrows the input when it contains no
/// NUL characters, as the encoding is then identical to UTF-8.
pub fn encode_modified_utf8(s: &str) -> Cow<'_, [u8]> {
    if !s.as_bytes().contains(&0) {
        return Cow::Borrowed(s.as_bytes());
    }

    let mut out = Vec::with_capacity(s.len() + 1);
    for &b in s.as_bytes() {
        if b == 0 {
            out.extend_from_slice(&NUL_PAIR);
        } else {
            out.push(b);
        }
    }
    Cow::Owned(out)
}

/// Read a `u16` length followed by that many bytes of modified UTF-8.
pub fn read_length_prefixed_string<R: Read + ?Sized>(reader: &mut R) -> Result<String> {
    let len = reader.read_u16::<BigEndian>()? as usize;

    let mut buf = vec![0; len];
    reader.read_exact(&mut buf[..])?;

    decode_modified_utf8(&buf)
}

/// Write a string as a `u16` length followed by its modified UTF-8 bytes.
/// Strings whose encoding exceeds `u16::MAX` bytes are rejected rather than
/// truncated.
pub fn write_length_prefixed_string<W: Write + ?Sized>(writer: &mut W, s: &str) -> Result<()> {
    let bytes = encode_modified_utf8(s);
    let len: u16 = bytes.len().try_into().map_err(|_| {
        let preview: String = s.chars().take(35).collect();
        Error::too_large(format!(
            "string {:?} too long to encode: {} bytes",
            preview,
            bytes.len()
        ))
    })?;

    writer.write_u16::<BigEndian>(len)?;
    writer.write_all(&bytes)?;
    Ok(())
}
