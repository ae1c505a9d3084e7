use core::result;

use serde::{ser::Impossible, Serialize};

use crate::error::{Error, Result};

use super::{Native, NativeMap};

impl Serialize for Native {
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Native::Int(v) => match i64::try_from(*v) {
                Ok(v) => serializer.serialize_i64(v),
                Err(_) => serializer.serialize_i128(*v),
            },
            Native::Float(v) => serializer.serialize_f64(*v),
            Native::String(v) => serializer.serialize_str(v),
            Native::Bytes(v) => serializer.serialize_bytes(v),
            Native::Seq(v) => v.serialize(serializer),
            Native::Map(v) => v.serialize(serializer),
            Native::Tag(t) => t.to_native().serialize(serializer),
        }
    }
}

/// Serializer whose output is a [`Native`] value.
///
/// This is the serializer that backs [`to_native`][crate::to_native]. Rust
/// integers of every width become [`Native::Int`], leaving the choice of
/// wire width to the encoder's type inference.
pub struct Serializer;

impl<'a> serde::Serializer for &'a mut Serializer {
    type Ok = Native;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, value: bool) -> Result<Native> {
        Ok(Native::Int(value as i128))
    }

    fn serialize_i8(self, value: i8) -> Result<Native> {
        Ok(Native::Int(value.into()))
    }

    fn serialize_i16(self, value: i16) -> Result<Native> {
        Ok(Native::Int(value.into()))
    }

    fn serialize_i32(self, value: i32) -> Result<Native> {
        Ok(Native::Int(value.into()))
    }

    fn serialize_i64(self, value: i64) -> Result<Native> {
        Ok(Native::Int(value.into()))
    }

    fn serialize_i128(self, value: i128) -> Result<Native> {
        Ok(Native::Int(value))
    }

    fn serialize_u128(self, value: u128) -> Result<Native> {
        i128::try_from(value)
            .map(Native::Int)
            .map_err(|_| Error::too_large(format!("integer '{}' too large to be encoded", value)))
    }

    fn serialize_u8(self, value: u8) -> Result<Native> {
        Ok(Native::Int(value.into()))
    }

    fn serialize_u16(self, value: u16) -> Result<Native> {
        Ok(Native::Int(value.into()))
    }

    fn serialize_u32(self, value: u32) -> Result<Native> {
        Ok(Native::Int(value.into()))
    }

    fn serialize_u64(self, value: u64) -> Result<Native> {
        Ok(Native::Int(value.into()))
    }

    fn serialize_f32(self, value: f32) -> Result<Native> {
        Ok(Native::Float(value.into()))
    }

    fn serialize_f64(self, value: f64) -> Result<Native> {
        Ok(Native::Float(value))
    }

    fn serialize_char(self, value: char) -> Result<Native> {
        Ok(Native::String(value.to_string()))
    }

    fn serialize_str(self, value: &str) -> Result<Native> {
        Ok(Native::String(value.to_owned()))
    }

    fn serialize_bytes(self, value: &[u8]) -> Result<Native> {
        Ok(Native::Bytes(value.to_vec()))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Native> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Native>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Native>
    where
        T: ?Sized + Serialize,
    {
        let mut object = NativeMap::new();
        object.insert(variant.to_owned(), crate::to_native(value)?);
        Ok(Native::Map(object))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Native>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant.into(),
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeMap {
            map: NativeMap::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant.into(),
            map: NativeMap::with_capacity(len),
        })
    }

    fn collect_str<T>(self, value: &T) -> Result<Native>
    where
        T: ?Sized + std::fmt::Display,
    {
        Ok(Native::String(value.to_string()))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Err(Error::unsupported("cannot encode None: NBT has no null value"))
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Err(Error::unsupported("cannot encode unit: NBT has no null value"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Self::Ok> {
        Err(Error::unsupported(format!(
            "cannot encode unit struct '{}'",
            name
        )))
    }
}

pub struct SerializeVec {
    vec: Vec<Native>,
}

pub struct SerializeTupleVariant {
    name: String,
    vec: Vec<Native>,
}

pub struct SerializeMap {
    map: NativeMap,
    next_key: Option<String>,
}

pub struct SerializeStructVariant {
    name: String,
    map: NativeMap,
}

impl serde::ser::SerializeSeq for SerializeVec {
    type Ok = Native;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(crate::to_native(value)?);
        Ok(())
    }

    fn end(self) -> Result<Native> {
        Ok(Native::Seq(self.vec))
    }
}

impl serde::ser::SerializeTuple for SerializeVec {
    type Ok = Native;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        serde::ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Native> {
        serde::ser::SerializeSeq::end(self)
    }
}

impl serde::ser::SerializeTupleStruct for SerializeVec {
    type Ok = Native;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        serde::ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Native> {
        serde::ser::SerializeSeq::end(self)
    }
}

impl serde::ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Native;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(crate::to_native(value)?);
        Ok(())
    }

    fn end(self) -> Result<Native> {
        let mut object = NativeMap::new();
        object.insert(self.name, Native::Seq(self.vec));
        Ok(Native::Map(object))
    }
}

impl serde::ser::SerializeMap for SerializeMap {
    type Ok = Native;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.next_key = Some(key.serialize(MapKeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| Error::mismatch("map value serialized before its key"))?;

        self.map.insert(key, crate::to_native(value)?);
        Ok(())
    }

    fn end(self) -> Result<Native> {
        Ok(Native::Map(self.map))
    }
}

impl serde::ser::SerializeStruct for SerializeMap {
    type Ok = Native;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        serde::ser::SerializeMap::serialize_entry(self, key, value)
    }

    fn end(self) -> Result<Native> {
        serde::ser::SerializeMap::end(self)
    }
}

impl serde::ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Native;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(String::from(key), crate::to_native(value)?);
        Ok(())
    }

    fn end(self) -> Result<Native> {
        let mut object = NativeMap::new();
        object.insert(self.name, Native::Map(self.map));
        Ok(Native::Map(object))
    }
}

struct MapKeySerializer;

fn key_must_be_a_string() -> Error {
    Error::unsupported("compound key must be a string")
}

impl serde::Serializer for MapKeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_bool(self, _value: bool) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_i8(self, value: i8) -> Result<String> {
        Ok(value.to_string())
    }

    fn serialize_i16(self, value: i16) -> Result<String> {
        Ok(value.to_string())
    }

    fn serialize_i32(self, value: i32) -> Result<String> {
        Ok(value.to_string())
    }

    fn serialize_i64(self, value: i64) -> Result<String> {
        Ok(value.to_string())
    }

    fn serialize_u8(self, value: u8) -> Result<String> {
        Ok(value.to_string())
    }

    fn serialize_u16(self, value: u16) -> Result<String> {
        Ok(value.to_string())
    }

    fn serialize_u32(self, value: u32) -> Result<String> {
        Ok(value.to_string())
    }

    fn serialize_u64(self, value: u64) -> Result<String> {
        Ok(value.to_string())
    }

    fn serialize_f32(self, _value: f32) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_f64(self, _value: f64) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_char(self, value: char) -> Result<String> {
        Ok(value.to_string())
    }

    fn serialize_str(self, value: &str) -> Result<String> {
        Ok(value.to_owned())
    }

    fn serialize_bytes(self, _value: &[u8]) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_unit(self) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(key_must_be_a_string())
    }

    fn serialize_none(self) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_some<T>(self, _value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(key_must_be_a_string())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(key_must_be_a_string())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(key_must_be_a_string())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(key_must_be_a_string())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(key_must_be_a_string())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(key_must_be_a_string())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(key_must_be_a_string())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(key_must_be_a_string())
    }

    fn collect_str<T>(self, value: &T) -> Result<String>
    where
        T: ?Sized + std::fmt::Display,
    {
        Ok(value.to_string())
    }
}
