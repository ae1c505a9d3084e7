mod de;
mod ser;

use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Serialize};

use crate::{error::Result, Tag, TagId, TagValue};

pub use self::ser::Serializer;

/// Ordered string-keyed map used for compounds in [`Native`] values.
pub type NativeMap = IndexMap<String, Native>;

/// A loosely-typed host value. This is what the decoder produces when tag
/// types are not preserved, and what the encoder accepts when it should pick
/// wire types itself.
///
/// An explicit [`Tag`] can be embedded anywhere with [`Native::Tag`] to
/// force a particular wire type for that node.
///
/// ```rust
/// use nbtcodec::{native, Native};
///
/// let v = native!({
///     "name": "test",
///     "value": 42,
///     "scores": [200, 300],
/// });
/// assert_eq!(v["value"], Native::Int(42));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Native {
    Int(i128),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Seq(Vec<Native>),
    Map(NativeMap),
    Tag(Tag),
}

/// The host kind of a [`Native`] value. Type inference works on kinds only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Integer,
    Float,
    String,
    Bytes,
    Sequence,
    Mapping,
    Tagged(TagId),
}

impl Native {
    pub fn kind(&self) -> Kind {
        match self {
            Native::Int(_) => Kind::Integer,
            Native::Float(_) => Kind::Float,
            Native::String(_) => Kind::String,
            Native::Bytes(_) => Kind::Bytes,
            Native::Seq(_) => Kind::Sequence,
            Native::Map(_) => Kind::Mapping,
            Native::Tag(t) => Kind::Tagged(t.id()),
        }
    }

    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            Native::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Native::Float(v) => Some(v),
            Native::Int(v) => Some(v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Native::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Native]> {
        match self {
            Native::Seq(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&NativeMap> {
        match self {
            Native::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Native> {
        self.as_map().and_then(|m| m.get(key))
    }
}

impl std::ops::Index<&str> for Native {
    type Output = Native;

    /// Panics if this is not a map or the key is missing, like indexing a
    /// `HashMap`.
    fn index(&self, key: &str) -> &Native {
        match self {
            Native::Map(m) => &m[key],
            _ => panic!("cannot index {:?} with a string key", self.kind()),
        }
    }
}

impl TagValue {
    /// Flatten into a plain host value, dropping tag types. Byte arrays
    /// become [`Native::Bytes`].
    pub fn to_native(&self) -> Native {
        match self {
            TagValue::End => Native::Seq(vec![]),
            TagValue::Byte(v) => Native::Int(*v as i128),
            TagValue::Short(v) => Native::Int(*v as i128),
            TagValue::Int(v) => Native::Int(*v as i128),
            TagValue::Long(v) => Native::Int(*v as i128),
            TagValue::Float(v) => Native::Float(*v as f64),
            TagValue::Double(v) => Native::Float(*v),
            TagValue::ByteArray(v) => Native::Bytes(v.to_bytes()),
            TagValue::String(v) => Native::String(v.clone()),
            TagValue::List(v) => Native::Seq(v.iter().map(TagValue::to_native).collect()),
            TagValue::Compound(v) => Native::Map(
                v.iter()
                    .map(|(k, t)| (k.to_owned(), t.value().to_native()))
                    .collect(),
            ),
            TagValue::IntArray(v) => Native::Seq(v.iter().map(|i| Native::Int(*i as i128)).collect()),
            TagValue::LongArray(v) => Native::Seq(v.iter().map(|i| Native::Int(*i as i128)).collect()),
        }
    }
}

impl Tag {
    /// See [`TagValue::to_native`].
    pub fn to_native(&self) -> Native {
        self.value().to_native()
    }
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Native {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
    };
}
from!(i8, Int, .into());
from!(u8, Int, .into());
from!(i16, Int, .into());
from!(u16, Int, .into());
from!(i32, Int, .into());
from!(u32, Int, .into());
from!(i64, Int, .into());
from!(u64, Int, .into());
from!(i128, Int);
from!(f32, Float, .into());
from!(f64, Float);
from!(String, String);
from!(&str, String, .to_owned());
from!(Vec<u8>, Bytes);
from!(Vec<Native>, Seq);
from!(NativeMap, Map);
from!(Tag, Tag);

impl From<bool> for Native {
    fn from(val: bool) -> Self {
        Native::Int(i128::from(val))
    }
}

impl From<TagValue> for Native {
    fn from(val: TagValue) -> Self {
        Native::Tag(Tag::new(val))
    }
}

/// Convert a `T` into a [`Native`] value, which the encoder can then write
/// with inferred wire types.
///
/// ```
/// use serde::Serialize;
/// use nbtcodec::{native, to_native};
///
/// #[derive(Serialize)]
/// struct Player {
///     name: String,
///     level: u8,
/// }
///
/// let p = Player { name: "Steve".to_owned(), level: 12 };
/// assert_eq!(to_native(&p).unwrap(), native!({"name": "Steve", "level": 12}));
/// ```
///
/// # Errors
///
/// Fails for values NBT cannot represent, such as `None` or maps whose keys
/// are not strings.
pub fn to_native<T>(value: &T) -> Result<Native>
where
    T: ?Sized + Serialize,
{
    value.serialize(&mut Serializer)
}

/// Interpret a [`Native`] value as an instance of type `T`.
///
/// ```
/// use serde::Deserialize;
/// use nbtcodec::{from_native, native};
///
/// #[derive(Deserialize)]
/// struct Player {
///     name: String,
///     level: u8,
/// }
///
/// let p: Player = from_native(&native!({"name": "Steve", "level": 12})).unwrap();
/// assert_eq!(p.level, 12);
/// ```
pub fn from_native<T>(value: &Native) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(value)
}
