//! The typed tree: [`Tag`], its payload [`TagValue`], and the two container
//! payloads [`List`] and [`Compound`].
//!
//! ```rust
//! use nbtcodec::{Compound, List, Tag, TagId, TagValue};
//!
//! let mut pos = List::of(TagId::Double);
//! pos.push(1.0).unwrap();
//! pos.push(64.0).unwrap();
//!
//! let mut root = Compound::new();
//! root.insert("Pos", Tag::new(pos));
//! root.insert("Health", Tag::short(20));
//!
//! let root = Tag::named("", root);
//! assert_eq!(root.id(), TagId::Compound);
//! ```

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::{ByteArray, IntArray, IntWidth, LongArray, TagId};

/// Payload of a tag. Integers are held in their wire width so they can never
/// leave the range of their type.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(ByteArray),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(IntArray),
    LongArray(LongArray),
}

impl TagValue {
    pub fn id(&self) -> TagId {
        match self {
            TagValue::End => TagId::End,
            TagValue::Byte(_) => TagId::Byte,
            TagValue::Short(_) => TagId::Short,
            TagValue::Int(_) => TagId::Int,
            TagValue::Long(_) => TagId::Long,
            TagValue::Float(_) => TagId::Float,
            TagValue::Double(_) => TagId::Double,
            TagValue::ByteArray(_) => TagId::ByteArray,
            TagValue::String(_) => TagId::String,
            TagValue::List(_) => TagId::List,
            TagValue::Compound(_) => TagId::Compound,
            TagValue::IntArray(_) => TagId::IntArray,
            TagValue::LongArray(_) => TagId::LongArray,
        }
    }

    /// An integer payload of the given width, wrapping `value` into range.
    pub fn integer(width: IntWidth, value: impl Into<i128>) -> Self {
        let v = width.normalize(value.into());
        match width {
            IntWidth::Byte => TagValue::Byte(v as i8),
            IntWidth::Short => TagValue::Short(v as i16),
            IntWidth::Int => TagValue::Int(v as i32),
            IntWidth::Long => TagValue::Long(v),
        }
    }

    pub fn byte(value: impl Into<i128>) -> Self {
        Self::integer(IntWidth::Byte, value)
    }

    pub fn short(value: impl Into<i128>) -> Self {
        Self::integer(IntWidth::Short, value)
    }

    pub fn int(value: impl Into<i128>) -> Self {
        Self::integer(IntWidth::Int, value)
    }

    pub fn long(value: impl Into<i128>) -> Self {
        Self::integer(IntWidth::Long, value)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            TagValue::Byte(v) => Some(v as i64),
            TagValue::Short(v) => Some(v as i64),
            TagValue::Int(v) => Some(v as i64),
            TagValue::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            TagValue::Float(v) => Some(v as f64),
            TagValue::Double(v) => Some(v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            TagValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            TagValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            TagValue::Compound(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            TagValue::Compound(v) => Some(v),
            _ => None,
        }
    }

    fn is_replaceable(&self) -> bool {
        matches!(
            self,
            TagValue::Byte(_)
                | TagValue::Short(_)
                | TagValue::Int(_)
                | TagValue::Long(_)
                | TagValue::Float(_)
                | TagValue::Double(_)
        )
    }
}

/// A node of the tree: a payload and, when it is a member of a compound or
/// the root, a name.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    name: Option<String>,
    value: TagValue,
}

impl Tag {
    /// An unnamed tag.
    pub fn new(value: impl Into<TagValue>) -> Self {
        Self {
            name: None,
            value: value.into(),
        }
    }

    pub fn named(name: impl Into<String>, value: impl Into<TagValue>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    pub fn byte(value: impl Into<i128>) -> Self {
        Self::new(TagValue::byte(value))
    }

    pub fn short(value: impl Into<i128>) -> Self {
        Self::new(TagValue::short(value))
    }

    pub fn int(value: impl Into<i128>) -> Self {
        Self::new(TagValue::int(value))
    }

    pub fn long(value: impl Into<i128>) -> Self {
        Self::new(TagValue::long(value))
    }

    pub fn float(value: f32) -> Self {
        Self::new(TagValue::Float(value))
    }

    pub fn double(value: f64) -> Self {
        Self::new(TagValue::Double(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(TagValue::String(value.into()))
    }

    pub fn id(&self) -> TagId {
        self.value.id()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn value(&self) -> &TagValue {
        &self.value
    }

    /// Replace a numeric payload with another of the same tag type.
    ///
    /// String payloads are immutable, and arrays, lists and compounds are
    /// changed through their own methods, so replacing any of those fails.
    pub fn set_value(&mut self, value: impl Into<TagValue>) -> Result<()> {
        let value = value.into();
        if !self.value.is_replaceable() {
            return Err(Error::mismatch(format!(
                "payload of {:?} tag cannot be replaced",
                self.id()
            )));
        }
        if value.id() != self.id() {
            return Err(Error::mismatch(format!(
                "expected {:?} value, found {:?}",
                self.id(),
                value.id()
            )));
        }
        self.value = value;
        Ok(())
    }

    /// Mutable access to list payloads.
    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        self.value.as_list_mut()
    }

    /// Mutable access to compound payloads.
    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        self.value.as_compound_mut()
    }

    pub fn into_value(self) -> TagValue {
        self.value
    }

    pub fn into_parts(self) -> (Option<String>, TagValue) {
        (self.name, self.value)
    }
}

impl From<TagValue> for Tag {
    fn from(value: TagValue) -> Self {
        Tag::new(value)
    }
}

/// Dropping the name is how a tag becomes a list element.
impl From<Tag> for TagValue {
    fn from(tag: Tag) -> Self {
        tag.value
    }
}

/// A homogeneous sequence of unnamed values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List {
    element: TagId,
    items: Vec<TagValue>,
}

impl List {
    /// An untyped empty list. Its element type is `End` until the first
    /// value is pushed, which then fixes it.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty list whose elements must be of type `element`.
    pub fn of(element: TagId) -> Self {
        Self {
            element,
            items: Vec::new(),
        }
    }

    /// Assemble a list whose items are already known to be `element`.
    pub(crate) fn from_parts(element: TagId, items: Vec<TagValue>) -> Self {
        debug_assert!(items.iter().all(|v| v.id() == element));
        Self { element, items }
    }

    /// Build a list from values, all of which must share one tag type.
    pub fn from_values<I, T>(element: TagId, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<TagValue>,
    {
        let mut list = Self::of(element);
        for v in values {
            list.push(v)?;
        }
        Ok(list)
    }

    pub fn element_type(&self) -> TagId {
        self.element
    }

    /// Append a value. Fails, leaving the list untouched, if the value is
    /// not of the element type.
    pub fn push(&mut self, value: impl Into<TagValue>) -> Result<()> {
        let value = value.into();
        let id = value.id();
        if id == TagId::End {
            return Err(Error::mismatch("end tags cannot be list elements"));
        }
        if self.element == TagId::End && self.items.is_empty() {
            self.element = id;
        }
        if id != self.element {
            return Err(Error::mismatch(format!(
                "list of {:?} cannot hold {:?}",
                self.element, id
            )));
        }
        self.items.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<TagValue> {
        self.items.pop()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TagValue> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TagValue> {
        self.items.iter()
    }

    pub fn into_inner(self) -> Vec<TagValue> {
        self.items
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a TagValue;
    type IntoIter = std::slice::Iter<'a, TagValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// An insertion-ordered map of named tags. The name stored on each child is
/// always its key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    entries: IndexMap<String, Tag>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `tag` under `key`, renaming the tag to `key`. Replacing an
    /// existing key keeps its original position and returns the old tag.
    pub fn insert(&mut self, key: impl Into<String>, tag: impl Into<Tag>) -> Option<Tag> {
        let key = key.into();
        let mut tag = tag.into();
        tag.name = Some(key.clone());
        self.entries.insert(key, tag)
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    /// Mutable access to the payload under `key`. The name is not exposed
    /// mutably, so it cannot drift from the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut TagValue> {
        self.entries.get_mut(key).map(|t| &mut t.value)
    }

    /// Remove `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Children in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_tags(self) -> impl Iterator<Item = Tag> {
        self.entries.into_iter().map(|(_, v)| v)
    }
}

impl<K: Into<String>, T: Into<Tag>> FromIterator<(K, T)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut c = Compound::new();
        for (k, v) in iter {
            c.insert(k, v);
        }
        c
    }
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for TagValue {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(i16, Short);
from!(i32, Int);
from!(i64, Long);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(ByteArray, ByteArray);
from!(IntArray, IntArray);
from!(LongArray, LongArray);
from!(List, List);
from!(Compound, Compound);

impl From<bool> for TagValue {
    fn from(val: bool) -> Self {
        Self::Byte(i8::from(val))
    }
}

macro_rules! tag_from {
    ($($type:ty),+) => {
        $(
            impl From<$type> for Tag {
                fn from(val: $type) -> Self {
                    Tag::new(val)
                }
            }
        )+
    };
}
tag_from!(i8, i16, i32, i64, f32, f64, bool, String, &str, ByteArray, IntArray, LongArray, List, Compound);

#[cfg(feature = "arbitrary1")]
fn arb_payload(u: &mut arbitrary::Unstructured, id: TagId) -> arbitrary::Result<TagValue> {
    Ok(match id {
        TagId::End => return Err(arbitrary::Error::IncorrectFormat),
        TagId::Byte => TagValue::Byte(u.arbitrary()?),
        TagId::Short => TagValue::Short(u.arbitrary()?),
        TagId::Int => TagValue::Int(u.arbitrary()?),
        TagId::Long => TagValue::Long(u.arbitrary()?),
        TagId::Float => TagValue::Float(u.arbitrary()?),
        TagId::Double => TagValue::Double(u.arbitrary()?),
        TagId::ByteArray => TagValue::ByteArray(ByteArray::new(u.arbitrary()?)),
        TagId::String => TagValue::String(u.arbitrary()?),
        TagId::IntArray => TagValue::IntArray(IntArray::new(u.arbitrary()?)),
        TagId::LongArray => TagValue::LongArray(LongArray::new(u.arbitrary()?)),

        // Lists need to all be the same type.
        TagId::List => {
            let element = u.arbitrary::<TagId>()?;
            if element == TagId::End {
                return Ok(TagValue::List(List::new()));
            }
            let len = u.arbitrary_len::<u8>()?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(arb_payload(u, element)?);
            }
            TagValue::List(List::from_parts(element, items))
        }
        TagId::Compound => {
            let mut c = Compound::new();
            for _ in 0..u.arbitrary_len::<(String, u8)>()? {
                let key: String = u.arbitrary()?;
                let id = u.arbitrary::<TagId>()?;
                if id != TagId::End {
                    c.insert(key, arb_payload(u, id)?);
                }
            }
            TagValue::Compound(c)
        }
    })
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for TagValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let id = u.arbitrary::<TagId>()?;
        arb_payload(u, id)
    }
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Tag {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Tag {
            name: u.arbitrary()?,
            value: u.arbitrary()?,
        })
    }
}
