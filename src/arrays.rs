use std::ops::Deref;

use crate::IntWidth;

macro_rules! int_array {
    ($(#[$meta:meta])* $name:ident, $elem:ty, $width:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
        pub struct $name {
            data: Vec<$elem>,
        }

        impl $name {
            pub fn new(data: Vec<$elem>) -> Self {
                Self { data }
            }

            /// Build an array from arbitrary integers, wrapping each into the
            /// element width.
            pub fn from_wrapping<I, T>(values: I) -> Self
            where
                I: IntoIterator<Item = T>,
                T: Into<i128>,
            {
                Self {
                    data: values
                        .into_iter()
                        .map(|v| $width.normalize(v.into()) as $elem)
                        .collect(),
                }
            }

            pub fn push(&mut self, value: $elem) {
                self.data.push(value);
            }

            /// Append an arbitrary integer, wrapping it into the element width.
            pub fn push_wrapping(&mut self, value: impl Into<i128>) {
                self.data.push($width.normalize(value.into()) as $elem);
            }

            pub fn into_inner(self) -> Vec<$elem> {
                self.data
            }
        }

        impl Deref for $name {
            type Target = Vec<$elem>;

            fn deref(&self) -> &Self::Target {
                &self.data
            }
        }

        impl From<Vec<$elem>> for $name {
            fn from(data: Vec<$elem>) -> Self {
                Self::new(data)
            }
        }

        impl FromIterator<$elem> for $name {
            fn from_iter<I: IntoIterator<Item = $elem>>(iter: I) -> Self {
                Self::new(iter.into_iter().collect())
            }
        }
    };
}

int_array!(
    /// Payload of a Byte Array tag.
    ByteArray,
    i8,
    IntWidth::Byte
);
int_array!(
    /// Payload of an Int Array tag.
    IntArray,
    i32,
    IntWidth::Int
);
int_array!(
    /// Payload of a Long Array tag.
    LongArray,
    i64,
    IntWidth::Long
);

impl ByteArray {
    /// Reinterpret raw bytes as signed bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::new(data.iter().map(|b| *b as i8).collect())
    }

    /// The array as raw (unsigned) bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.iter().map(|b| *b as u8).collect()
    }
}
