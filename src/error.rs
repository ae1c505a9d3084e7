//! Contains the Error and Result type used by the decoder and encoder.
use std::fmt::Display;

/// An error produced while decoding or encoding NBT.
///
/// Every error is fatal for the call that produced it. Use
/// [`kind`][`Error::kind`] to tell invalid input apart from values that
/// cannot be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input ended part way through a value.
    TruncatedInput,

    /// A tag id outside of `0..=12` was read. Contains the offending byte.
    UnknownTag(u8),

    /// A string was not valid modified UTF-8. Contains the raw bytes.
    Encoding(Vec<u8>),

    /// An integer needs more than 64 bits, a string encodes to more than
    /// 65535 bytes, or a sequence is longer than the format allows.
    ValueTooLarge,

    /// A sequence holds values that cannot share one wire type.
    TypeInference,

    /// A value has no representation in NBT.
    UnsupportedType,

    /// A value of the wrong tag type was given to a typed container, or an
    /// immutable payload was replaced.
    TypeMismatch,

    /// The underlying reader or writer failed for a reason other than
    /// running out of input.
    Io,

    /// Message raised by a `Serialize` or `Deserialize` implementation.
    Custom,
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// True if the input was cut short.
    pub fn is_truncated(&self) -> bool {
        matches!(self.kind, ErrorKind::TruncatedInput)
    }

    pub(crate) fn truncated() -> Self {
        Self {
            msg: "eof: unexpectedly ran out of input".into(),
            kind: ErrorKind::TruncatedInput,
        }
    }

    pub(crate) fn unknown_tag(tag: u8) -> Self {
        Self {
            msg: format!("invalid nbt tag value: {}", tag),
            kind: ErrorKind::UnknownTag(tag),
        }
    }

    pub(crate) fn encoding(data: &[u8]) -> Self {
        Self {
            msg: format!(
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(data)
            ),
            kind: ErrorKind::Encoding(data.to_vec()),
        }
    }

    pub(crate) fn too_large(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::ValueTooLarge,
        }
    }

    pub(crate) fn inference(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::TypeInference,
        }
    }

    pub(crate) fn unsupported(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::UnsupportedType,
        }
    }

    pub(crate) fn mismatch(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::TypeMismatch,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self::truncated(),
            _ => Self {
                msg: format!("io error: {}", e),
                kind: ErrorKind::Io,
            },
        }
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self {
            msg: msg.to_string(),
            kind: ErrorKind::Custom,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Self {
            msg: msg.to_string(),
            kind: ErrorKind::Custom,
        }
    }
}
