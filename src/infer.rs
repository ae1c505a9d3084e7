//! Choosing wire types for untyped sequences.
//!
//! Integer sequences are sized by the largest magnitude they hold, not by
//! the width each element would get on its own:
//!
//! | bits needed | container |
//! | ----------- | --------- |
//! | 0 to 8 | Byte Array |
//! | 9 to 16 | List of Short |
//! | 17 to 32 | Int Array |
//! | 33 to 64 | Long Array |
//!
//! Nested sequences are only checked one level deep: the elements of a list
//! of lists must agree on their own container type, but what those inner
//! lists hold is decided when they are encoded.

use crate::error::{Error, Result};
use crate::int::bit_length;
use crate::native::{Kind, Native};
use crate::TagId;

/// Outcome of inference for one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inferred {
    /// List, Byte Array, Int Array or Long Array.
    pub container: TagId,
    /// Element type for lists. `End` for the array containers, and for
    /// lists whose element type was not inspected.
    pub element: TagId,
}

impl Inferred {
    const fn array(container: TagId) -> Self {
        Self {
            container,
            element: TagId::End,
        }
    }

    const fn list(element: TagId) -> Self {
        Self {
            container: TagId::List,
            element,
        }
    }
}

/// Infer the container for a sequence-like value. `value` must be
/// [`Native::Bytes`] or [`Native::Seq`].
pub fn infer(value: &Native) -> Result<Inferred> {
    infer_inner(value, true)
}

fn infer_inner(value: &Native, deep: bool) -> Result<Inferred> {
    let items = match value {
        Native::Bytes(_) => return Ok(Inferred::array(TagId::ByteArray)),
        Native::Seq(items) => items,
        other => {
            return Err(Error::inference(format!(
                "cannot infer a container for {:?}",
                other.kind()
            )))
        }
    };

    let mut kinds = items.iter().map(Native::kind);
    let first = match kinds.next() {
        Some(k) => k,
        None => return Ok(Inferred::list(TagId::End)),
    };
    if kinds.any(|k| k != first) {
        return Err(Error::inference("cannot infer target tag for list of mixed types"));
    }

    match first {
        Kind::Integer => {
            let bits = items
                .iter()
                .filter_map(Native::as_i128)
                .map(bit_length)
                .max()
                .unwrap_or(0);

            match bits {
                0..=8 => Ok(Inferred::array(TagId::ByteArray)),
                9..=16 => Ok(Inferred::list(TagId::Short)),
                17..=32 => Ok(Inferred::array(TagId::IntArray)),
                33..=64 => Ok(Inferred::array(TagId::LongArray)),
                _ => Err(Error::too_large("list of int too large to be encoded")),
            }
        }
        Kind::Float => Ok(Inferred::list(TagId::Double)),
        Kind::String => Ok(Inferred::list(TagId::String)),
        Kind::Mapping => Ok(Inferred::list(TagId::Compound)),
        Kind::Bytes | Kind::Sequence if deep => {
            let mut shared: Option<TagId> = None;
            for item in items {
                let inner = infer_inner(item, false)?.container;
                match shared {
                    None => shared = Some(inner),
                    Some(t) if t == inner => {}
                    Some(t) => {
                        return Err(Error::inference(format!(
                            "cannot infer target tag for list: nested {:?} and {:?}",
                            t, inner
                        )))
                    }
                }
            }
            Ok(Inferred::list(shared.unwrap_or(TagId::End)))
        }
        Kind::Bytes | Kind::Sequence => Ok(Inferred::list(TagId::End)),
        Kind::Tagged(id) => {
            if id == TagId::End {
                return Err(Error::inference("end tags cannot be list elements"));
            }
            Ok(Inferred::list(id))
        }
    }
}
