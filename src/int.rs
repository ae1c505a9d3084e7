use crate::TagId;

/// Width of an NBT integer. Every integer stored in a tag is kept within the
/// two's-complement range of its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntWidth {
    Byte,
    Short,
    Int,
    Long,
}

impl IntWidth {
    pub const fn bits(self) -> u32 {
        match self {
            IntWidth::Byte => 8,
            IntWidth::Short => 16,
            IntWidth::Int => 32,
            IntWidth::Long => 64,
        }
    }

    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// The scalar tag carrying an integer of this width.
    pub const fn tag_id(self) -> TagId {
        match self {
            IntWidth::Byte => TagId::Byte,
            IntWidth::Short => TagId::Short,
            IntWidth::Int => TagId::Int,
            IntWidth::Long => TagId::Long,
        }
    }

    /// The width of a scalar integer tag, `None` for any other tag.
    pub const fn of_scalar(tag: TagId) -> Option<IntWidth> {
        match tag {
            TagId::Byte => Some(IntWidth::Byte),
            TagId::Short => Some(IntWidth::Short),
            TagId::Int => Some(IntWidth::Int),
            TagId::Long => Some(IntWidth::Long),
            _ => None,
        }
    }

    /// The element width of an integer array tag, `None` for any other tag.
    pub const fn of_array(tag: TagId) -> Option<IntWidth> {
        match tag {
            TagId::ByteArray => Some(IntWidth::Byte),
            TagId::IntArray => Some(IntWidth::Int),
            TagId::LongArray => Some(IntWidth::Long),
            _ => None,
        }
    }

    /// Narrowest width whose signed range contains `value`.
    pub fn narrowest(value: i128) -> Option<IntWidth> {
        [IntWidth::Byte, IntWidth::Short, IntWidth::Int, IntWidth::Long]
            .into_iter()
            .find(|w| w.contains(value))
    }

    pub fn contains(self, value: i128) -> bool {
        let half = 1i128 << (self.bits() - 1);
        (-half..half).contains(&value)
    }

    /// Wrap any integer into this width's two's-complement range: keep the
    /// low bits, then reinterpret the top kept bit as the sign.
    pub fn normalize(self, value: i128) -> i64 {
        let mask = (1i128 << self.bits()) - 1;
        let sign = 1i128 << (self.bits() - 1);
        (((value & mask) ^ sign) - sign) as i64
    }
}

/// Number of bits needed for the magnitude of `value`, ignoring sign.
pub(crate) fn bit_length(value: i128) -> u32 {
    128 - value.unsigned_abs().leading_zeros()
}
