//! Bit layout of the tagged word. This is the binary contract between the
//! code generator and the runtime: compiled code builds words with these
//! constants and the decoder takes them apart with the same ones, so any
//! change here has to happen on both sides at once.

/// Fixnums keep their low 2 bits zero and carry the integer in the rest.
pub const FIXNUM_MASK: u64 = 0b11;
pub const FIXNUM_TAG: u64 = 0b00;
pub const FIXNUM_SHIFT: u32 = 2;

/// Characters carry their code point byte above an 8 bit tag.
pub const CHAR_MASK: u64 = 0xff;
pub const CHAR_TAG: u64 = 0x0f;
pub const CHAR_SHIFT: u32 = 8;

/// Booleans are a 7 bit tag plus the truth bit right above it, so
/// `#f` is `0x1f` and `#t` is `0x9f`.
pub const BOOL_MASK: u64 = 0x7f;
pub const BOOL_TAG: u64 = 0x1f;
pub const BOOL_SHIFT: u32 = 7;

/// The empty list is a single sentinel word, not a mask family.
pub const EMPTY_LIST: u64 = 0x2f;

/// Heap pointers steal the low 3 bits for a [PtrTag]; the rest of the word
/// is the byte address of the object, which is 8 byte aligned so nothing
/// is lost.
pub const PTR_MASK: u64 = 0b111;
pub const ADDR_MASK: u64 = !PTR_MASK;

/// Which object shape a tagged pointer addresses. The discriminants are the
/// low 3 bits of the word. 0 and 4 belong to the fixnum space and 7 is
/// unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PtrTag {
    Pair = 1,
    Vector = 2,
    Str = 3,
    Symbol = 5,
    Closure = 6,
}

impl PtrTag {
    pub fn from_bits(bits: u64) -> Option<PtrTag> {
        match bits {
            1 => Some(PtrTag::Pair),
            2 => Some(PtrTag::Vector),
            3 => Some(PtrTag::Str),
            5 => Some(PtrTag::Symbol),
            6 => Some(PtrTag::Closure),
            _ => None,
        }
    }

    /// Name used in the `#<kind 0xADDR>` renderings.
    pub fn kind(self) -> &'static str {
        match self {
            PtrTag::Pair => "pair",
            PtrTag::Vector => "vector",
            PtrTag::Str => "string",
            PtrTag::Symbol => "symbol",
            PtrTag::Closure => "closure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ptr_tags_round_trip() {
        for tag in [
            PtrTag::Pair,
            PtrTag::Vector,
            PtrTag::Str,
            PtrTag::Symbol,
            PtrTag::Closure,
        ] {
            assert_eq!(PtrTag::from_bits(tag as u64), Some(tag));
        }
    }

    #[test]
    fn fixnum_and_unassigned_bits_are_not_ptr_tags() {
        assert_eq!(PtrTag::from_bits(0), None);
        assert_eq!(PtrTag::from_bits(4), None);
        assert_eq!(PtrTag::from_bits(7), None);
    }
}
