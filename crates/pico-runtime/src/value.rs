//! This module describes the values that compiled pico scheme code hands
//! back to the runtime. [Value] is one pointer tagged machine word;
//! [Value::classify] recovers the runtime type and payload from it as a
//! [FatPtr], which is easier to work with on the rust side.

use crate::tag::*;

pub mod display;

/// A single tagged machine word as returned by the compiled entry point.
/// Either an immediate value or a tagged address into the heap arena.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Value(u64);

/// A decoded value, one variant per classification. Heap variants carry the
/// masked byte address of the object; `Unknown` keeps the whole word so it
/// can still be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatPtr {
    Fixnum(i64),
    Char(u8),
    Bool(bool),
    EmptyList,
    // Heap stuff
    Pair(u64),
    Vector(u64),
    Str(u64),
    Symbol(u64),
    Closure(u64),
    Unknown(u64),
}

impl Value {
    pub fn new(raw: u64) -> Value {
        Value(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }

    /// Encodes an integer the way the compiler does, shifted over the
    /// 2 bit tag.
    pub fn fixnum(n: i64) -> Value {
        Value((n << FIXNUM_SHIFT) as u64)
    }

    pub fn char(c: u8) -> Value {
        Value(((c as u64) << CHAR_SHIFT) | CHAR_TAG)
    }

    pub fn bool(b: bool) -> Value {
        Value(((b as u64) << BOOL_SHIFT) | BOOL_TAG)
    }

    pub fn empty_list() -> Value {
        Value(EMPTY_LIST)
    }

    /// Tags a heap address. The address has to be 8 byte aligned or the tag
    /// bits would clobber it.
    pub fn pointer(tag: PtrTag, addr: u64) -> Value {
        debug_assert_eq!(addr & PTR_MASK, 0, "unaligned heap address {addr:#x}");
        Value(addr | tag as u64)
    }

    /// Recovers the runtime type and payload of the word. Pure and total:
    /// every word classifies to exactly one variant, with [FatPtr::Unknown]
    /// as the terminal catch-all.
    ///
    /// The immediate bit patterns are not a clean partition, so the checks
    /// run in a fixed priority order: the short fixnum mask first, then the
    /// longer immediate masks, the empty list by exact equality before the
    /// boolean mask whose region it collides with, and the pointer tags
    /// last. Reordering these changes what some words decode to.
    pub fn classify(self) -> FatPtr {
        let word = self.0;

        if word & FIXNUM_MASK == FIXNUM_TAG {
            // Arithmetic shift, negative fixnums keep their sign.
            return FatPtr::Fixnum((word as i64) >> FIXNUM_SHIFT);
        }

        if word & CHAR_MASK == CHAR_TAG {
            return FatPtr::Char(((word >> CHAR_SHIFT) & 0xff) as u8);
        }

        if word == EMPTY_LIST {
            return FatPtr::EmptyList;
        }

        if word & BOOL_MASK == BOOL_TAG {
            return FatPtr::Bool(word >> BOOL_SHIFT != 0);
        }

        let addr = word & ADDR_MASK;

        match PtrTag::from_bits(word & PTR_MASK) {
            Some(PtrTag::Pair) => FatPtr::Pair(addr),
            Some(PtrTag::Vector) => FatPtr::Vector(addr),
            Some(PtrTag::Str) => FatPtr::Str(addr),
            Some(PtrTag::Symbol) => FatPtr::Symbol(addr),
            Some(PtrTag::Closure) => FatPtr::Closure(addr),
            None => FatPtr::Unknown(word),
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Value({:#x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixnums_round_trip() {
        for n in [0, 1, -1, 42, -42, i64::MAX >> 2, i64::MIN >> 2] {
            assert_eq!(Value::fixnum(n).classify(), FatPtr::Fixnum(n));
        }
    }

    #[test]
    fn chars_round_trip() {
        for c in 0..=u8::MAX {
            assert_eq!(Value::char(c).classify(), FatPtr::Char(c));
        }
    }

    #[test]
    fn empty_list_is_the_sentinel_word() {
        assert_eq!(Value::empty_list().raw(), 0x2f);
        assert_eq!(Value::new(0x2f).classify(), FatPtr::EmptyList);
    }

    #[test]
    fn booleans() {
        assert_eq!(Value::bool(true).raw(), 0x9f);
        assert_eq!(Value::bool(false).raw(), 0x1f);
        assert_eq!(Value::bool(true).classify(), FatPtr::Bool(true));
        assert_eq!(Value::bool(false).classify(), FatPtr::Bool(false));
    }

    #[test]
    fn heap_pointers_keep_their_address() {
        let addr = 0x4000;
        assert_eq!(
            Value::pointer(PtrTag::Pair, addr).classify(),
            FatPtr::Pair(addr)
        );
        assert_eq!(
            Value::pointer(PtrTag::Vector, addr).classify(),
            FatPtr::Vector(addr)
        );
        assert_eq!(
            Value::pointer(PtrTag::Str, addr).classify(),
            FatPtr::Str(addr)
        );
        assert_eq!(
            Value::pointer(PtrTag::Symbol, addr).classify(),
            FatPtr::Symbol(addr)
        );
        assert_eq!(
            Value::pointer(PtrTag::Closure, addr).classify(),
            FatPtr::Closure(addr)
        );
    }

    #[test]
    fn empty_list_wins_over_the_boolean_mask() {
        // 0x2f sits in the pointer tag space too (low bits 0b111), only the
        // exact equality check keeps it out of Unknown.
        assert_eq!(Value::new(0x2f).classify(), FatPtr::EmptyList);
        assert_ne!(Value::new(0xaf).classify(), FatPtr::EmptyList);
    }

    #[test]
    fn leftover_words_classify_as_unknown() {
        // Low 3 bits 0b111 but not a char, bool or the empty list.
        assert_eq!(Value::new(0x47).classify(), FatPtr::Unknown(0x47));
        assert_eq!(Value::new(0x07).classify(), FatPtr::Unknown(0x07));
    }

    #[test]
    fn low_bits_00_always_mean_fixnum() {
        // 0b100 has low 2 bits zero, so it is the fixnum 1, not a pointer.
        assert_eq!(Value::new(0b100).classify(), FatPtr::Fixnum(1));
    }
}
