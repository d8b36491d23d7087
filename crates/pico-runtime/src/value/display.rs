//! Rendering of decoded values, the second line of the runtime's report.
//! Boxed objects are shown as an opaque `#<kind 0xADDR>` reference; only
//! strings get their payload read back out of the arena. Dereference
//! failures render as a malformed object instead of propagating, so one bad
//! pointer still produces output.

use std::fmt::Display;

use crate::heap::Heap;
use crate::tag::PtrTag;
use crate::value::{FatPtr, Value};

/// A value paired with the arena its pointers reach into. Stateless:
/// formatting only reads the arena contents at call time.
pub struct Render<'a> {
    value: Value,
    heap: &'a Heap,
}

impl<'a> Render<'a> {
    pub fn new(value: Value, heap: &'a Heap) -> Render<'a> {
        Render { value, heap }
    }

    /// `#<kind 0xADDR>` for objects whose structure is not printed, after
    /// checking that the address lands inside the arena at all.
    fn opaque(&self, f: &mut std::fmt::Formatter<'_>, tag: PtrTag, addr: u64) -> std::fmt::Result {
        match self.heap.check(addr) {
            Ok(()) => write!(f, "#<{} {addr:#x}>", tag.kind()),
            Err(err) => write!(f, "#<malformed {} {addr:#x}: {err}>", tag.kind()),
        }
    }
}

impl Display for Render<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value.classify() {
            FatPtr::Fixnum(n) => write!(f, "{}", n),
            FatPtr::Char(c) => write!(f, "{}", c as char),
            FatPtr::Bool(true) => write!(f, "#t"),
            FatPtr::Bool(false) => write!(f, "#f"),
            FatPtr::EmptyList => write!(f, "()"),
            FatPtr::Pair(addr) => self.opaque(f, PtrTag::Pair, addr),
            FatPtr::Vector(addr) => self.opaque(f, PtrTag::Vector, addr),
            FatPtr::Symbol(addr) => self.opaque(f, PtrTag::Symbol, addr),
            FatPtr::Closure(addr) => self.opaque(f, PtrTag::Closure, addr),
            FatPtr::Str(addr) => match self.heap.string(addr) {
                Ok(text) => write!(f, "#<string {addr:#x}>\n{}", text),
                Err(err) => write!(f, "#<malformed string {addr:#x}: {err}>"),
            },
            FatPtr::Unknown(word) => write!(f, "#<unknown {word:#x}>"),
        }
    }
}
