//! Runs a compiled entry point and reports the value it returned. The
//! runtime's side of the batch model: allocate the arena, hand its base
//! pointer to the generated code, take back one tagged word, print two
//! lines. Single threaded, one writer, the decoder only reads afterwards.

use std::io;

use crate::heap::Heap;
use crate::value::display::Render;
use crate::value::Value;

/// Signature of a compiled entry point. The generated code gets the arena
/// base pointer, may write boxed objects through it and returns the final
/// tagged word.
pub type EntryFn = unsafe extern "C" fn(heap: *mut libc::c_void) -> u64;

/// Allocates a fresh arena, runs the entry point against it and returns
/// the resulting word together with the arena it may point into.
pub fn run(entry: EntryFn) -> (Value, Heap) {
    let mut heap = Heap::new();
    let word = unsafe { entry(heap.base_mut()) };

    (Value::new(word), heap)
}

/// Writes the two line report: the raw word in hex, then its rendering.
pub fn report<W: io::Write>(out: &mut W, value: Value, heap: &Heap) -> io::Result<()> {
    writeln!(out, "{:#x}", value.raw())?;
    writeln!(out, "{}", Render::new(value, heap))
}
