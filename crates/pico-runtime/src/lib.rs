//! Runtime support for compiled pico scheme programs. The compiler emits
//! native code whose only way of handing a value back is a single pointer
//! tagged machine word, so everything here revolves around that word: the
//! bit layout lives in [tag], decoding lives in [value], boxed objects live
//! in the [heap] arena and [exec] runs a compiled entry point and prints
//! what it returned.

pub mod exec;
pub mod heap;
pub mod tag;
pub mod value;
