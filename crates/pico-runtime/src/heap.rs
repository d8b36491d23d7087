//! The heap arena that boxed objects live in. One contiguous region,
//! allocated before the compiled entry point runs and owned by the runtime
//! until process exit; the entry point writes objects into it through the
//! raw base pointer and the renderer reads them back through the checked
//! accessors here. Addresses embedded in tagged pointers stay valid for the
//! whole run, there is no relocation.

use thiserror::Error;

/// Arena capacity in bytes.
pub const HEAP_SIZE: usize = 1024 * 1024;

/// Size of one machine word. Object headers, pair cells and vector slots
/// are all this wide.
pub const WORD_SIZE: usize = 8;

/// Errors from dereferencing a tagged pointer into the arena. These are
/// reported as a malformed object rendering, never a crash: one bad value
/// must not keep the program from printing a result.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    #[error("address {0:#x} is outside the heap arena")]
    OutOfBounds(u64),

    #[error("string at {0:#x} has no terminator before the end of the heap")]
    TruncatedString(u64),
}

/// The arena itself. Backed by words so the base is 8 byte aligned, which
/// the pointer tagging scheme relies on.
pub struct Heap {
    words: Box<[u64]>,
}

impl Heap {
    pub fn new() -> Heap {
        Heap {
            words: vec![0; HEAP_SIZE / WORD_SIZE].into_boxed_slice(),
        }
    }

    /// First byte address of the arena.
    pub fn base(&self) -> u64 {
        self.words.as_ptr() as u64
    }

    pub fn size(&self) -> usize {
        HEAP_SIZE
    }

    /// Raw base pointer handed to the compiled entry point, which writes
    /// its boxed objects through it.
    pub fn base_mut(&mut self) -> *mut libc::c_void {
        self.words.as_mut_ptr() as *mut libc::c_void
    }

    /// Checks that `addr` points into the arena at all.
    pub fn check(&self, addr: u64) -> Result<(), HeapError> {
        self.offset_of(addr, 1).map(|_| ())
    }

    /// Translates an absolute address into an arena offset, failing unless
    /// `len` bytes starting there fit inside the arena.
    fn offset_of(&self, addr: u64, len: usize) -> Result<usize, HeapError> {
        let base = self.base();
        let end = base + HEAP_SIZE as u64;

        if addr < base || addr.saturating_add(len as u64) > end {
            return Err(HeapError::OutOfBounds(addr));
        }

        Ok((addr - base) as usize)
    }

    fn bytes(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.words.as_ptr() as *const u8, HEAP_SIZE) }
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        unsafe { std::slice::from_raw_parts_mut(self.words.as_mut_ptr() as *mut u8, HEAP_SIZE) }
    }

    /// Reads one word at an absolute address. Native endianness, the arena
    /// is an in-process contract with generated code, not a wire format.
    pub fn word(&self, addr: u64) -> Result<u64, HeapError> {
        let offset = self.offset_of(addr, WORD_SIZE)?;
        let bytes = &self.bytes()[offset..offset + WORD_SIZE];

        Ok(u64::from_ne_bytes(bytes.try_into().unwrap()))
    }

    pub fn write_word(&mut self, addr: u64, word: u64) -> Result<(), HeapError> {
        let offset = self.offset_of(addr, WORD_SIZE)?;
        self.bytes_mut()[offset..offset + WORD_SIZE].copy_from_slice(&word.to_ne_bytes());

        Ok(())
    }

    pub fn write_bytes(&mut self, addr: u64, data: &[u8]) -> Result<(), HeapError> {
        let offset = self.offset_of(addr, data.len())?;
        self.bytes_mut()[offset..offset + data.len()].copy_from_slice(data);

        Ok(())
    }

    /// Reads a NUL terminated byte run starting at `addr`. Fails if the run
    /// leaves the arena before hitting a terminator.
    pub fn c_str(&self, addr: u64) -> Result<String, HeapError> {
        let start = self.offset_of(addr, 1)?;
        let bytes = &self.bytes()[start..];

        match bytes.iter().position(|&b| b == 0) {
            Some(nul) => Ok(String::from_utf8_lossy(&bytes[..nul]).into_owned()),
            None => Err(HeapError::TruncatedString(addr)),
        }
    }

    /// Reads the text of a string object: a length word followed by the
    /// raw bytes, NUL terminated for display.
    pub fn string(&self, addr: u64) -> Result<String, HeapError> {
        self.word(addr)?;
        self.c_str(addr + WORD_SIZE as u64)
    }
}

impl Default for Heap {
    fn default() -> Heap {
        Heap::new()
    }
}
