//! 16-byte aligned argument block storage.
//!
//! Generated code reads vectors and doubles straight out of the block, so
//! the buffer must start on a 16-byte boundary. `Vec<u8>` gives no such
//! guarantee; a vector of aligned chunks does.

use std::fmt;
use std::ops::Deref;

pub const ALIGN: usize = 16;

#[repr(C, align(16))]
#[derive(Clone, Copy)]
struct Chunk([u8; ALIGN]);

/// Packed argument values of one material instance.
#[derive(Clone)]
pub struct ArgumentBlock {
    chunks: Vec<Chunk>,
    len: usize,
}

impl ArgumentBlock {
    /// Zero-filled block of `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        Self {
            chunks: vec![Chunk([0; ALIGN]); len.div_ceil(ALIGN)],
            len,
        }
    }

    pub fn copy_from_slice(bytes: &[u8]) -> Self {
        let mut block = Self::zeroed(bytes.len());
        block.as_mut_slice().copy_from_slice(bytes);
        block
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        if self.chunks.is_empty() {
            return &[];
        }
        assert!(
            self.len <= self.chunks.len() * ALIGN,
            "ArgumentBlock invariant violated: len {} exceeds capacity {}",
            self.len,
            self.chunks.len() * ALIGN
        );
        // SAFETY: Chunk is repr(C) over [u8; ALIGN] and all `len` bytes are initialized.
        unsafe { std::slice::from_raw_parts(self.chunks.as_ptr() as *const u8, self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        if self.chunks.is_empty() {
            return &mut [];
        }
        assert!(
            self.len <= self.chunks.len() * ALIGN,
            "ArgumentBlock invariant violated: len {} exceeds capacity {}",
            self.len,
            self.chunks.len() * ALIGN
        );
        // SAFETY: as in `as_slice`; the exclusive borrow of `self` covers the chunks.
        unsafe { std::slice::from_raw_parts_mut(self.chunks.as_mut_ptr() as *mut u8, self.len) }
    }
}

impl Deref for ArgumentBlock {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl PartialEq for ArgumentBlock {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ArgumentBlock {}

impl fmt::Debug for ArgumentBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentBlock")
            .field("len", &self.len)
            .field("aligned", &(self.chunks.as_ptr() as usize % ALIGN == 0))
            .finish()
    }
}
