//! Read-only program memory.

use log::warn;

use crate::error::CpuError;
use crate::memory::{Address, MEMORY_SIZE, checked_range};

/// The 256-byte program store.
///
/// Populated once at construction from a program image and never mutated
/// afterward: the type exposes no write operation. Owned and read only by the
/// CPU driving the fetch cycle.
#[derive(Debug, Clone)]
pub struct ReadOnly {
    data: [u8; MEMORY_SIZE],
}

impl ReadOnly {
    /// Build program memory from an image of at most 256 bytes; shorter
    /// images are zero-padded to the full space.
    ///
    /// Length validation (1-256 bytes) is the loader's job and happens before
    /// this constructor is reached; an oversized image here is a caller bug.
    pub fn from_image(image: &[u8]) -> Self {
        assert!(
            image.len() <= MEMORY_SIZE,
            "program image exceeds {MEMORY_SIZE} bytes"
        );
        let mut data = [0u8; MEMORY_SIZE];
        data[..image.len()].copy_from_slice(image);
        Self { data }
    }

    /// Read `len` bytes starting at `addr`.
    ///
    /// Never returns a partial result: the whole range must lie within the
    /// space or the read fails with `IllegalMemoryAccess`.
    #[inline]
    pub fn read(&self, addr: Address, len: usize) -> Result<&[u8], CpuError> {
        match checked_range(addr, len) {
            Some(range) => Ok(&self.data[range]),
            None => {
                warn!("out of bounds read on program memory: {len} byte(s) at {addr:#04x}");
                Err(CpuError::IllegalMemoryAccess { addr, len })
            }
        }
    }

    /// Expose the full contents (for the final state dump).
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}
