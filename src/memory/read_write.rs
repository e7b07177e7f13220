//! Read/write data memory.

use log::warn;

use crate::error::CpuError;
use crate::memory::{Address, MEMORY_SIZE, checked_range};

/// The 256-byte data store.
///
/// Starts zero-filled and is mutated only by the owning CPU via load/store
/// opcodes. Writes are all-or-nothing: a failed bounds check performs zero
/// mutation.
#[derive(Debug, Clone)]
pub struct ReadWrite {
    data: [u8; MEMORY_SIZE],
}

impl Default for ReadWrite {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ReadWrite {
    /// Create a zero-filled data space.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: [0; MEMORY_SIZE],
        }
    }

    /// Read `len` bytes starting at `addr`. Never partial.
    #[inline]
    pub fn read(&self, addr: Address, len: usize) -> Result<&[u8], CpuError> {
        match checked_range(addr, len) {
            Some(range) => Ok(&self.data[range]),
            None => {
                warn!("out of bounds read on data memory: {len} byte(s) at {addr:#04x}");
                Err(CpuError::IllegalMemoryAccess { addr, len })
            }
        }
    }

    /// Write all of `bytes` starting at `addr`.
    ///
    /// The bounds check fully precedes any mutation, so a failed write leaves
    /// the space untouched.
    #[inline]
    pub fn write(&mut self, addr: Address, bytes: &[u8]) -> Result<(), CpuError> {
        match checked_range(addr, bytes.len()) {
            Some(range) => {
                self.data[range].copy_from_slice(bytes);
                Ok(())
            }
            None => {
                let len = bytes.len();
                warn!("out of bounds write on data memory: {len} byte(s) at {addr:#04x}");
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
