/*!
memory - the two fixed 256-byte address spaces.

Address map:
- Program memory: `ReadOnly`, populated once from the program image
  (zero-padded) and never mutated afterward. Exposes no write operation at
  all; read-only-ness is a structural guarantee, not a runtime check.
- Data memory: `ReadWrite`, zero-filled at construction and mutated only by
  the owning CPU via load/store opcodes.

The two spaces are disjoint; an address means a different byte in each.
Every access is all-or-nothing: a bounds failure returns
`CpuError::IllegalMemoryAccess` and performs zero mutation, never a partial
read or write.
*/

mod read_only;
mod read_write;

pub use read_only::ReadOnly;
pub use read_write::ReadWrite;

/// Byte offset into a 256-byte space.
///
/// Wider than `u8` on purpose: a program counter that advances past the end
/// of program memory must be representable (and caught as an illegal access)
/// rather than silently wrapping to a low address.
pub type Address = u16;

/// Size of each address space (in bytes).
pub const MEMORY_SIZE: usize = 256;

/// Shared bounds check: the whole range `[addr, addr + len)` must lie inside
/// a 256-byte space. Returns the exclusive end index on success.
#[inline]
pub(crate) fn checked_range(addr: Address, len: usize) -> Option<std::ops::Range<usize>> {
    let start = addr as usize;
    let end = start.checked_add(len)?;
    if end > MEMORY_SIZE {
        return None;
    }
    Some(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_within_bounds() {
        assert_eq!(checked_range(0, 0), Some(0..0));
        assert_eq!(checked_range(0, 256), Some(0..256));
        assert_eq!(checked_range(255, 1), Some(255..256));
        // An empty window right at the end is legal: a 0-parameter opcode in
        // the last byte reads 0 bytes at offset 256.
        assert_eq!(checked_range(256, 0), Some(256..256));
    }

    #[test]
    fn range_past_end_rejected() {
        assert_eq!(checked_range(255, 2), None);
        assert_eq!(checked_range(256, 1), None);
        assert_eq!(checked_range(0x1234, 1), None);
    }
}
