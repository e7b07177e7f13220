/*!
state.rs - Canonical CPU architectural state (program counter, registers,
flags) and inline-friendly helpers.

Overview
========
`CpuState` is the single authoritative owner of everything architecturally
visible: the program counter, the four byte-wide registers and the two status
flags. It intentionally excludes:
  - Memory logic (the two address spaces live on the `Cpu` facade)
  - Instruction decode / dispatch logic
Those live in higher layers (instruction, dispatch, core modules).

Register file
=============
Exactly four registers, indices 0-3, conventionally named X, Y, Z, W. Indices
>= 4 are invalid and must fail upstream with `RegisterError`, never clamp or
wrap; the accessors here index directly and are only called after that
validation.

Flags
=====
- Compare: set by the equality / inequality comparison opcodes.
- Error: set whenever an executor signals a failure, including the non-fatal
  divide-by-zero case.
A conditional jump reads and then clears the flag it tests when taken.
*/

use std::fmt;

use crate::memory::Address;

/// Number of registers in the file.
pub const REGISTER_COUNT: usize = 4;

/// Conventional register names, by index.
pub const REGISTER_NAMES: [char; REGISTER_COUNT] = ['X', 'Y', 'Z', 'W'];

/// True if `index` does not name a register.
#[inline]
pub fn invalid_register(index: u8) -> bool {
    index as usize >= REGISTER_COUNT
}

/// Pure architectural register / flag container.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuState {
    pub pc: Address,
    pub registers: [u8; REGISTER_COUNT],
    pub compare: bool,
    pub error: bool,
}

impl CpuState {
    /// Power-up state: pc 0, registers 0, both flags clear.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Register accessors
    // ---------------------------------------------------------------------

    /// Read register `index`. Caller must have validated `index < 4`.
    #[inline]
    pub fn reg(&self, index: u8) -> u8 {
        self.registers[index as usize]
    }

    /// Write register `index`. Caller must have validated `index < 4`.
    #[inline]
    pub fn set_reg(&mut self, index: u8, value: u8) {
        self.registers[index as usize] = value;
    }

    // ---------------------------------------------------------------------
    // Program counter helpers
    // ---------------------------------------------------------------------

    /// Advance the program counter by `delta` bytes.
    #[inline]
    pub fn advance_pc(&mut self, delta: u16) {
        self.pc += delta;
    }

    /// Overwrite the program counter (taken jump).
    #[inline]
    pub fn set_pc(&mut self, target: Address) {
        self.pc = target;
    }

    // ---------------------------------------------------------------------
    // Flag helpers
    // ---------------------------------------------------------------------

    #[inline]
    pub fn set_compare(&mut self, value: bool) {
        self.compare = value;
    }

    #[inline]
    pub fn set_error(&mut self, value: bool) {
        self.error = value;
    }

    /// Read-then-clear the Compare flag (conditional jump semantics).
    #[inline]
    pub fn take_compare(&mut self) -> bool {
        std::mem::take(&mut self.compare)
    }

    /// Read-then-clear the Error flag (conditional jump semantics).
    #[inline]
    pub fn take_error(&mut self) -> bool {
        std::mem::take(&mut self.error)
    }
}

/// One-line snapshot used by the trace output and the final dump:
/// `PC:00   X:00   Y:00   Z:00   W:00   C:f   E:f`
impl fmt::Display for CpuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PC:{:02x}", self.pc)?;
        for (name, value) in REGISTER_NAMES.iter().zip(self.registers) {
            write!(f, "   {name}:{value:02x}")?;
        }
        write!(
            f,
            "   C:{}   E:{}",
            if self.compare { 't' } else { 'f' },
            if self.error { 't' } else { 'f' },
        )
    }
}
