/*!
execute.rs - Per-opcode semantic helpers.

Centralizes the side-effect logic for every instruction so the dispatcher
stays a thin orchestration layer. Each helper mutates the processor state
(and, for load/store, data memory) and returns a `Control`:

  - `Control::Continue(advance)` - ordinary continuation; the driver advances
    the program counter by `advance` bytes. Taken jumps assign the program
    counter directly and return an advance of 0.
  - `Control::Halt` - the halt instruction executed; the run terminates
    successfully. Deliberately a distinct outcome variant, not an error.

Failures surface as `Err(CpuError)` and are never mixed with the halt signal.
Register indices are validated by the dispatcher before any helper runs, so
helpers index the register file directly. The one exception to pure
all-or-nothing success is divide-by-zero, which fails *before* writing the
destination register; the driver treats it as the sole continuable error.

All arithmetic is 8-bit wraparound.
*/

use std::io::Write;

use crate::cpu::instruction::Instruction;
use crate::cpu::state::CpuState;
use crate::error::CpuError;
use crate::memory::{Address, ReadWrite};

/// Outcome of one executed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Control {
    /// Continue at program counter + `advance`.
    Continue(u16),
    /// Halt instruction executed; terminate the run successfully.
    Halt,
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// ADD / SUB / MUL: `r3 := r1 <op> r2`, wrapping at 8 bits.
#[inline]
pub(crate) fn arithmetic(
    state: &mut CpuState,
    i: &Instruction,
    op: fn(u8, u8) -> u8,
) -> Result<Control, CpuError> {
    let result = op(state.reg(i.r1), state.reg(i.r2));
    state.set_reg(i.r3, result);
    Ok(Control::Continue(i.size()))
}

/// DIV: as `arithmetic`, except a zero divisor fails with `DivideByZero`
/// before the destination register is written.
#[inline]
pub(crate) fn divide(state: &mut CpuState, i: &Instruction) -> Result<Control, CpuError> {
    let divisor = state.reg(i.r2);
    if divisor == 0 {
        return Err(CpuError::DivideByZero);
    }
    let result = state.reg(i.r1) / divisor;
    state.set_reg(i.r3, result);
    Ok(Control::Continue(i.size()))
}

// ---------------------------------------------------------------------------
// Loads / stores / register moves
// ---------------------------------------------------------------------------

/// LDM: `r2 := data[registers[r1]]`.
#[inline]
pub(crate) fn load_mem(
    state: &mut CpuState,
    data: &ReadWrite,
    i: &Instruction,
) -> Result<Control, CpuError> {
    let addr = state.reg(i.r1) as Address;
    let byte = data.read(addr, 1)?[0];
    state.set_reg(i.r2, byte);
    Ok(Control::Continue(i.size()))
}

/// LDI: `r1 := imm`.
#[inline]
pub(crate) fn load_imm(state: &mut CpuState, i: &Instruction) -> Result<Control, CpuError> {
    state.set_reg(i.r1, i.imm);
    Ok(Control::Continue(i.size()))
}

/// STR: `data[registers[r2]] := registers[r1]`.
#[inline]
pub(crate) fn store(
    state: &mut CpuState,
    data: &mut ReadWrite,
    i: &Instruction,
) -> Result<Control, CpuError> {
    let addr = state.reg(i.r2) as Address;
    data.write(addr, &[state.reg(i.r1)])?;
    Ok(Control::Continue(i.size()))
}

/// SWP: exchange `r1` and `r2`.
#[inline]
pub(crate) fn swap(state: &mut CpuState, i: &Instruction) -> Result<Control, CpuError> {
    state.registers.swap(i.r1 as usize, i.r2 as usize);
    Ok(Control::Continue(i.size()))
}

// ---------------------------------------------------------------------------
// Comparisons
// ---------------------------------------------------------------------------

/// EQL / NEQ: set the Compare flag from `r1 <cmp> r2`.
#[inline]
pub(crate) fn compare(
    state: &mut CpuState,
    i: &Instruction,
    cmp: fn(u8, u8) -> bool,
) -> Result<Control, CpuError> {
    let value = cmp(state.reg(i.r1), state.reg(i.r2));
    state.set_compare(value);
    Ok(Control::Continue(i.size()))
}

// ---------------------------------------------------------------------------
// Control flow
// ---------------------------------------------------------------------------

/// JMP: unconditional; assigns the program counter directly.
#[inline]
pub(crate) fn jump(state: &mut CpuState, i: &Instruction) -> Result<Control, CpuError> {
    state.set_pc(i.imm as Address);
    Ok(Control::Continue(0))
}

/// JMC / JME: jump when the tested flag is set, clearing it; otherwise fall
/// through (flag untouched, which for a clear flag means it stays clear).
#[inline]
pub(crate) fn jump_if(
    state: &mut CpuState,
    i: &Instruction,
    take_flag: fn(&mut CpuState) -> bool,
) -> Result<Control, CpuError> {
    if take_flag(state) {
        state.set_pc(i.imm as Address);
        Ok(Control::Continue(0))
    } else {
        Ok(Control::Continue(i.size()))
    }
}

// ---------------------------------------------------------------------------
// I/O and termination
// ---------------------------------------------------------------------------

/// PRN: emit `r1` as one character on the primary output stream.
///
/// Output is best-effort; a failed write never fails the run.
#[inline]
pub(crate) fn print(
    state: &mut CpuState,
    i: &Instruction,
    out: &mut dyn Write,
) -> Result<Control, CpuError> {
    let _ = write!(out, "{}", state.reg(i.r1) as char);
    Ok(Control::Continue(i.size()))
}

/// NOP.
#[inline]
pub(crate) fn nop(i: &Instruction) -> Result<Control, CpuError> {
    Ok(Control::Continue(i.size()))
}

/// HLT: signal successful termination.
#[inline]
pub(crate) fn halt() -> Result<Control, CpuError> {
    Ok(Control::Halt)
}
