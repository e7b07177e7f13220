/*!
dispatch.rs - Orchestrator for a single fetch-decode-execute cycle.

Overview
========
Coordinates one instruction step:
1. Fetch the opcode byte at the program counter; a bounds failure here is
   fatal (the counter ran past the end of program memory).
2. Read the opcode's fixed parameter window (0-3 bytes) at pc + 1; a bounds
   failure here is equally fatal.
3. Decode into an `Instruction`.
4. Emit the trace line when the active `TraceMode` covers this opcode.
5. Validate every referenced register index before any state mutates;
   an invalid index is a `RegisterError` with zero side effects.
6. Dispatch on the opcode enum to the semantic helper in `execute`.

Outcome discipline
==================
Any error sets the Error flag before anything else is decided. Divide-by-zero
alone is continuable: the program counter still advances by the instruction's
full size and `Step::Continued` is returned. Every other error terminates the
step with `Err`; the halt instruction terminates with `Step::Halted`. The
halt signal and the error channel never share a variant.
*/

use std::io::Write;

use log::debug;

use crate::cpu::execute::{self, Control};
use crate::cpu::instruction::{Instruction, Opcode};
use crate::cpu::state::{CpuState, invalid_register};
use crate::cpu::trace::{TraceMode, trace_line};
use crate::error::CpuError;
use crate::memory::{ReadOnly, ReadWrite};

/// Result of one successful cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An instruction executed and the program counter moved on.
    Continued,
    /// The halt instruction executed; the run is over, successfully.
    Halted,
}

/// Execute one cycle. On a fatal error the Error flag is already set when
/// `Err` is returned; on divide-by-zero the flag is set and the cycle still
/// counts as `Continued`.
pub(crate) fn step(
    state: &mut CpuState,
    program: &ReadOnly,
    data: &mut ReadWrite,
    trace: TraceMode,
    out: &mut dyn Write,
    diag: &mut dyn Write,
) -> Result<Step, CpuError> {
    let instruction = match fetch_decode(state, program) {
        Ok(i) => i,
        Err(e) => {
            state.set_error(true);
            return Err(e);
        }
    };

    if trace.applies_to(instruction.opcode) {
        trace_line(diag, state, &instruction);
    }

    match execute_checked(state, data, &instruction, out) {
        Ok(Control::Continue(advance)) => {
            state.advance_pc(advance);
            Ok(Step::Continued)
        }
        Ok(Control::Halt) => {
            debug!("halt at pc {:#04x}", state.pc);
            Ok(Step::Halted)
        }
        Err(e) => {
            state.set_error(true);
            if e.is_fatal() {
                debug!("fatal at pc {:#04x}: {e}", state.pc);
                return Err(e);
            }
            // Divide-by-zero: flag set, destination untouched, execution
            // continues at the next instruction.
            state.advance_pc(instruction.size());
            Ok(Step::Continued)
        }
    }
}

/// Fetch the opcode and its parameter window, then decode.
fn fetch_decode(state: &CpuState, program: &ReadOnly) -> Result<Instruction, CpuError> {
    let opcode = Opcode::from_byte(program.read(state.pc, 1)?[0]);
    let params = program.read(state.pc + 1, opcode.param_len())?;
    Ok(Instruction::decode(opcode, params))
}

/// Validate register references, then dispatch to the semantic helper.
fn execute_checked(
    state: &mut CpuState,
    data: &mut ReadWrite,
    i: &Instruction,
    out: &mut dyn Write,
) -> Result<Control, CpuError> {
    if let Some(index) = i.register_refs().find(|&r| invalid_register(r)) {
        return Err(CpuError::RegisterError { index });
    }

    match i.opcode {
        Opcode::Nop => execute::nop(i),
        Opcode::Add => execute::arithmetic(state, i, u8::wrapping_add),
        Opcode::Sub => execute::arithmetic(state, i, u8::wrapping_sub),
        Opcode::Mul => execute::arithmetic(state, i, u8::wrapping_mul),
        Opcode::Div => execute::divide(state, i),
        Opcode::LoadMem => execute::load_mem(state, data, i),
        Opcode::LoadImm => execute::load_imm(state, i),
        Opcode::Store => execute::store(state, data, i),
        Opcode::Swap => execute::swap(state, i),
        Opcode::CompareEq => execute::compare(state, i, |a, b| a == b),
        Opcode::CompareNe => execute::compare(state, i, |a, b| a != b),
        Opcode::Jump => execute::jump(state, i),
        Opcode::JumpIfCompare => execute::jump_if(state, i, CpuState::take_compare),
        Opcode::JumpIfError => execute::jump_if(state, i, CpuState::take_error),
        Opcode::Print => execute::print(state, i, out),
        Opcode::Halt => execute::halt(),
        Opcode::Unknown(opcode) => Err(CpuError::UnknownOpcode { opcode }),
    }
}
