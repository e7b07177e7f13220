/*!
trace.rs - Cross-cutting execution tracing.

One wrapper at the dispatch site replaces a per-opcode duplicated "debug"
instruction set: when tracing applies to the fetched opcode, a single line
combining the full register/flag snapshot and the instruction's disassembly
is written to the diagnostic stream before the normal executor runs.

`SkipNop` exists so busy-wait loops built out of NOPs do not flood the trace:
it reverts the no-op opcode specifically back to untraced execution while
every other opcode keeps its trace line.
*/

use std::io::Write;

use crate::cpu::instruction::{Instruction, Opcode};
use crate::cpu::state::CpuState;

/// Boot-time trace selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceMode {
    /// No tracing (the plain instruction set).
    #[default]
    Off,
    /// Trace every instruction.
    All,
    /// Trace everything except NOP.
    SkipNop,
}

impl TraceMode {
    /// Whether a trace line should be emitted for `opcode`.
    #[inline]
    pub fn applies_to(self, opcode: Opcode) -> bool {
        match self {
            TraceMode::Off => false,
            TraceMode::All => true,
            TraceMode::SkipNop => opcode != Opcode::Nop,
        }
    }
}

/// Emit one trace line: snapshot, separator, disassembly. Best-effort; a
/// failed diagnostic write never fails the run.
pub(crate) fn trace_line(diag: &mut dyn Write, state: &CpuState, instruction: &Instruction) {
    let _ = writeln!(diag, "{state}   |   {instruction}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_selects_opcodes() {
        assert!(!TraceMode::Off.applies_to(Opcode::Add));
        assert!(TraceMode::All.applies_to(Opcode::Nop));
        assert!(TraceMode::All.applies_to(Opcode::Unknown(0x33)));
        assert!(!TraceMode::SkipNop.applies_to(Opcode::Nop));
        assert!(TraceMode::SkipNop.applies_to(Opcode::Halt));
    }

    #[test]
    fn line_combines_snapshot_and_disassembly() {
        let mut state = CpuState::new();
        state.set_reg(0, 0x05);
        let i = Instruction::decode(Opcode::Print, &[0]);
        let mut diag = Vec::new();
        trace_line(&mut diag, &state, &i);
        assert_eq!(
            String::from_utf8(diag).unwrap(),
            "PC:00   X:05   Y:00   Z:00   W:00   C:f   E:f   |   PRN X\n"
        );
    }
}
