/*!
core.rs - The `Cpu` facade.

Owns everything one run needs: the architectural state, the read-only program
memory, the read/write data memory, and the boot-time trace selection.
Exactly one `Cpu` exists per run; it is built from a loaded program image,
stepped to termination, dumped, and dropped.

The core provides no step budget of its own: an unbounded jump-only program
loops forever in `run`. Callers that need a cap drive `step` directly (the
CLI's `--max-steps` does this).
*/

use std::fmt;
use std::io::Write;

use log::info;

use crate::cpu::dispatch::{self, Step};
use crate::cpu::state::CpuState;
use crate::cpu::trace::TraceMode;
use crate::error::CpuError;
use crate::memory::{ReadOnly, ReadWrite};

/// The virtual CPU: state, both address spaces, and the active trace mode.
#[derive(Debug)]
pub struct Cpu {
    state: CpuState,
    program: ReadOnly,
    data: ReadWrite,
    trace: TraceMode,
}

impl Cpu {
    /// Boot a CPU over a loaded program image. Data memory starts
    /// zero-filled; callers never pre-seed it.
    pub fn new(program: ReadOnly, trace: TraceMode) -> Self {
        Self {
            state: CpuState::new(),
            program,
            data: ReadWrite::new(),
            trace,
        }
    }

    /// Architectural state, for inspection and tests.
    #[inline]
    pub fn state(&self) -> &CpuState {
        &self.state
    }

    /// Data memory contents, for inspection and tests.
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Execute one fetch-decode-execute cycle.
    ///
    /// `out` receives the print opcode's characters; `diag` receives trace
    /// lines when tracing is on. The two may interleave from the caller's
    /// point of view. On `Err` the Error flag is already set and the run
    /// must not be stepped further.
    pub fn step(&mut self, out: &mut dyn Write, diag: &mut dyn Write) -> Result<Step, CpuError> {
        dispatch::step(
            &mut self.state,
            &self.program,
            &mut self.data,
            self.trace,
            out,
            diag,
        )
    }

    /// Step to termination. `Ok(())` is a clean halt; `Err` carries the
    /// fatal kind (the Error flag is set either way an error occurred).
    pub fn run(&mut self, out: &mut dyn Write, diag: &mut dyn Write) -> Result<(), CpuError> {
        loop {
            match self.step(out, diag)? {
                Step::Continued => {}
                Step::Halted => {
                    info!("run halted cleanly at pc {:#04x}", self.state.pc);
                    return Ok(());
                }
            }
        }
    }
}

/// The final state dump: register/flag snapshot, then the full program
/// memory, then the full data memory, hex-formatted 16 bytes per row.
impl fmt::Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Registers and flags:")?;
        writeln!(f, "{}", self.state)?;
        writeln!(f)?;
        writeln!(f, "Program memory:")?;
        hex_rows(f, self.program.as_slice())?;
        writeln!(f)?;
        writeln!(f, "Data memory:")?;
        hex_rows(f, self.data.as_slice())
    }
}

fn hex_rows(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for row in bytes.chunks(16) {
        for (i, byte) in row.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{byte:02x}")?;
        }
        writeln!(f)?;
    }
    Ok(())
}
