/*!
cpu::mod - Public facade for the virtual CPU core.

Module structure:

```text
state.rs        - Architectural state (program counter, registers, flags).
instruction.rs  - Opcode enumeration, operand shapes, decoder, disassembly.
execute.rs      - Per-opcode semantic helpers.
dispatch.rs     - One-cycle orchestration (fetch / decode / validate / execute).
trace.rs        - Trace-mode selection and trace-line formatting.
core.rs         - `Cpu` facade owning state and both memories; step / run / dump.
```

The public surface is the `Cpu` facade plus the types a caller or test needs
to inspect a run: `CpuState`, `Instruction`, `Opcode`, `Step`, `TraceMode`.
Internal module layout may evolve; downstream code should depend on the
re-exports here.
*/

pub mod core;
pub mod dispatch;
pub mod execute;
pub mod instruction;
pub mod state;
pub mod trace;

pub use crate::cpu::core::Cpu;
pub use crate::cpu::dispatch::Step;
pub use crate::cpu::instruction::{Instruction, Opcode, Shape};
pub use crate::cpu::state::{CpuState, REGISTER_COUNT, REGISTER_NAMES};
pub use crate::cpu::trace::TraceMode;
