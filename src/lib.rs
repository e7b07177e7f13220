#![doc = r#"
bytecpu library crate.

An 8-bit virtual CPU: a fixed instruction set executed against a 256-byte
read-only program memory and a 256-byte read/write data memory, with four
byte-wide registers (X, Y, Z, W) and two status flags (Compare, Error).

Modules:
- cpu: the core (state, decoder, executors, cycle dispatch, trace, `Cpu` facade)
- memory: the two fixed 256-byte address spaces (`ReadOnly`, `ReadWrite`)
- loader: program-image loading and length validation
- error: `CpuError` / `LoaderError` kinds

In tests, shared program builders are available under `crate::test_utils`.
"#]

// Core emulator modules
pub mod cpu;
pub mod error;
pub mod loader;
pub mod memory;

// Re-export commonly used types at the crate root for convenience.
pub use cpu::{Cpu, CpuState, Step, TraceMode};
pub use error::{CpuError, LoaderError};
pub use memory::{Address, MEMORY_SIZE, ReadOnly, ReadWrite};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
