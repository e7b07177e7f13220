//! Shared test utilities for booting CPUs over small program images.
//!
//! Intentionally supports just what the test suite needs.

use crate::cpu::{Cpu, TraceMode};
use crate::memory::ReadOnly;

/// Boot a CPU over `image` with tracing off.
pub fn boot(image: &[u8]) -> Cpu {
    Cpu::new(ReadOnly::from_image(image), TraceMode::Off)
}
