//! Error kinds for the emulator core and the program loader.

use thiserror::Error;

/// Errors raised while executing instructions.
///
/// Every variant originates in the execution cycle and surfaces directly to
/// the driver without retry. All kinds are fatal except [`CpuError::DivideByZero`],
/// which sets the Error flag and lets execution continue at the next
/// instruction.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    #[error("illegal memory access: {len} byte(s) at {addr:#04x}")]
    IllegalMemoryAccess { addr: u16, len: usize },

    #[error("unknown register index {index}")]
    RegisterError { index: u8 },

    #[error("unknown opcode {opcode:#04x}")]
    UnknownOpcode { opcode: u8 },

    #[error("divide by zero")]
    DivideByZero,
}

impl CpuError {
    /// True for every kind that must terminate the run.
    ///
    /// Divide-by-zero is the sole non-fatal kind: it sets the Error flag,
    /// skips the destination write, and execution continues.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CpuError::DivideByZero)
    }
}

/// Errors raised by the program loader, before the core is constructed.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The image is empty or larger than program memory. The core itself
    /// never raises this; the loader rejects such images up front.
    #[error("invalid program length: must be 1-256 bytes, is {len}")]
    InvalidProgramLength { len: usize },

    #[error("failed to read program image: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_divide_by_zero_is_continuable() {
        assert!(CpuError::IllegalMemoryAccess { addr: 0x100, len: 1 }.is_fatal());
        assert!(CpuError::RegisterError { index: 4 }.is_fatal());
        assert!(CpuError::UnknownOpcode { opcode: 0x10 }.is_fatal());
        assert!(!CpuError::DivideByZero.is_fatal());
    }

    #[test]
    fn display_carries_context() {
        let e = CpuError::IllegalMemoryAccess { addr: 0xFF, len: 3 };
        assert_eq!(e.to_string(), "illegal memory access: 3 byte(s) at 0xff");
        let e = LoaderError::InvalidProgramLength { len: 0 };
        assert!(e.to_string().contains("1-256"));
    }
}
