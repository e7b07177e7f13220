/*!
instruction.rs - Opcode enumeration, operand shapes, and the decoder.

Overview
========
Every possible opcode byte (0-255) maps to an `Opcode` variant: one named
variant per real instruction (bytes 0x00-0x0F) and a single `Unknown(u8)`
catch-all for the 240 unassigned high values. Each opcode has a fixed operand
shape which determines how many parameter bytes follow it and how they are
decoded.

Decoding never fails: an unknown opcode decodes to an instruction carrying
only the opcode byte, with a declared parameter window of 0. Register-index
validity is not a decode concern; it is checked at execution, before any
state is mutated.

Encoding notes
==============
- In the immediate-plus-register shape the immediate byte precedes the
  register byte (`LDI imm reg`).
- Instruction size = 1 opcode byte + the shape's parameter window.
*/

use std::fmt;

use crate::cpu::state::REGISTER_NAMES;

/// Operand shape of an opcode: how many parameter bytes follow it and what
/// they mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// No operands (NOP, HLT, and every unknown opcode).
    Implied,
    /// One register index (PRN).
    Reg,
    /// Two register indices (LDM, STR, SWP, EQL, NEQ).
    RegReg,
    /// Three register indices (ADD, SUB, MUL, DIV).
    RegRegReg,
    /// One immediate byte followed by one register index (LDI).
    ImmReg,
    /// One immediate byte (JMP, JMC, JME).
    Imm,
}

impl Shape {
    /// Number of parameter bytes following the opcode byte.
    #[inline]
    pub fn param_len(self) -> usize {
        match self {
            Shape::Implied => 0,
            Shape::Reg | Shape::Imm => 1,
            Shape::RegReg | Shape::ImmReg => 2,
            Shape::RegRegReg => 3,
        }
    }
}

/// One named variant per real instruction plus a catch-all for the
/// unassigned opcode bytes 0x10-0xFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Nop,
    Add,
    Sub,
    Mul,
    Div,
    LoadMem,
    LoadImm,
    Store,
    Swap,
    CompareEq,
    CompareNe,
    Jump,
    JumpIfCompare,
    JumpIfError,
    Print,
    Halt,
    Unknown(u8),
}

impl Opcode {
    /// Total mapping from every opcode byte to a variant.
    #[inline]
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => Opcode::Nop,
            0x01 => Opcode::Add,
            0x02 => Opcode::Sub,
            0x03 => Opcode::Mul,
            0x04 => Opcode::Div,
            0x05 => Opcode::LoadMem,
            0x06 => Opcode::LoadImm,
            0x07 => Opcode::Store,
            0x08 => Opcode::Swap,
            0x09 => Opcode::CompareEq,
            0x0A => Opcode::CompareNe,
            0x0B => Opcode::Jump,
            0x0C => Opcode::JumpIfCompare,
            0x0D => Opcode::JumpIfError,
            0x0E => Opcode::Print,
            0x0F => Opcode::Halt,
            other => Opcode::Unknown(other),
        }
    }

    /// Operand shape. Unknown opcodes carry no operands.
    #[inline]
    pub fn shape(self) -> Shape {
        match self {
            Opcode::Nop | Opcode::Halt | Opcode::Unknown(_) => Shape::Implied,
            Opcode::Print => Shape::Reg,
            Opcode::LoadMem
            | Opcode::Store
            | Opcode::Swap
            | Opcode::CompareEq
            | Opcode::CompareNe => Shape::RegReg,
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div => Shape::RegRegReg,
            Opcode::LoadImm => Shape::ImmReg,
            Opcode::Jump | Opcode::JumpIfCompare | Opcode::JumpIfError => Shape::Imm,
        }
    }

    /// Fixed parameter-window length in bytes (0-3).
    #[inline]
    pub fn param_len(self) -> usize {
        self.shape().param_len()
    }

    /// Disassembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "NOP",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::LoadMem => "LDM",
            Opcode::LoadImm => "LDI",
            Opcode::Store => "STR",
            Opcode::Swap => "SWP",
            Opcode::CompareEq => "EQL",
            Opcode::CompareNe => "NEQ",
            Opcode::Jump => "JMP",
            Opcode::JumpIfCompare => "JMC",
            Opcode::JumpIfError => "JME",
            Opcode::Print => "PRN",
            Opcode::Halt => "HLT",
            Opcode::Unknown(_) => "???",
        }
    }
}

/// A decoded instruction: the opcode plus, depending on its shape, up to
/// three register indices and/or one immediate byte. Transient; one is built
/// per cycle and dropped after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub r1: u8,
    pub r2: u8,
    pub r3: u8,
    pub imm: u8,
}

impl Instruction {
    /// Decode `opcode` with its parameter window.
    ///
    /// `params` must be exactly `opcode.param_len()` bytes; the fetch stage
    /// guarantees this. Decoding itself is total and never fails.
    pub fn decode(opcode: Opcode, params: &[u8]) -> Self {
        debug_assert_eq!(params.len(), opcode.param_len());
        let mut i = Instruction {
            opcode,
            r1: 0,
            r2: 0,
            r3: 0,
            imm: 0,
        };
        match opcode.shape() {
            Shape::Implied => {}
            Shape::Reg => i.r1 = params[0],
            Shape::RegReg => {
                i.r1 = params[0];
                i.r2 = params[1];
            }
            Shape::RegRegReg => {
                i.r1 = params[0];
                i.r2 = params[1];
                i.r3 = params[2];
            }
            // Immediate byte first, then the register byte.
            Shape::ImmReg => {
                i.imm = params[0];
                i.r1 = params[1];
            }
            Shape::Imm => i.imm = params[0],
        }
        i
    }

    /// Total encoded size: opcode byte + parameter window.
    #[inline]
    pub fn size(&self) -> u16 {
        1 + self.opcode.param_len() as u16
    }

    /// The register indices this instruction references, for pre-execution
    /// validation.
    pub fn register_refs(&self) -> impl Iterator<Item = u8> {
        let count = match self.opcode.shape() {
            Shape::Implied | Shape::Imm => 0,
            Shape::Reg | Shape::ImmReg => 1,
            Shape::RegReg => 2,
            Shape::RegRegReg => 3,
        };
        [self.r1, self.r2, self.r3].into_iter().take(count)
    }
}

/// Disassembly: `"<mnemonic> <operands>"`, registers as X/Y/Z/W (raw index
/// for an out-of-range byte), immediates as two-digit hex.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = |index: u8| -> String {
            match REGISTER_NAMES.get(index as usize) {
                Some(name) => name.to_string(),
                None => format!("r{index}"),
            }
        };
        match self.opcode.shape() {
            Shape::Implied => match self.opcode {
                Opcode::Unknown(byte) => write!(f, "??? {byte:02x}"),
                _ => write!(f, "{}", self.opcode.mnemonic()),
            },
            Shape::Reg => write!(f, "{} {}", self.opcode.mnemonic(), reg(self.r1)),
            Shape::RegReg => write!(
                f,
                "{} {} {}",
                self.opcode.mnemonic(),
                reg(self.r1),
                reg(self.r2)
            ),
            Shape::RegRegReg => write!(
                f,
                "{} {} {} {}",
                self.opcode.mnemonic(),
                reg(self.r1),
                reg(self.r2),
                reg(self.r3)
            ),
            Shape::ImmReg => write!(
                f,
                "{} {:02x} {}",
                self.opcode.mnemonic(),
                self.imm,
                reg(self.r1)
            ),
            Shape::Imm => write!(f, "{} {:02x}", self.opcode.mnemonic(), self.imm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_byte_maps_to_a_variant() {
        for byte in 0u8..=255 {
            let op = Opcode::from_byte(byte);
            if byte >= 0x10 {
                assert_eq!(op, Opcode::Unknown(byte));
                assert_eq!(op.param_len(), 0);
            } else {
                assert_ne!(op, Opcode::Unknown(byte));
            }
        }
    }

    #[test]
    fn parameter_window_lengths() {
        assert_eq!(Opcode::Nop.param_len(), 0);
        assert_eq!(Opcode::Halt.param_len(), 0);
        assert_eq!(Opcode::Print.param_len(), 1);
        assert_eq!(Opcode::Jump.param_len(), 1);
        assert_eq!(Opcode::LoadMem.param_len(), 2);
        assert_eq!(Opcode::LoadImm.param_len(), 2);
        assert_eq!(Opcode::Add.param_len(), 3);
        assert_eq!(Opcode::Unknown(0xAB).param_len(), 0);
    }

    #[test]
    fn decode_three_register_shape() {
        let i = Instruction::decode(Opcode::Add, &[0, 1, 2]);
        assert_eq!((i.r1, i.r2, i.r3), (0, 1, 2));
        assert_eq!(i.size(), 4);
    }

    #[test]
    fn decode_immediate_precedes_register() {
        let i = Instruction::decode(Opcode::LoadImm, &[0x2A, 3]);
        assert_eq!(i.imm, 0x2A);
        assert_eq!(i.r1, 3);
        assert_eq!(i.size(), 3);
    }

    #[test]
    fn decode_unknown_carries_only_the_opcode() {
        let i = Instruction::decode(Opcode::Unknown(0x80), &[]);
        assert_eq!(i.opcode, Opcode::Unknown(0x80));
        assert_eq!(i.size(), 1);
        assert_eq!(i.register_refs().count(), 0);
    }

    #[test]
    fn disassembly_strings() {
        assert_eq!(Instruction::decode(Opcode::Nop, &[]).to_string(), "NOP");
        assert_eq!(
            Instruction::decode(Opcode::Add, &[0, 1, 2]).to_string(),
            "ADD X Y Z"
        );
        assert_eq!(
            Instruction::decode(Opcode::LoadImm, &[0x05, 0]).to_string(),
            "LDI 05 X"
        );
        assert_eq!(
            Instruction::decode(Opcode::Jump, &[0x10]).to_string(),
            "JMP 10"
        );
        assert_eq!(Instruction::decode(Opcode::Print, &[3]).to_string(), "PRN W");
        assert_eq!(
            Instruction::decode(Opcode::Unknown(0xCC), &[]).to_string(),
            "??? cc"
        );
        // Out-of-range register bytes still disassemble (validity is an
        // execution concern).
        assert_eq!(Instruction::decode(Opcode::Print, &[9]).to_string(), "PRN r9");
    }
}
