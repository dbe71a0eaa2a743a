use std::fmt;

use crate::error::Error;
use crate::inst::Mode;

// ----------------------------------------------------------------------------
// Field layout
//
//  15 | 14 ........ 7 | 6 ...... 0
// mode|    operand    |   opcode

pub const FLAG_SHIFT: u16 = 15;
pub const OPERAND_SHIFT: u16 = 7;
pub const OPERAND_MAX: u16 = 0xFF;
pub const OPCODE_MAX: u8 = 0x7F;

fn enc_format(mode: u8, operand: u16, opcode: u8) -> u16 {
    ((mode as u16) << FLAG_SHIFT) | (operand << OPERAND_SHIFT) | (opcode as u16)
}

fn dec_format(bin: u16) -> (u8, u16, u8) {
    let mode = ((bin >> FLAG_SHIFT) & 0x1) as u8;
    let operand = (bin >> OPERAND_SHIFT) & OPERAND_MAX;
    let opcode = (bin & OPCODE_MAX as u16) as u8;
    (mode, operand, opcode)
}

// ----------------------------------------------------------------------------
// Word

/// One encoded 16-bit instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word(pub u16);

impl Word {
    /// Packs the fields, rejecting values wider than their field.
    /// `line` is only used to annotate the error.
    pub fn pack(
        mode: Mode,
        operand: u16,
        mnemonic: &str,
        opcode: u8,
        line: usize,
    ) -> Result<Word, Error> {
        if operand > OPERAND_MAX {
            return Err(Error::OperandOverflow {
                value: operand,
                line,
            });
        }
        if opcode > OPCODE_MAX {
            return Err(Error::OpcodeOverflow {
                mnemonic: mnemonic.to_string(),
                number: opcode as u16,
            });
        }
        Ok(Word(enc_format(mode.into(), operand, opcode)))
    }

    pub fn mode(self) -> Mode {
        Mode::from(dec_format(self.0).0)
    }

    pub fn operand(self) -> u16 {
        dec_format(self.0).1
    }

    pub fn opcode(self) -> u8 {
        dec_format(self.0).2
    }

    pub fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    pub fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Word(u16::from_le_bytes(bytes))
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}
