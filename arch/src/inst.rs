use std::fmt;

use color_print::cformat;
use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::Error;
use crate::isa::OpcodeTable;
use crate::word::Word;

/// Addressing mode of the operand, stored as bit 15 of the instruction word.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Default,
    FromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    #[default]
    Immediate = 0,
    Pointer = 1,
}

impl Mode {
    pub fn is_pointer(self) -> bool {
        self == Mode::Pointer
    }
}

impl From<bool> for Mode {
    fn from(memory_flag: bool) -> Self {
        if memory_flag {
            Mode::Pointer
        } else {
            Mode::Immediate
        }
    }
}

// ----------------------------------------------------------------------------
// Instruction

/// A resolved instruction, ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(rename = "op")]
    pub opcode: String,
    #[serde(default)]
    pub value: u16,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub line: usize,
}

impl Instruction {
    pub fn new(opcode: impl Into<String>, value: u16, mode: Mode, line: usize) -> Self {
        Instruction {
            opcode: opcode.into(),
            value,
            mode,
            line,
        }
    }

    /// Instruction without an operand.
    pub fn bare(opcode: impl Into<String>, line: usize) -> Self {
        Instruction::new(opcode, 0, Mode::Immediate, line)
    }

    pub fn immediate(opcode: impl Into<String>, value: u16, line: usize) -> Self {
        Instruction::new(opcode, value, Mode::Immediate, line)
    }

    pub fn pointer(opcode: impl Into<String>, value: u16, line: usize) -> Self {
        Instruction::new(opcode, value, Mode::Pointer, line)
    }

    /// Looks up the opcode number and packs the instruction word.
    pub fn to_word<T: OpcodeTable + ?Sized>(&self, table: &T) -> Result<Word, Error> {
        let opcode = table
            .opcode(&self.opcode)
            .ok_or_else(|| Error::UnknownOpcode {
                mnemonic: self.opcode.clone(),
                line: self.line,
            })?;
        Word::pack(self.mode, self.value, &self.opcode, opcode, self.line)
    }

    /// Rebuilds an instruction from a word, if the table knows its opcode.
    pub fn from_word<T: OpcodeTable + ?Sized>(word: Word, table: &T) -> Option<Self> {
        let mnemonic = table.mnemonic(word.opcode())?;
        Some(Instruction::new(mnemonic, word.operand(), word.mode(), 0))
    }

    pub fn cformat(&self) -> String {
        match self.mode {
            Mode::Pointer => cformat!("<r>{:<6}</><c>${}</>", self.opcode, self.value),
            Mode::Immediate => cformat!("<r>{:<6}</><y>{}</>", self.opcode, self.value),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Mode::Pointer => write!(f, "{} ${}", self.opcode, self.value),
            Mode::Immediate => write!(f, "{} {}", self.opcode, self.value),
        }
    }
}
