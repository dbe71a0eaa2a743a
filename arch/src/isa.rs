use std::collections::HashMap;

use bimap::BiMap;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::Error;
use crate::word::OPCODE_MAX;

/// Mnemonic to opcode number lookup consumed by the binary constructor.
pub trait OpcodeTable {
    fn opcode(&self, mnemonic: &str) -> Option<u8>;

    /// Reverse lookup, used for listings only.
    fn mnemonic(&self, _opcode: u8) -> Option<&str> {
        None
    }
}

impl OpcodeTable for HashMap<String, u8> {
    fn opcode(&self, mnemonic: &str) -> Option<u8> {
        self.get(mnemonic).copied()
    }
}

impl OpcodeTable for IndexMap<String, u8> {
    fn opcode(&self, mnemonic: &str) -> Option<u8> {
        self.get(mnemonic).copied()
    }

    fn mnemonic(&self, opcode: u8) -> Option<&str> {
        self.iter()
            .find(|(_, num)| **num == opcode)
            .map(|(name, _)| name.as_str())
    }
}

// ----------------------------------------------------------------------------
// Instruction set

/// Case-insensitive, bidirectional opcode table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IndexMap<String, u16>")]
pub struct InstructionSet(BiMap<String, u8>);

impl InstructionSet {
    pub fn new() -> Self {
        InstructionSet(BiMap::new())
    }

    pub fn from_pairs<S, I>(pairs: I) -> Result<Self, Error>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, u16)>,
    {
        let mut set = InstructionSet::new();
        for (mnemonic, number) in pairs {
            set.insert(mnemonic.as_ref(), number)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, mnemonic: &str, number: u16) -> Result<(), Error> {
        let mnemonic = mnemonic.to_lowercase();
        let opcode = match u8::try_from(number) {
            Ok(op) if op <= OPCODE_MAX => op,
            _ => return Err(Error::OpcodeOverflow { mnemonic, number }),
        };
        if self.0.contains_left(&mnemonic) || self.0.contains_right(&opcode) {
            return Err(Error::DuplicateOpcode {
                mnemonic,
                number: opcode,
            });
        }
        self.0.insert(mnemonic, opcode);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<IndexMap<String, u16>> for InstructionSet {
    type Error = Error;

    fn try_from(map: IndexMap<String, u16>) -> Result<Self, Self::Error> {
        InstructionSet::from_pairs(map)
    }
}

impl OpcodeTable for InstructionSet {
    fn opcode(&self, mnemonic: &str) -> Option<u8> {
        self.0.get_by_left(&mnemonic.to_lowercase()).copied()
    }

    fn mnemonic(&self, opcode: u8) -> Option<&str> {
        self.0.get_by_right(&opcode).map(|s| s.as_str())
    }
}
