use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Index {index} out of range for scope of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown operation: `{mnemonic}`")]
    UnknownOpcode { mnemonic: String, line: usize },

    #[error("Operand {value} does not fit in 8 bits (max 255)")]
    OperandOverflow { value: u16, line: usize },

    #[error("Opcode number {number} of `{mnemonic}` does not fit in 7 bits (max 127)")]
    OpcodeOverflow { mnemonic: String, number: u16 },

    #[error("Re-defined operation: `{mnemonic}` = {number}")]
    DuplicateOpcode { mnemonic: String, number: u8 },
}

impl Error {
    /// Source line (1-based) of the instruction that caused the error.
    /// Line 0 means the origin is unknown.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnknownOpcode { line, .. } | Error::OperandOverflow { line, .. } => {
                Some(*line).filter(|&l| l > 0)
            }
            _ => None,
        }
    }
}
