pub mod error;
pub mod inst;
pub mod isa;
pub mod scope;
pub mod token;
pub mod word;

pub use error::Error;
pub use inst::{Instruction, Mode};
pub use isa::{InstructionSet, OpcodeTable};
pub use scope::{BracketKind, InstructionScope, Node, Scope, TokenScope};
pub use token::{Token, TokenKind, Value};
pub use word::Word;
