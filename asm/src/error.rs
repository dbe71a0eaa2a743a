use thiserror::Error;

use crate::msg::{Loc, Msg};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Arch(#[from] mqarch::Error),

    #[error("Include `{0}` is not a single line of ASCII text")]
    NonAsciiInclude(String),

    #[error("{section} section is {size} bytes, exceeding its size field")]
    SectionOverflow { section: &'static str, size: usize },

    #[error("Executable truncated: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("Executable has {0} trailing bytes after the assembly section")]
    TrailingBytes(usize),

    #[error("Unsupported executable version: {0:?}")]
    UnsupportedVersion(String),

    #[error("Assembly section size {0} is not a multiple of 2")]
    MisalignedAssembly(u32),

    #[error("Include section is malformed")]
    MalformedIncludes,

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Failed to parse {0}: {1}")]
    Yaml(String, #[source] serde_yaml::Error),
}

impl Error {
    /// Source line (1-based) the error points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Arch(err) => err.line(),
            _ => None,
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, source: Option<(&str, &[String])>) {
        let msg = Msg::error(self.to_string());
        match (source, self.line()) {
            (Some((file, lines)), Some(line)) => {
                let raw = lines.get(line - 1).map(|s| s.as_str()).unwrap_or("");
                msg.at(Loc { file, line, raw }).print()
            }
            _ => msg.print(),
        }
    }
}
