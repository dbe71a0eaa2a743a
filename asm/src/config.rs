use std::fs::File;
use std::io::BufReader;

use mqarch::{Instruction, InstructionScope, InstructionSet};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Resolved program handed over by the resolver.
///
/// ```yaml
/// source: main.mq
/// include: [math, io]
/// code:
///   - { op: lra, value: 2, mode: pointer, line: 3 }
///   - { op: nop, line: 4 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Program {
    /// Source file the `line` fields refer to.
    pub source: Option<String>,
    pub include: Vec<String>,
    pub code: Vec<Instruction>,
}

impl Program {
    pub fn load(path: &str) -> Result<Program, Error> {
        let file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| Error::Yaml(path.to_string(), e))
    }

    pub fn parse(path: &str, text: &str) -> Result<Program, Error> {
        serde_yaml::from_str(text).map_err(|e| Error::Yaml(path.to_string(), e))
    }

    pub fn instructions(&self) -> InstructionScope {
        self.code.iter().cloned().collect()
    }

    /// Lines of the source file, if it can be read.
    pub fn source_lines(&self) -> Option<(&str, Vec<String>)> {
        let path = self.source.as_deref()?;
        let text = std::fs::read_to_string(path).ok()?;
        Some((path, text.lines().map(str::to_string).collect()))
    }
}

/// `main.mql.yaml` -> `main.mqa`, anything else gets its extension replaced.
pub fn output_path(input: &str) -> String {
    match input.strip_suffix(".mql.yaml") {
        Some(stem) => format!("{}.mqa", stem),
        None => std::path::Path::new(input)
            .with_extension("mqa")
            .to_string_lossy()
            .into_owned(),
    }
}

/// Loads a mnemonic to opcode table.
///
/// ```yaml
/// nop: 0
/// lra: 3
/// ```
pub fn load_isa(path: &str) -> Result<InstructionSet, Error> {
    let file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
    serde_yaml::from_reader(BufReader::new(file)).map_err(|e| Error::Yaml(path.to_string(), e))
}
