use mqarch::{Instruction, OpcodeTable};

use crate::error::Error;
use crate::image::{Header, ASSEMBLY_SIZE_FIELD, HEADER_SIZE, INCLUDE_SIZE_FIELD, VERSION};

/// Generates the executable .mqa image.
///
/// Both section sizes are reserved up front and backpatched once the section
/// has been written. Nothing is returned unless every include and every
/// instruction encodes cleanly.
pub fn generate_bytes<'a, S, I, T>(
    includes: &[S],
    instructions: I,
    table: &T,
    verbose: bool,
) -> Result<Vec<u8>, Error>
where
    S: AsRef<str>,
    I: IntoIterator<Item = &'a Instruction>,
    T: OpcodeTable + ?Sized,
{
    let mut data: Vec<u8> = Vec::with_capacity(HEADER_SIZE);

    // cpuVersion
    data.extend_from_slice(VERSION);
    // includeSectionSize
    data.extend_from_slice(&[0; 2]);
    // assemblySectionSize
    data.extend_from_slice(&[0; 4]);

    // includeSectionData
    let section_start = data.len();
    for include in includes {
        let include = include.as_ref();
        if !include.is_ascii() || include.contains('\n') {
            return Err(Error::NonAsciiInclude(include.to_string()));
        }
        data.extend_from_slice(include.as_bytes());
        data.push(b'\n');
    }
    let include_size = data.len() - section_start;
    let include_size = u16::try_from(include_size).map_err(|_| Error::SectionOverflow {
        section: "Include",
        size: include_size,
    })?;
    data[INCLUDE_SIZE_FIELD].copy_from_slice(&include_size.to_le_bytes());

    // assemblySectionData
    let section_start = data.len();
    for inst in instructions {
        let word = inst.to_word(table)?;
        data.extend_from_slice(&word.to_le_bytes());
    }
    let assembly_size = data.len() - section_start;
    let assembly_size = u32::try_from(assembly_size).map_err(|_| Error::SectionOverflow {
        section: "Assembly",
        size: assembly_size,
    })?;
    data[ASSEMBLY_SIZE_FIELD].copy_from_slice(&assembly_size.to_le_bytes());

    if verbose {
        Header {
            version: *VERSION,
            include_size,
            assembly_size,
        }
        .print();
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mqarch::{InstructionScope, InstructionSet, Mode};

    fn isa() -> InstructionSet {
        InstructionSet::from_pairs([("nop", 0), ("add", 3), ("lra", 5), ("top", 127)]).unwrap()
    }

    fn no_includes() -> Vec<String> {
        vec![]
    }

    #[test]
    fn test_empty() {
        let bytes = generate_bytes(&no_includes(), &[], &isa(), false).unwrap();
        assert_eq!(bytes, b"1.1 \x00\x00\x00\x00\x00\x00".to_vec());
        assert_eq!(bytes.len(), 10);
    }

    #[test]
    fn test_single_include() {
        let bytes = generate_bytes(&["math"], &[], &isa(), false).unwrap();
        assert_eq!(bytes.len(), 15);
        assert_eq!(&bytes[4..6], &[5, 0]);
        assert_eq!(&bytes[6..10], &[0, 0, 0, 0]);
        assert_eq!(&bytes[10..], b"math\n");
    }

    #[test]
    fn test_words() {
        let code = [
            Instruction::bare("add", 1),
            Instruction::pointer("add", 2, 2),
            Instruction::immediate("nop", 255, 3),
            Instruction::new("top", 255, Mode::Pointer, 4),
        ];
        let bytes = generate_bytes(&no_includes(), &code, &isa(), false).unwrap();
        assert_eq!(&bytes[6..10], &[8, 0, 0, 0]);
        assert_eq!(
            &bytes[10..],
            &[0x03, 0x00, 0x03, 0x81, 0x80, 0x7F, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_section_sizes() {
        let includes = ["a", "bb", "ccc"];
        let code: Vec<Instruction> = (0..5).map(|i| Instruction::immediate("lra", i, 0)).collect();
        let bytes = generate_bytes(&includes, &code, &isa(), false).unwrap();
        let include_size = u16::from_le_bytes([bytes[4], bytes[5]]) as usize;
        let assembly_size = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;
        assert_eq!(include_size, 2 + 3 + 4);
        assert_eq!(assembly_size, 10);
        assert_eq!(bytes.len(), HEADER_SIZE + include_size + assembly_size);
    }

    #[test]
    fn test_scope_input() {
        let scope = InstructionScope::from_iter([
            Instruction::immediate("lra", 1, 0),
            Instruction::bare("nop", 1),
        ]);
        let from_scope = generate_bytes(&no_includes(), scope.leaves(), &isa(), false).unwrap();
        assert_eq!(&from_scope[10..], &[0x85, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_operand_overflow() {
        let code = [Instruction::immediate("lra", 256, 7)];
        let err = generate_bytes(&no_includes(), &code, &isa(), false).unwrap_err();
        assert!(matches!(
            err,
            Error::Arch(mqarch::Error::OperandOverflow {
                value: 256,
                line: 7
            })
        ));
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn test_unknown_opcode() {
        let code = [Instruction::bare("nop", 1), Instruction::bare("hlt", 2)];
        let err = generate_bytes(&no_includes(), &code, &isa(), false).unwrap_err();
        assert!(matches!(
            err,
            Error::Arch(mqarch::Error::UnknownOpcode { ref mnemonic, line: 2 }) if mnemonic == "hlt"
        ));
    }

    #[test]
    fn test_custom_table_opcode_overflow() {
        let mut table = std::collections::HashMap::new();
        table.insert(format!("wide"), 200u8);
        let code = [Instruction::bare("wide", 0)];
        assert!(matches!(
            generate_bytes(&no_includes(), &code, &table, false),
            Err(Error::Arch(mqarch::Error::OpcodeOverflow { number: 200, .. }))
        ));
    }

    #[test]
    fn test_non_ascii_include() {
        assert!(matches!(
            generate_bytes(&["m\u{e4}th"], &[], &isa(), false),
            Err(Error::NonAsciiInclude(_))
        ));
        assert!(matches!(
            generate_bytes(&["a\nb"], &[], &isa(), false),
            Err(Error::NonAsciiInclude(_))
        ));
    }

    #[test]
    fn test_include_section_overflow() {
        let long = "x".repeat(u16::MAX as usize);
        assert!(matches!(
            generate_bytes(&[long], &[], &isa(), false),
            Err(Error::SectionOverflow {
                section: "Include",
                size: 65536
            })
        ));
    }

    #[test]
    fn test_verbose_does_not_change_output() {
        let code = [Instruction::pointer("lra", 9, 0)];
        let quiet = generate_bytes(&["io"], &code, &isa(), false).unwrap();
        let loud = generate_bytes(&["io"], &code, &isa(), true).unwrap();
        assert_eq!(quiet, loud);
    }
}
