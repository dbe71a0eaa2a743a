use color_print::cprintln;
use mqarch::Word;

use crate::error::Error;

// ----------------------------------------------------------------------------
// .mqa layout (little endian)
//
// | offset | size | field               |
// |      0 |    4 | cpuVersion "1.1 "   |
// |      4 |    2 | includeSectionSize  |
// |      6 |    4 | assemblySectionSize |
// |     10 |    N | includeSectionData  |
// |   10+N |    M | assemblySectionData |

pub const VERSION: &[u8; 4] = b"1.1 ";
pub const HEADER_SIZE: usize = 10;

pub const INCLUDE_SIZE_FIELD: std::ops::Range<usize> = 4..6;
pub const ASSEMBLY_SIZE_FIELD: std::ops::Range<usize> = 6..10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: [u8; 4],
    pub include_size: u16,
    pub assembly_size: u32,
}

impl Header {
    pub fn parse(bytes: &[u8]) -> Result<Header, Error> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::Truncated {
                expected: HEADER_SIZE,
                found: bytes.len(),
            });
        }
        let mut version = [0u8; 4];
        version.copy_from_slice(&bytes[0..4]);
        if &version != VERSION {
            return Err(Error::UnsupportedVersion(
                String::from_utf8_lossy(&version).into_owned(),
            ));
        }
        let include_size = u16::from_le_bytes([bytes[4], bytes[5]]);
        let assembly_size = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
        Ok(Header {
            version,
            include_size,
            assembly_size,
        })
    }

    pub fn version_str(&self) -> String {
        String::from_utf8_lossy(&self.version).trim().to_string()
    }

    pub fn total_size(&self) -> usize {
        HEADER_SIZE + self.include_size as usize + self.assembly_size as usize
    }

    pub fn print(&self) {
        cprintln!("<bold>Header start:</>");
        cprintln!("\tcpuVersion:          <y>{}</>", self.version_str());
        cprintln!("\tincludeSectionSize:  <y>{}</>", self.include_size);
        cprintln!("\tassemblySectionSize: <y>{}</>", self.assembly_size);
        cprintln!("<bold>Header end.</>");
        cprintln!("Total size: <g>{}</> bytes", self.total_size());
    }
}

// ----------------------------------------------------------------------------
// Image

/// A decoded .mqa executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub header: Header,
    pub includes: Vec<String>,
    pub words: Vec<Word>,
}

impl Image {
    pub fn parse(bytes: &[u8]) -> Result<Image, Error> {
        let header = Header::parse(bytes)?;

        let expected = header.total_size();
        if bytes.len() < expected {
            return Err(Error::Truncated {
                expected,
                found: bytes.len(),
            });
        }
        if bytes.len() > expected {
            return Err(Error::TrailingBytes(bytes.len() - expected));
        }
        if header.assembly_size % 2 != 0 {
            return Err(Error::MisalignedAssembly(header.assembly_size));
        }

        let asm_start = HEADER_SIZE + header.include_size as usize;
        let includes = parse_includes(&bytes[HEADER_SIZE..asm_start])?;
        let words = bytes[asm_start..]
            .chunks_exact(2)
            .map(|pair| Word::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Ok(Image {
            header,
            includes,
            words,
        })
    }
}

fn parse_includes(section: &[u8]) -> Result<Vec<String>, Error> {
    if section.is_empty() {
        return Ok(vec![]);
    }
    if !section.is_ascii() || section.last() != Some(&b'\n') {
        return Err(Error::MalformedIncludes);
    }
    section[..section.len() - 1]
        .split(|&b| b == b'\n')
        .map(|name| {
            String::from_utf8(name.to_vec()).map_err(|_| Error::MalformedIncludes)
        })
        .collect()
}
