use color_print::{cformat, cprintln};
use mqarch::{Instruction, OpcodeTable, Word};

use crate::image::Image;

fn word_line<T: OpcodeTable + ?Sized>(addr: usize, word: Word, table: &T) -> String {
    let bytes = word.to_le_bytes();
    let inst = match Instruction::from_word(word, table) {
        Some(inst) => inst.cformat(),
        None => cformat!("<r,s>op#{}</> {}", word.opcode(), word.operand()),
    };
    format!(
        "[{:04X}] {:02X} {:02X} | {}",
        addr, bytes[0], bytes[1], inst
    )
}

/// Prints a decoded executable: header, includes and one row per word.
pub fn print_listing<T: OpcodeTable + ?Sized>(image: &Image, table: &T) {
    image.header.print();
    println!("{}+{}", "-".repeat(15), "-".repeat(40));
    for include in &image.includes {
        cprintln!("{:15}| <g>include</> {}", "", include);
    }
    for (addr, word) in image.words.iter().enumerate() {
        println!("{}", word_line(addr, *word, table));
    }
    println!("{}+{}", "-".repeat(15), "-".repeat(40));
}
