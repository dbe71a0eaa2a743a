use std::io::Write;

use mqasm::config::{self, Program};
use mqasm::error::Error;
use mqasm::{dump, generate_bytes, msg, Image};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about,help_template = HELP_TEMPLATE)]
struct Args {
    /// Resolved program listing (YAML)
    #[clap(default_value = "main.mql.yaml")]
    input: String,

    /// Instruction set (YAML map of mnemonic to opcode number)
    #[clap(short, long, default_value = "isa.yaml")]
    isa: String,

    /// Output file [default: input with .mqa extension]
    #[clap(short, long)]
    output: Option<String>,

    /// Print the executable header
    #[clap(short, long)]
    verbose: bool,

    /// Dump the written executable
    #[clap(short, long)]
    dump: bool,
}

fn write_file(path: &str, bytes: &[u8]) -> Result<(), Error> {
    let mut file =
        std::fs::File::create(path).map_err(|e| Error::FileCreate(path.to_string(), e))?;
    file.write_all(bytes)
        .map_err(|e| Error::FileWrite(path.to_string(), e))
}

fn fail(err: Error, program: Option<&Program>) -> ! {
    let source = program.and_then(Program::source_lines);
    match &source {
        Some((file, lines)) => err.print_diag(Some((*file, lines.as_slice()))),
        None => err.print_diag(None),
    }
    std::process::exit(1);
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("MQ Assembler");

    println!("1. Load Instruction Set");
    println!("  < {}", &args.isa);
    let isa = config::load_isa(&args.isa).unwrap_or_else(|e| fail(e, None));

    println!("2. Load Program");
    println!("  < {}", &args.input);
    let program = Program::load(&args.input).unwrap_or_else(|e| fail(e, None));
    let msgs = msg::check_includes(&program.include);
    msg::dump(&msgs);

    println!("3. Generate Binary");
    let bytes = generate_bytes(&program.include, &program.code, &isa, args.verbose)
        .unwrap_or_else(|e| fail(e, Some(&program)));

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config::output_path(&args.input));
    println!("  > {}", &output);
    write_file(&output, &bytes).unwrap_or_else(|e| fail(e, None));

    if args.dump {
        let image = Image::parse(&bytes).unwrap_or_else(|e| fail(e, None));
        dump::print_listing(&image, &isa);
    }
}
