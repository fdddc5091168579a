use arch::symbol::SymbolTable;
use color_print::cprintln;
use hasm::{assembler, util, Error};
use std::path::Path;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.asm")]
    input: String,

    /// Output file [default: input with `.hack` extension]
    #[clap(short, long)]
    output: Option<String>,

    /// Dump assembly listing
    #[clap(short, long)]
    dump: bool,
}

fn fail(err: Error) -> ! {
    cprintln!("<red,bold>error</>: {}", err);
    std::process::exit(1);
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("Hack Assembler");

    println!("1. Read File and Parse Lines");
    println!("  < {}", args.input);
    let source = std::fs::read_to_string(&args.input)
        .unwrap_or_else(|err| fail(Error::FileOpen(args.input.clone(), err)));
    let lines = assembler::parse(&source).unwrap_or_else(|err| {
        err.print_diag(&args.input, &source);
        std::process::exit(1);
    });

    println!("2. Collect Labels");
    let mut table = SymbolTable::new();
    let words = assembler::collect_labels(&lines, &mut table)
        .and_then(|_| {
            println!("3. Resolve Symbols & Generate Binary");
            assembler::generate(&lines, &mut table)
        })
        .unwrap_or_else(|err| {
            err.print_diag(&args.input, &source);
            std::process::exit(1);
        });

    let output = args.output.clone().unwrap_or_else(|| {
        Path::new(&args.input)
            .with_extension("hack")
            .to_string_lossy()
            .into_owned()
    });
    println!("  > {}", output);
    std::fs::write(&output, assembler::to_text(&words))
        .unwrap_or_else(|err| fail(Error::FileWrite(output.clone(), err)));

    if args.dump {
        util::print_dump(&args.input, &lines, &table);
    }
    println!("  {} words", words.len());
}
