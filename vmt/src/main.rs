use color_print::cprintln;
use hvmt::{Error, Options, Session, Unit};
use std::path::{Path, PathBuf};

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
    /// Input `.vm` file, or a directory of them
    input: String,

    /// Output file [default: `Foo.asm` for `Foo.vm`, `Dir/Dir.asm` for `Dir/`]
    #[clap(short, long)]
    output: Option<String>,

    /// Emit bootstrap code (default for directories)
    #[clap(long, conflicts_with = "no_bootstrap")]
    bootstrap: bool,

    /// Never emit bootstrap code
    #[clap(long)]
    no_bootstrap: bool,

    /// Do not annotate the output with VM commands
    #[clap(long)]
    no_comment: bool,
}

fn fail(err: Error) -> ! {
    cprintln!("<red,bold>error</>: {}", err);
    std::process::exit(1);
}

/// `.vm` files of a directory, sorted by file name.
fn discover(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let read_err = |err| Error::ReadDir(dir.display().to_string(), err);
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "vm") {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        return Err(Error::NoUnits(dir.display().to_string()));
    }
    Ok(paths)
}

fn default_output(input: &Path, is_dir: bool) -> Result<PathBuf, Error> {
    if !is_dir {
        return Ok(input.with_extension("asm"));
    }
    let dir = input
        .canonicalize()
        .map_err(|err| Error::ReadDir(input.display().to_string(), err))?;
    let name = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    Ok(dir.join(name).with_extension("asm"))
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("Hack VM Translator");

    let input = Path::new(&args.input);
    let is_dir = input.is_dir();
    let options = Options {
        bootstrap: (is_dir || args.bootstrap) && !args.no_bootstrap,
        comments: !args.no_comment,
    };

    println!("1. Read Files");
    let paths = if is_dir {
        discover(input).unwrap_or_else(|err| fail(err))
    } else {
        vec![input.to_path_buf()]
    };
    let units: Vec<Unit> = paths
        .iter()
        .map(|path| {
            println!("  < {}", path.display());
            let source = std::fs::read_to_string(path)
                .unwrap_or_else(|err| fail(Error::FileOpen(path.display().to_string(), err)));
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            Unit::new(name, source)
        })
        .collect();

    println!("2. Translate Units");
    if options.bootstrap {
        println!("  + bootstrap");
    }
    let mut session = Session::new(&options);
    for (path, unit) in paths.iter().zip(&units) {
        session.translate_unit(unit).unwrap_or_else(|err| {
            err.print_diag(&path.display().to_string(), &unit.source);
            std::process::exit(1);
        });
    }

    println!("3. Write Output");
    let output = match &args.output {
        Some(output) => PathBuf::from(output),
        None => default_output(input, is_dir).unwrap_or_else(|err| fail(err)),
    };
    println!("  > {}", output.display());
    let text = session.finish();
    std::fs::write(&output, &text)
        .unwrap_or_else(|err| fail(Error::FileWrite(output.display().to_string(), err)));
    println!("  {} lines", text.lines().count());
}
