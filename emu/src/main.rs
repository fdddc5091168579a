use clap::Parser;
use color_print::cprintln;

use hemu::hooks::{dump::Dump, trace::Trace, Hook};
use hemu::{Error, State};

#[derive(Parser, Debug)]
#[clap(
    name = "Hack Emulator",
    version = "v1.0.0",
    about = "Emulator for the Hack ISA"
)]
struct Args {
    #[arg(short = 't', long)]
    tmax: Option<u64>,

    #[arg(short, long)]
    dump_cfg: Option<String>,

    #[arg(short = 'a', long)]
    dump_all: bool,

    #[arg(long)]
    trace: bool,

    #[arg(default_value = "main.hack")]
    input_file: String,
}

fn fail(err: Error) -> ! {
    cprintln!("<red,bold>error</>: {}", err);
    std::process::exit(1);
}

fn main() {
    let args = Args::parse();
    println!("Hack Emulator");

    println!("+-----------------------------------------------+");
    println!("| {:<45} |", args.input_file);
    println!("+-----------------------------------------------+");

    // ------------------------------------------------------------------------
    // Initialize state machine model
    let mut state = {
        let mut cpu = State::new();
        cpu.load_hack_file(&args.input_file)
            .unwrap_or_else(|err| fail(err));
        cpu
    };

    // ------------------------------------------------------------------------
    // Initialize hooks
    println!("[INIT]");
    let dump = Dump::arg(args.dump_cfg, args.dump_all).unwrap_or_else(|err| fail(err));
    let mut hooks: Vec<Box<dyn Hook>> = vec![Box::new(Trace::arg(args.trace)), Box::new(dump)];
    state = hooks.iter_mut().fold(state, |state, hook| hook.init(state));

    // ------------------------------------------------------------------------
    // Main loop
    let mut steps = 0;
    for time in match args.tmax {
        Some(t) => 0_u64..t,
        None => 0_u64..u64::MAX,
    } {
        if state.is_terminated() {
            break;
        }
        let (addr, inst) = state.exec().unwrap_or_else(|err| fail(err));
        state = hooks
            .iter_mut()
            .fold(state, |state, hook| hook.exec(time, addr, inst, state));
        steps = time + 1;
    }

    // Exit
    println!("=================================================");
    println!(
        " {} steps, pc: {:04X}, sp: {:04X}",
        steps,
        state.pc(),
        state.get(arch::symbol::Predef::SP)
    );
}
