use arch::inst::Inst;
use color_print::cprintln;

use super::Hook;
use crate::model::State;

/// Prints every executed instruction.
pub struct Trace {
    enabled: bool,
}

impl Trace {
    pub fn arg(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Hook for Trace {
    fn init(&mut self, state: State) -> State {
        if self.enabled {
            println!(" * Trace");
        }
        state
    }

    fn exec(&mut self, time: u64, addr: u16, inst: Inst, state: State) -> State {
        if self.enabled {
            cprintln!("[{:0>6}] <g>{:04X}</> {}", time, addr, inst.cformat());
        }
        state
    }
}
