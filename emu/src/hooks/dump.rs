use arch::{inst::Inst, symbol::Predef};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{error::Error, model::State};

use super::Hook;

#[derive(Debug)]
pub struct Dump {
    file: Option<String>,
    all: bool,
    list: List,
}

/// Dump points keyed by program counter.
#[derive(Debug, Default, Serialize, Deserialize)]
struct List(HashMap<u16, Config>);

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    #[serde(default)]
    stack: bool,
    #[serde(default)]
    ram: Vec<Cell>,
}

/// A RAM cell, either by predefined name (`SP`, `R13`, ...) or by address.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum Cell {
    Sym(Predef),
    Addr(u16),
}

impl Cell {
    fn addr(self) -> u16 {
        match self {
            Cell::Sym(sym) => sym.addr(),
            Cell::Addr(addr) => addr,
        }
    }
}

impl Dump {
    pub const STACK_BASE: u16 = 256;

    pub fn arg(file: Option<String>, all: bool) -> Result<Self, Error> {
        let list = match &file {
            Some(fname) => {
                let text = std::fs::read_to_string(fname)
                    .map_err(|err| Error::FileOpen(fname.clone(), err))?;
                serde_yaml::from_str(&text).map_err(|err| Error::Config(fname.clone(), err))?
            }
            None => List::default(),
        };
        Ok(Self { file, all, list })
    }

    fn get(&self, pc: u16) -> Option<&Config> {
        self.list.0.get(&pc)
    }
}

impl Hook for Dump {
    fn init(&mut self, state: State) -> State {
        if self.all {
            println!(" * Dump all");
        }
        if let Some(fname) = &self.file {
            println!(" * Dump[{}] {:?}", self.list.0.len(), fname);
        }
        state
    }

    fn exec(&mut self, _time: u64, addr: u16, _inst: Inst, state: State) -> State {
        if let Some(cfg) = self.get(addr) {
            self.print_reg(&state);
            if cfg.stack {
                self.print_stack(&state);
            }
            self.print_ram(&state, &cfg.ram);
        } else if self.all {
            self.print_reg(&state);
        }
        state
    }
}

impl Dump {
    fn print_reg(&self, cpu: &State) {
        use Predef::*;
        println!(" +-----------+-----------+-----------+-----------+");
        println!(
            " |  a: {:0>4X} |  d: {:0>4X} | pc: {:0>4X} |           |",
            cpu.a(),
            cpu.d(),
            cpu.pc()
        );
        println!(
            " | sp: {:0>4X} | lcl:{:0>4X} | arg:{:0>4X} |           |",
            cpu.get(SP),
            cpu.get(LCL),
            cpu.get(ARG)
        );
        println!(
            " |this:{:0>4X} |that:{:0>4X} |           |           |",
            cpu.get(THIS),
            cpu.get(THAT)
        );
        println!(" +-----------+-----------+-----------+-----------+");
    }

    fn print_stack(&self, cpu: &State) {
        let sp = cpu.get(Predef::SP);
        for addr in Self::STACK_BASE..sp {
            println!(
                " | {:0>4X} : {:0>4X}                                 |",
                addr,
                cpu.get(addr)
            );
        }
        println!(" +-----------------------------------------------+");
    }

    fn print_ram(&self, cpu: &State, cells: &[Cell]) {
        for cell in cells {
            println!(
                " | {:0>4X} : {:0>4X}                                 |",
                cell.addr(),
                cpu.get(cell.addr())
            );
        }
        println!(" +-----------------------------------------------+");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config() {
        let list: List = serde_yaml::from_str(
            "\
12:
  stack: true
  ram: [SP, LCL, 300]
40:
  ram: [R13]
",
        )
        .unwrap();
        let cfg = list.0.get(&12).unwrap();
        assert!(cfg.stack);
        let addrs: Vec<u16> = cfg.ram.iter().map(|cell| cell.addr()).collect();
        assert_eq!(addrs, vec![0, 1, 300]);
        let cfg = list.0.get(&40).unwrap();
        assert!(!cfg.stack);
        assert_eq!(cfg.ram[0].addr(), 13);
    }
}
