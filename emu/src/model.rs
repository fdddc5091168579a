use arch::inst::Inst;

use crate::error::Error;

pub struct State {
    rom: Vec<u16>,
    ram: Vec<u16>,
    len: usize,
    a: u16,
    d: u16,
    pc: u16,
    halted: bool,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

// Memory access
impl State {
    const ADDR_MASK: u16 = 0x7FFF;

    pub fn get(&self, addr: impl Into<u16>) -> u16 {
        self.ram[(addr.into() & Self::ADDR_MASK) as usize]
    }

    pub fn set(&mut self, addr: impl Into<u16>, val: u16) {
        self.ram[(addr.into() & Self::ADDR_MASK) as usize] = val;
    }

    pub fn a(&self) -> u16 {
        self.a
    }

    pub fn d(&self) -> u16 {
        self.d
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }
}

impl State {
    pub const ROM_SIZE: usize = 0x8000;
    pub const RAM_SIZE: usize = 0x8000;

    pub fn new() -> Self {
        State {
            rom: vec![0; Self::ROM_SIZE],
            ram: vec![0; Self::RAM_SIZE],
            len: 0,
            a: 0,
            d: 0,
            pc: 0,
            halted: false,
        }
    }

    pub fn load(&mut self, words: &[u16]) -> Result<(), Error> {
        if words.len() > Self::ROM_SIZE {
            return Err(Error::ProgramTooLarge(words.len()));
        }
        self.rom[..words.len()].copy_from_slice(words);
        self.len = words.len();
        Ok(())
    }

    /// Loads `.hack` text: one 16-digit binary word per line, blank lines ignored.
    pub fn load_hack(&mut self, text: &str) -> Result<(), Error> {
        let mut words = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.len() != 16 {
                return Err(Error::InvalidWord(idx, line.to_string()));
            }
            let word = u16::from_str_radix(line, 2)
                .map_err(|_| Error::InvalidWord(idx, line.to_string()))?;
            words.push(word);
        }
        self.load(&words)
    }

    pub fn load_hack_file(&mut self, fname: &str) -> Result<(), Error> {
        let text = std::fs::read_to_string(fname)
            .map_err(|err| Error::FileOpen(fname.to_string(), err))?;
        self.load_hack(&text)
    }

    /// Ran past the loaded program, or is spinning in a `(END) @END 0;JMP` loop.
    pub fn is_terminated(&self) -> bool {
        self.halted || self.pc as usize >= self.len
    }

    pub fn exec(&mut self) -> Result<(u16, Inst), Error> {
        let pc = self.pc;
        let bin = self.rom[pc as usize];
        let inst = Inst::from_bin(bin).map_err(|err| Error::Decode(pc, err))?;

        match inst {
            Inst::A(value) => {
                self.a = value;
                self.pc = pc + 1;
            }
            Inst::C(dest, comp, jump) => {
                let addr = self.a;
                let m = if comp.uses_memory() { self.get(addr) } else { 0 };
                let out = comp.eval(self.a, self.d, m);
                if dest.m() {
                    self.set(addr, out);
                }
                if dest.a() {
                    self.a = out;
                }
                if dest.d() {
                    self.d = out;
                }
                if jump.test(out) {
                    self.halted = addr.wrapping_add(1) == pc
                        && self.rom[addr as usize] == Inst::A(addr).to_bin();
                    self.pc = addr & Self::ADDR_MASK;
                } else {
                    self.pc = pc + 1;
                }
            }
        }
        Ok((pc, inst))
    }

    /// Executes until termination or `tmax` steps. Returns the number of executed steps.
    pub fn run(&mut self, tmax: u64) -> Result<u64, Error> {
        let mut time = 0;
        while time < tmax && !self.is_terminated() {
            self.exec()?;
            time += 1;
        }
        Ok(time)
    }
}
