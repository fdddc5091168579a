use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::Error;

/// Symbols defined by the architecture itself.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
    IntoStaticStr,
)]
pub enum Predef {
    SP,
    LCL,
    ARG,
    THIS,
    THAT,
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
    SCREEN,
    KBD,
}

impl Predef {
    pub const SCREEN_BASE: u16 = 0x4000;
    pub const KBD_ADDR: u16 = 0x6000;

    pub fn addr(self) -> u16 {
        use Predef::*;
        match self {
            SP => 0,
            LCL => 1,
            ARG => 2,
            THIS => 3,
            THAT => 4,
            R0 => 0,
            R1 => 1,
            R2 => 2,
            R3 => 3,
            R4 => 4,
            R5 => 5,
            R6 => 6,
            R7 => 7,
            R8 => 8,
            R9 => 9,
            R10 => 10,
            R11 => 11,
            R12 => 12,
            R13 => 13,
            R14 => 14,
            R15 => 15,
            SCREEN => Self::SCREEN_BASE,
            KBD => Self::KBD_ADDR,
        }
    }
}

impl From<Predef> for u16 {
    fn from(sym: Predef) -> u16 {
        sym.addr()
    }
}

static PREDEFINED: Lazy<IndexMap<&'static str, u16>> =
    Lazy::new(|| Predef::iter().map(|sym| (sym.into(), sym.addr())).collect());

/// Name of a label or variable: letters, digits, `_`, `.`, `$`, `:`, not starting with a digit.
pub fn is_symbol(s: &str) -> bool {
    match s.chars().next() {
        Some(head) if !head.is_ascii_digit() => s
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '$' | ':')),
        _ => false,
    }
}

pub fn is_predefined(name: &str) -> bool {
    PREDEFINED.contains_key(name)
}

/// Symbol name to address map of one compilation unit.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    table: IndexMap<String, u16>,
    next_var: u16,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub const VAR_BASE: u16 = 16;

    pub fn new() -> Self {
        SymbolTable {
            table: PREDEFINED
                .iter()
                .map(|(name, addr)| (name.to_string(), *addr))
                .collect(),
            next_var: Self::VAR_BASE,
        }
    }

    /// Inserts or overwrites a user symbol. Predefined symbols are never reassigned.
    pub fn add(&mut self, name: &str, addr: u16) -> Result<(), Error> {
        if is_predefined(name) {
            return Err(Error::ReservedSymbol(name.to_string()));
        }
        self.table.insert(name.to_string(), addr);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn resolve(&self, name: &str) -> Option<u16> {
        self.table.get(name).copied()
    }

    /// Records a label declaration; a second declaration of the same name is an error.
    pub fn add_label(&mut self, name: &str, addr: u16) -> Result<(), Error> {
        if self.contains(name) && !is_predefined(name) {
            return Err(Error::RedefinedLabel(name.to_string()));
        }
        self.add(name, addr)
    }

    /// Resolves `name`, allocating the next free variable address if it is unseen.
    pub fn allocate(&mut self, name: &str) -> Result<u16, Error> {
        if let Some(addr) = self.resolve(name) {
            return Ok(addr);
        }
        if self.next_var >= Predef::SCREEN_BASE {
            return Err(Error::AddressSpaceOverflow(name.to_string()));
        }
        let addr = self.next_var;
        self.add(name, addr)?;
        self.next_var += 1;
        Ok(addr)
    }
}
