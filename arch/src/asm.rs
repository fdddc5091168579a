use crate::{comp::Comp, dest::Dest, inst::fmt_c, jump::Jump};
use std::fmt;

/// Operand of an address instruction before symbol resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imm {
    Literal(u16),
    Symbol(String),
}

/// One symbolic assembly command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asm {
    /// `@value` or `@symbol`
    At(Imm),
    /// `dest=comp;jump`
    Code(Dest, Comp, Jump),
    /// `(LABEL)`, occupies no program memory
    Label(String),
}

impl Asm {
    pub fn sym(name: impl Into<String>) -> Self {
        Asm::At(Imm::Symbol(name.into()))
    }

    pub fn lit(value: u16) -> Self {
        Asm::At(Imm::Literal(value))
    }

    pub fn set(dest: Dest, comp: Comp) -> Self {
        Asm::Code(dest, comp, Jump::Null)
    }

    pub fn jump(comp: Comp, jump: Jump) -> Self {
        Asm::Code(Dest::Null, comp, jump)
    }

    pub fn label(name: impl Into<String>) -> Self {
        Asm::Label(name.into())
    }

    /// Whether the command occupies one word of program memory.
    pub fn is_inst(&self) -> bool {
        !matches!(self, Asm::Label(_))
    }
}

impl fmt::Display for Imm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Imm::Literal(value) => write!(f, "{}", value),
            Imm::Symbol(name) => write!(f, "{}", name),
        }
    }
}

impl fmt::Display for Asm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asm::At(imm) => write!(f, "@{}", imm),
            Asm::Code(dest, comp, jump) => fmt_c(f, *dest, *comp, *jump),
            Asm::Label(name) => write!(f, "({})", name),
        }
    }
}
