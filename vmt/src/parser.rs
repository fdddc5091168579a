use arch::{inst::Inst, symbol::is_symbol};
use std::fmt;
use strum::{Display, EnumString};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ArithOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Segment {
    Constant,
    Local,
    Argument,
    This,
    That,
    Pointer,
    Temp,
    Static,
}

impl Segment {
    /// Largest valid index of the segment.
    pub fn limit(self) -> u16 {
        match self {
            Segment::Pointer => 1,
            Segment::Temp => 7,
            _ => Inst::MAX_ADDR,
        }
    }
}

/// One VM command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Arithmetic(ArithOp),
    Push(Segment, u16),
    Pop(Segment, u16),
    Label(String),
    Goto(String),
    IfGoto(String),
    Function(String, u16),
    Call(String, u16),
    Return,
}

impl Command {
    /// Classifies one source line. Blank and comment-only lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, Error> {
        let code = match line.split_once("//") {
            Some((code, _)) => code,
            None => line,
        };
        let mut toks = code.split_whitespace();
        let Some(keyword) = toks.next() else {
            return Ok(None);
        };

        let cmd = match keyword {
            "push" | "pop" => {
                let segment = arg(keyword, toks.next())?;
                let segment = segment
                    .parse::<Segment>()
                    .map_err(|_| Error::UnknownSegment(segment.to_string()))?;
                let index = index(arg(keyword, toks.next())?)?;
                if index > segment.limit() {
                    return Err(Error::IndexOutOfRange(segment.to_string(), index, segment.limit()));
                }
                if keyword == "push" {
                    Command::Push(segment, index)
                } else {
                    Command::Pop(segment, index)
                }
            }
            "label" => Command::Label(name(keyword, toks.next())?),
            "goto" => Command::Goto(name(keyword, toks.next())?),
            "if-goto" => Command::IfGoto(name(keyword, toks.next())?),
            "function" | "call" => {
                let name = name(keyword, toks.next())?;
                let count = index(arg(keyword, toks.next())?)?;
                if keyword == "function" {
                    Command::Function(name, count)
                } else {
                    Command::Call(name, count)
                }
            }
            "return" => Command::Return,
            op => Command::Arithmetic(
                op.parse::<ArithOp>()
                    .map_err(|_| Error::UnknownCommandKeyword(op.to_string()))?,
            ),
        };

        match toks.next() {
            Some(extra) => Err(Error::UnexpectedArgument(extra.to_string())),
            None => Ok(Some(cmd)),
        }
    }
}

fn arg<'a>(keyword: &str, tok: Option<&'a str>) -> Result<&'a str, Error> {
    tok.ok_or_else(|| Error::MissingArgument(keyword.to_string()))
}

fn name(keyword: &str, tok: Option<&str>) -> Result<String, Error> {
    let tok = arg(keyword, tok)?;
    if !is_symbol(tok) {
        return Err(Error::InvalidName(tok.to_string()));
    }
    Ok(tok.to_string())
}

// Bounded so that every index is loadable with one address instruction.
fn index(tok: &str) -> Result<u16, Error> {
    match tok.parse::<u16>() {
        Ok(value) if value <= Inst::MAX_ADDR => Ok(value),
        _ => Err(Error::ParseArgument(tok.to_string())),
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Arithmetic(op) => write!(f, "{}", op),
            Command::Push(segment, index) => write!(f, "push {} {}", segment, index),
            Command::Pop(segment, index) => write!(f, "pop {} {}", segment, index),
            Command::Label(label) => write!(f, "label {}", label),
            Command::Goto(label) => write!(f, "goto {}", label),
            Command::IfGoto(label) => write!(f, "if-goto {}", label),
            Command::Function(name, n_locals) => write!(f, "function {} {}", name, n_locals),
            Command::Call(name, n_args) => write!(f, "call {} {}", name, n_args),
            Command::Return => write!(f, "return"),
        }
    }
}
