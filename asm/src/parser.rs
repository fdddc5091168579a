use arch::{
    asm::{Asm, Imm},
    comp::Comp,
    dest::Dest,
    inst::Inst,
    jump::Jump,
    symbol::is_symbol,
};

use crate::error::Error;

// ----------------------------------------------------------------------------
// Line

#[derive(Debug, Clone)]
pub struct Line {
    pub idx: usize,
    pub raw: String,
    pub comment: Option<String>,
    pub asm: Option<Asm>,
}

impl Line {
    pub fn parse(idx: usize, raw: &str) -> Result<Self, Error> {
        let (code, comment) = match raw.split_once("//") {
            Some((code, comment)) => (code, Some(comment.trim().to_string())),
            None => (raw, None),
        };
        Ok(Line {
            idx,
            raw: raw.to_string(),
            comment,
            asm: parse_code(code)?,
        })
    }
}

// ----------------------------------------------------------------------------
// Statement

/// Classifies one comment-free line. Blank lines yield `None`.
pub fn parse_code(code: &str) -> Result<Option<Asm>, Error> {
    let code: String = code.chars().filter(|ch| !ch.is_whitespace()).collect();

    if code.is_empty() {
        return Ok(None);
    }

    // @value, @symbol
    if let Some(operand) = code.strip_prefix('@') {
        return Ok(Some(Asm::At(parse_imm(operand)?)));
    }

    // (LABEL)
    if let Some(rest) = code.strip_prefix('(') {
        let label = rest
            .strip_suffix(')')
            .ok_or_else(|| Error::SyntaxError(code.clone()))?;
        if !is_symbol(label) {
            return Err(arch::Error::MalformedOperand(label.to_string()).into());
        }
        return Ok(Some(Asm::Label(label.to_string())));
    }

    // dest=comp;jump
    let (dest, rest) = match code.split_once('=') {
        Some((dest, rest)) => (dest, rest),
        None => ("", code.as_str()),
    };
    let (comp, jump) = match rest.split_once(';') {
        Some((comp, jump)) => (comp, jump),
        None => (rest, ""),
    };
    Ok(Some(Asm::Code(
        Dest::parse(dest)?,
        Comp::parse(comp)?,
        Jump::parse(jump),
    )))
}

// ----------------------------------------------------------------------------
// Immidiate

fn parse_imm(s: &str) -> Result<Imm, Error> {
    if !s.is_empty() && s.chars().all(|ch| ch.is_ascii_digit()) {
        return match s.parse::<u16>() {
            Ok(value) if value <= Inst::MAX_ADDR => Ok(Imm::Literal(value)),
            _ => Err(arch::Error::MalformedOperand(s.to_string()).into()),
        };
    }
    if is_symbol(s) {
        Ok(Imm::Symbol(s.to_string()))
    } else {
        Err(arch::Error::MalformedOperand(s.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(code: &str) -> Option<Asm> {
        parse_code(code).unwrap()
    }

    #[test]
    fn blank_and_comment() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   \t"), None);
        let line = Line::parse(3, "   // only a comment").unwrap();
        assert_eq!(line.asm, None);
        assert_eq!(line.comment.as_deref(), Some("only a comment"));
    }

    #[test]
    fn address() {
        assert_eq!(parse("@17"), Some(Asm::lit(17)));
        assert_eq!(parse("  @ LOOP "), Some(Asm::sym("LOOP")));
        assert_eq!(parse("@Main.main$ret.1"), Some(Asm::sym("Main.main$ret.1")));
    }

    #[test]
    fn label() {
        assert_eq!(parse("(LOOP)"), Some(Asm::label("LOOP")));
        assert!(matches!(parse_code("(LOOP"), Err(Error::SyntaxError(_))));
        assert!(parse_code("()").is_err());
    }

    #[test]
    fn compute() {
        assert_eq!(parse("D=M"), Some(Asm::set(Dest::D, Comp::M)));
        assert_eq!(parse("0;JMP"), Some(Asm::jump(Comp::Zero, Jump::JMP)));
        assert_eq!(
            parse("AM = M - 1 ; JNE"),
            Some(Asm::Code(Dest::AM, Comp::MMinusOne, Jump::JNE))
        );
        assert_eq!(parse("D"), Some(Asm::set(Dest::Null, Comp::D)));
    }

    #[test]
    fn line_keeps_code_before_comment() {
        let line = Line::parse(0, "D=D+A // add").unwrap();
        assert_eq!(line.asm, Some(Asm::set(Dest::D, Comp::DPlusA)));
    }

    #[test]
    fn errors() {
        assert!(matches!(
            parse_code("D=D*A"),
            Err(Error::Arch(arch::Error::UnknownMnemonic(m))) if m == "D*A"
        ));
        assert!(matches!(
            parse_code("X=D"),
            Err(Error::Arch(arch::Error::UnknownMnemonic(_)))
        ));
        assert!(matches!(
            parse_code("@32768"),
            Err(Error::Arch(arch::Error::MalformedOperand(_)))
        ));
        assert!(matches!(
            parse_code("@-1"),
            Err(Error::Arch(arch::Error::MalformedOperand(_)))
        ));
        assert!(matches!(
            parse_code("@"),
            Err(Error::Arch(arch::Error::MalformedOperand(_)))
        ));
        assert!(matches!(
            parse_code("@1abc"),
            Err(Error::Arch(arch::Error::MalformedOperand(_)))
        ));
    }
}
