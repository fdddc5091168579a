use arch::{
    asm::{Asm, Imm},
    inst::Inst,
    symbol::SymbolTable,
};

use crate::{
    error::{Error, Located},
    parser::Line,
};

/// Tokenizes every line of `source`, stopping at the first malformed one.
pub fn parse(source: &str) -> Result<Vec<Line>, Located> {
    source
        .lines()
        .enumerate()
        .map(|(idx, raw)| Line::parse(idx, raw).map_err(|err| Located::new(idx, err)))
        .collect()
}

/// Pass 1: bind every label to the address of the instruction that follows it.
/// Instructions and labels past the last ROM address are rejected.
pub fn collect_labels(lines: &[Line], table: &mut SymbolTable) -> Result<(), Located> {
    let mut pc: u16 = 0;
    for line in lines {
        let Some(asm) = &line.asm else {
            continue;
        };
        if pc > Inst::MAX_ADDR {
            let err = arch::Error::RomOverflow(asm.to_string(), pc);
            return Err(Located::new(line.idx, err));
        }
        if let Asm::Label(name) = asm {
            table
                .add_label(name, pc)
                .map_err(|err| Located::new(line.idx, err))?;
        }
        if asm.is_inst() {
            pc += 1;
        }
    }
    Ok(())
}

/// Pass 2: emit one word per address/compute instruction, allocating variables from 16.
pub fn generate(lines: &[Line], table: &mut SymbolTable) -> Result<Vec<u16>, Located> {
    let mut words = Vec::new();
    for line in lines {
        if let Some(asm) = &line.asm {
            let inst = resolve(asm, table).map_err(|err| Located::new(line.idx, err))?;
            if let Some(inst) = inst {
                words.push(inst.to_bin());
            }
        }
    }
    Ok(words)
}

fn resolve(asm: &Asm, table: &mut SymbolTable) -> Result<Option<Inst>, Error> {
    match asm {
        Asm::At(Imm::Literal(value)) => Ok(Some(Inst::A(*value))),
        Asm::At(Imm::Symbol(name)) => Ok(Some(Inst::A(table.allocate(name)?))),
        Asm::Code(dest, comp, jump) => Ok(Some(Inst::C(*dest, *comp, *jump))),
        Asm::Label(_) => Ok(None),
    }
}

pub fn assemble(source: &str) -> Result<Vec<u16>, Located> {
    let lines = parse(source)?;
    let mut table = SymbolTable::new();
    collect_labels(&lines, &mut table)?;
    generate(&lines, &mut table)
}

pub fn to_text(words: &[u16]) -> String {
    words.iter().map(|word| format!("{:016b}\n", word)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(words: &[u16]) -> Vec<String> {
        to_text(words).lines().map(str::to_string).collect()
    }

    #[test]
    fn label_takes_no_address() {
        let words = assemble("(LOOP)\n@LOOP\n0;JMP").unwrap();
        assert_eq!(
            lines(&words),
            vec!["0000000000000000", "1110101010000111"]
        );
    }

    #[test]
    fn forward_label() {
        let source = "\
@END
D;JGT
@i
(END)
@END
0;JMP
";
        let words = assemble(source).unwrap();
        assert_eq!(words.len(), 5);
        assert_eq!(words[0], 3);
        assert_eq!(words[3], 3);
    }

    #[test]
    fn variables_from_sixteen() {
        let source = "\
@i
M=1
@sum
M=0
@i
D=M
@sum
";
        let words = assemble(source).unwrap();
        assert_eq!(words[0], 16);
        assert_eq!(words[2], 17);
        assert_eq!(words[4], 16);
        assert_eq!(words[6], 17);
    }

    #[test]
    fn labels_win_over_variables() {
        // A label used before its declaration is still a label, not a variable.
        let words = assemble("@LOOP\n@x\n(LOOP)\n@LOOP").unwrap();
        assert_eq!(words, vec![2, 16, 2]);
    }

    #[test]
    fn predefined_symbols() {
        let words = assemble("@SP\n@THAT\n@R15\n@SCREEN\n@KBD").unwrap();
        assert_eq!(words, vec![0, 4, 15, 16384, 24576]);
    }

    #[test]
    fn error_line() {
        let err = assemble("@1\n\nD=D*A\n").unwrap_err();
        assert_eq!(err.line_idx, 2);
        assert!(matches!(
            err.error,
            Error::Arch(arch::Error::UnknownMnemonic(_))
        ));
    }

    #[test]
    fn reserved_label() {
        let err = assemble("@1\n(SP)\n").unwrap_err();
        assert_eq!(err.line_idx, 1);
        assert!(matches!(
            err.error,
            Error::Arch(arch::Error::ReservedSymbol(_))
        ));
    }

    #[test]
    fn rom_is_full() {
        let full = "D=D+1\n".repeat(0x8000);
        assert_eq!(assemble(&full).unwrap().len(), 0x8000);

        let err = assemble(&format!("{full}D=D-1\n")).unwrap_err();
        assert_eq!(err.line_idx, 0x8000);
        assert!(matches!(
            err.error,
            Error::Arch(arch::Error::RomOverflow(ref text, 0x8000)) if text == "D=D-1"
        ));
    }

    #[test]
    fn label_past_last_address() {
        // @END and 0;JMP take addresses 0 and 1, the body fills the rest of ROM
        let body = "D=D+1\n".repeat(0x8000 - 2);
        let err = assemble(&format!("@END\n0;JMP\n{body}(END)\n@END\n")).unwrap_err();
        assert_eq!(err.line_idx, 0x8000);
        assert!(matches!(
            err.error,
            Error::Arch(arch::Error::RomOverflow(ref text, 0x8000)) if text == "(END)"
        ));
    }

    #[test]
    fn no_counter_overflow() {
        let source = format!("{}(X)\n", "D=D+1\n".repeat(0x10000));
        let err = assemble(&source).unwrap_err();
        assert_eq!(err.line_idx, 0x8000);
    }

    #[test]
    fn redefined_label() {
        let err = assemble("(A1)\n@1\n(A1)\n").unwrap_err();
        assert_eq!(err.line_idx, 2);
        assert!(matches!(
            err.error,
            Error::Arch(arch::Error::RedefinedLabel(_))
        ));
    }
}
