use arch::{
    asm::{Asm, Imm},
    inst::Inst,
    symbol::SymbolTable,
};
use color_print::cformat;

use crate::parser::Line;

/// Prints the program listing: address, word, source line and instruction text.
/// Call after both passes so every variable is already bound.
pub fn print_dump(path: &str, lines: &[Line], table: &SymbolTable) {
    println!(
        "{}+------[{}]{}",
        "-".repeat(24),
        path,
        "-".repeat(45usize.saturating_sub(path.len()))
    );

    let mut pc: u16 = 0;
    for line in lines {
        let comment = line
            .comment
            .as_ref()
            .map(|s| cformat!("<blue>// {}</>", s))
            .unwrap_or_default();
        let line_num = line.idx + 1;

        let body = match &line.asm {
            None => format!("{:24}| {:>4}: {}", "", line_num, comment),
            Some(Asm::Label(name)) => {
                let label = cformat!("<g>({})</>", name);
                format!("{:24}| {:>4}: {} {}", "", line_num, label, comment)
            }
            Some(asm) => {
                let text = match resolve(asm, table) {
                    Some(inst) => {
                        let bin = inst.to_bin();
                        let symbol = match asm {
                            Asm::At(Imm::Symbol(name)) => cformat!(" <c>{}</>", name),
                            _ => String::new(),
                        };
                        format!(
                            "[{:04X}] {:016b} | {:>4}:   {}{} {}",
                            pc,
                            bin,
                            line_num,
                            inst.cformat(),
                            symbol,
                            comment
                        )
                    }
                    None => format!(
                        "[{:04X}] {} | {:>4}:   {} {}",
                        pc,
                        cformat!("<r,s>????????????????</>"),
                        line_num,
                        asm,
                        comment
                    ),
                };
                pc += 1;
                text
            }
        };
        println!("{}", body);
    }
    println!("{}+{}", "-".repeat(24), "-".repeat(53));
}

fn resolve(asm: &Asm, table: &SymbolTable) -> Option<Inst> {
    match asm {
        Asm::At(Imm::Literal(value)) => Some(Inst::A(*value)),
        Asm::At(Imm::Symbol(name)) => table.resolve(name).map(Inst::A),
        Asm::Code(dest, comp, jump) => Some(Inst::C(*dest, *comp, *jump)),
        Asm::Label(_) => None,
    }
}
