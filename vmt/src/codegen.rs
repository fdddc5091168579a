use arch::{
    asm::Asm,
    comp::Comp,
    dest::Dest,
    jump::Jump,
    symbol::Predef::{self, *},
};

use crate::parser::{ArithOp, Command, Segment};

/// Lowers VM commands of one translation session to Hack assembly.
///
/// Synthesized labels start with `$`, which VM identifiers never do, and are
/// numbered per family for the whole session so concatenated units never
/// collide.
#[derive(Debug, Default)]
pub struct CodeGen {
    output: Vec<String>,
    unit: String,
    comments: bool,
    eq_count: usize,
    gt_count: usize,
    lt_count: usize,
    ret_count: usize,
}

impl CodeGen {
    pub const STACK_BASE: u16 = 256;
    pub const ENTRY: &'static str = "Sys.init";

    pub fn new(comments: bool) -> Self {
        CodeGen {
            comments,
            ..Default::default()
        }
    }

    /// Sets the unit whose `static` segment subsequent commands address.
    pub fn set_unit(&mut self, name: &str) {
        self.unit = name.to_string();
    }

    pub fn write_init(&mut self) {
        self.comment("bootstrap");
        self.emit(Asm::lit(Self::STACK_BASE));
        self.emit(Asm::set(Dest::D, Comp::A));
        self.emit(Asm::sym(SP.to_string()));
        self.emit(Asm::set(Dest::M, Comp::D));
        self.write(&Command::Call(Self::ENTRY.to_string(), 0));
    }

    pub fn write(&mut self, cmd: &Command) {
        self.comment(&cmd.to_string());
        match cmd {
            Command::Arithmetic(op) => self.arithmetic(*op),
            Command::Push(segment, index) => self.push(*segment, *index),
            Command::Pop(segment, index) => self.pop(*segment, *index),
            Command::Label(label) => self.emit(Asm::label(label.as_str())),
            Command::Goto(label) => {
                self.emit(Asm::sym(label.as_str()));
                self.emit(Asm::jump(Comp::Zero, Jump::JMP));
            }
            Command::IfGoto(label) => {
                self.pop_d();
                self.emit(Asm::sym(label.as_str()));
                self.emit(Asm::jump(Comp::D, Jump::JNE));
            }
            Command::Function(name, n_locals) => {
                self.emit(Asm::label(name.as_str()));
                for _ in 0..*n_locals {
                    self.push(Segment::Constant, 0);
                }
            }
            Command::Call(name, n_args) => self.call(name, *n_args),
            Command::Return => self.ret(),
        }
    }

    pub fn finish(self) -> String {
        let mut text = self.output.join("\n");
        text.push('\n');
        text
    }

    fn emit(&mut self, asm: Asm) {
        self.output.push(asm.to_string());
    }

    fn comment(&mut self, text: &str) {
        if self.comments {
            self.output.push(format!("// {}", text));
        }
    }

    fn next(counter: &mut usize) -> usize {
        *counter += 1;
        *counter
    }

    // ------------------------------------------------------------------------
    // Stack primitives

    /// `D = *--SP`
    fn pop_d(&mut self) {
        self.emit(Asm::sym(SP.to_string()));
        self.emit(Asm::set(Dest::AM, Comp::MMinusOne));
        self.emit(Asm::set(Dest::D, Comp::M));
    }

    /// `*SP++ = D`
    fn push_d(&mut self) {
        self.emit(Asm::sym(SP.to_string()));
        self.emit(Asm::set(Dest::A, Comp::M));
        self.emit(Asm::set(Dest::M, Comp::D));
        self.emit(Asm::sym(SP.to_string()));
        self.emit(Asm::set(Dest::M, Comp::MPlusOne));
    }

    // ------------------------------------------------------------------------
    // Arithmetic

    fn arithmetic(&mut self, op: ArithOp) {
        match op {
            ArithOp::Add => self.binary(Comp::DPlusM),
            ArithOp::Sub => self.binary(Comp::MMinusD),
            ArithOp::And => self.binary(Comp::DAndM),
            ArithOp::Or => self.binary(Comp::DOrM),
            ArithOp::Neg => self.unary(Comp::NegM),
            ArithOp::Not => self.unary(Comp::NotM),
            ArithOp::Eq => {
                let n = Self::next(&mut self.eq_count);
                self.relational("EQ", n, Jump::JEQ)
            }
            ArithOp::Gt => {
                let n = Self::next(&mut self.gt_count);
                self.relational("GT", n, Jump::JGT)
            }
            ArithOp::Lt => {
                let n = Self::next(&mut self.lt_count);
                self.relational("LT", n, Jump::JLT)
            }
        }
    }

    /// Pops y, then x, and pushes `comp` evaluated with `D = y`, `M = x`.
    fn binary(&mut self, comp: Comp) {
        self.pop_d();
        self.emit(Asm::sym(SP.to_string()));
        self.emit(Asm::set(Dest::AM, Comp::MMinusOne));
        self.emit(Asm::set(Dest::M, comp));
        self.emit(Asm::sym(SP.to_string()));
        self.emit(Asm::set(Dest::M, Comp::MPlusOne));
    }

    fn unary(&mut self, comp: Comp) {
        self.emit(Asm::sym(SP.to_string()));
        self.emit(Asm::set(Dest::A, Comp::MMinusOne));
        self.emit(Asm::set(Dest::M, comp));
    }

    fn relational(&mut self, family: &str, n: usize, jump: Jump) {
        let is_true = format!("${}.{}", family, n);
        let end = format!("${}_END.{}", family, n);

        self.pop_d();
        self.emit(Asm::sym(SP.to_string()));
        self.emit(Asm::set(Dest::AM, Comp::MMinusOne));
        self.emit(Asm::set(Dest::D, Comp::MMinusD));
        self.emit(Asm::sym(is_true.as_str()));
        self.emit(Asm::jump(Comp::D, jump));

        self.emit(Asm::sym(SP.to_string()));
        self.emit(Asm::set(Dest::A, Comp::M));
        self.emit(Asm::set(Dest::M, Comp::Zero));
        self.emit(Asm::sym(end.as_str()));
        self.emit(Asm::jump(Comp::Zero, Jump::JMP));

        self.emit(Asm::label(is_true));
        self.emit(Asm::sym(SP.to_string()));
        self.emit(Asm::set(Dest::A, Comp::M));
        self.emit(Asm::set(Dest::M, Comp::MinusOne));

        self.emit(Asm::label(end));
        self.emit(Asm::sym(SP.to_string()));
        self.emit(Asm::set(Dest::M, Comp::MPlusOne));
    }

    // ------------------------------------------------------------------------
    // Memory access

    /// Base pointer register of an indirectly addressed segment.
    fn base(segment: Segment) -> Option<Predef> {
        match segment {
            Segment::Local => Some(LCL),
            Segment::Argument => Some(ARG),
            Segment::This => Some(THIS),
            Segment::That => Some(THAT),
            _ => None,
        }
    }

    /// Address instruction selecting a directly addressed cell.
    fn direct(&self, segment: Segment, index: u16) -> Asm {
        match segment {
            Segment::Pointer => Asm::lit(THIS.addr() + index),
            Segment::Temp => Asm::lit(R5.addr() + index),
            _ => Asm::sym(format!("{}.{}", self.unit, index)),
        }
    }

    fn push(&mut self, segment: Segment, index: u16) {
        match (segment, Self::base(segment)) {
            (Segment::Constant, _) => {
                self.emit(Asm::lit(index));
                self.emit(Asm::set(Dest::D, Comp::A));
            }
            (_, Some(base)) => {
                self.emit(Asm::lit(index));
                self.emit(Asm::set(Dest::D, Comp::A));
                self.emit(Asm::sym(base.to_string()));
                self.emit(Asm::set(Dest::A, Comp::DPlusM));
                self.emit(Asm::set(Dest::D, Comp::M));
            }
            (_, None) => {
                let at = self.direct(segment, index);
                self.emit(at);
                self.emit(Asm::set(Dest::D, Comp::M));
            }
        }
        self.push_d();
    }

    fn pop(&mut self, segment: Segment, index: u16) {
        match (segment, Self::base(segment)) {
            // No storage behind `constant`
            (Segment::Constant, _) => {}
            (_, Some(base)) => {
                self.emit(Asm::lit(index));
                self.emit(Asm::set(Dest::D, Comp::A));
                self.emit(Asm::sym(base.to_string()));
                self.emit(Asm::set(Dest::D, Comp::DPlusM));
                self.emit(Asm::sym(R13.to_string()));
                self.emit(Asm::set(Dest::M, Comp::D));
                self.pop_d();
                self.emit(Asm::sym(R13.to_string()));
                self.emit(Asm::set(Dest::A, Comp::M));
                self.emit(Asm::set(Dest::M, Comp::D));
            }
            (_, None) => {
                self.pop_d();
                let at = self.direct(segment, index);
                self.emit(at);
                self.emit(Asm::set(Dest::M, Comp::D));
            }
        }
    }

    // ------------------------------------------------------------------------
    // Subroutines

    fn call(&mut self, name: &str, n_args: u16) {
        let ret = format!("$RET.{}", Self::next(&mut self.ret_count));

        self.emit(Asm::sym(ret.as_str()));
        self.emit(Asm::set(Dest::D, Comp::A));
        self.push_d();
        for base in [LCL, ARG, THIS, THAT] {
            self.emit(Asm::sym(base.to_string()));
            self.emit(Asm::set(Dest::D, Comp::M));
            self.push_d();
        }

        // ARG = SP - 5 - n_args
        self.emit(Asm::sym(SP.to_string()));
        self.emit(Asm::set(Dest::D, Comp::M));
        self.emit(Asm::lit(5));
        self.emit(Asm::set(Dest::D, Comp::DMinusA));
        self.emit(Asm::lit(n_args));
        self.emit(Asm::set(Dest::D, Comp::DMinusA));
        self.emit(Asm::sym(ARG.to_string()));
        self.emit(Asm::set(Dest::M, Comp::D));

        // LCL = SP
        self.emit(Asm::sym(SP.to_string()));
        self.emit(Asm::set(Dest::D, Comp::M));
        self.emit(Asm::sym(LCL.to_string()));
        self.emit(Asm::set(Dest::M, Comp::D));

        self.emit(Asm::sym(name));
        self.emit(Asm::jump(Comp::Zero, Jump::JMP));
        self.emit(Asm::label(ret));
    }

    fn ret(&mut self) {
        // R13 = FRAME = LCL
        self.emit(Asm::sym(LCL.to_string()));
        self.emit(Asm::set(Dest::D, Comp::M));
        self.emit(Asm::sym(R13.to_string()));
        self.emit(Asm::set(Dest::M, Comp::D));

        // R14 = *(FRAME - 5), read before *ARG is overwritten
        self.emit(Asm::lit(5));
        self.emit(Asm::set(Dest::A, Comp::DMinusA));
        self.emit(Asm::set(Dest::D, Comp::M));
        self.emit(Asm::sym(R14.to_string()));
        self.emit(Asm::set(Dest::M, Comp::D));

        // *ARG = pop()
        self.pop_d();
        self.emit(Asm::sym(ARG.to_string()));
        self.emit(Asm::set(Dest::A, Comp::M));
        self.emit(Asm::set(Dest::M, Comp::D));

        // SP = ARG + 1
        self.emit(Asm::sym(ARG.to_string()));
        self.emit(Asm::set(Dest::D, Comp::MPlusOne));
        self.emit(Asm::sym(SP.to_string()));
        self.emit(Asm::set(Dest::M, Comp::D));

        for base in [THAT, THIS, ARG, LCL] {
            self.emit(Asm::sym(R13.to_string()));
            self.emit(Asm::set(Dest::AM, Comp::MMinusOne));
            self.emit(Asm::set(Dest::D, Comp::M));
            self.emit(Asm::sym(base.to_string()));
            self.emit(Asm::set(Dest::M, Comp::D));
        }

        self.emit(Asm::sym(R14.to_string()));
        self.emit(Asm::set(Dest::A, Comp::M));
        self.emit(Asm::jump(Comp::Zero, Jump::JMP));
    }
}
