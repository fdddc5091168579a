use crate::{comp::Comp, dest::Dest, error::Error, jump::Jump};

use color_print::cformat;
use std::fmt;

/// A resolved machine instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inst {
    /// Load a 15-bit value into `A`.
    A(u16),
    /// `dest=comp;jump`
    C(Dest, Comp, Jump),
}

const C_PREFIX: u16 = 0b111 << 13;

fn enc_format(comp: u8, dest: u8, jump: u8) -> u16 {
    C_PREFIX | ((comp as u16) << 6) | ((dest as u16) << 3) | (jump as u16)
}

fn dec_format(bin: u16) -> (u8, u8, u8) {
    let comp = ((bin >> 6) & 0x7F) as u8;
    let dest = ((bin >> 3) & 0x7) as u8;
    let jump = (bin & 0x7) as u8;
    (comp, dest, jump)
}

impl Inst {
    pub const MAX_ADDR: u16 = 0x7FFF;

    pub fn to_bin(&self) -> u16 {
        match *self {
            Inst::A(value) => value & Self::MAX_ADDR,
            Inst::C(dest, comp, jump) => enc_format(comp.bits(), dest.bits(), jump.bits()),
        }
    }

    pub fn from_bin(bin: u16) -> Result<Inst, Error> {
        if bin & 0x8000 == 0 {
            return Ok(Inst::A(bin));
        }
        let (comp, dest, jump) = dec_format(bin);
        Ok(Inst::C(
            Dest::from_bits(dest),
            Comp::from_bits(comp)?,
            Jump::from_bits(jump),
        ))
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::A(value) => write!(f, "@{}", value),
            Inst::C(dest, comp, jump) => fmt_c(f, *dest, *comp, *jump),
        }
    }
}

pub(crate) fn fmt_c(f: &mut fmt::Formatter<'_>, dest: Dest, comp: Comp, jump: Jump) -> fmt::Result {
    if dest != Dest::Null {
        write!(f, "{}=", dest)?;
    }
    write!(f, "{}", comp)?;
    if jump != Jump::Null {
        write!(f, ";{}", jump)?;
    }
    Ok(())
}

impl Inst {
    pub fn cformat(&self) -> String {
        match self {
            Inst::A(value) => cformat!("<r>@</><y>{}</>", value),
            Inst::C(dest, comp, jump) => {
                let dest = match dest {
                    Dest::Null => String::new(),
                    _ => cformat!("<b>{}</>=", dest),
                };
                let jump = match jump {
                    Jump::Null => String::new(),
                    _ => cformat!(";<m>{}</>", jump),
                };
                cformat!("{}<r>{}</>{}", dest, comp, jump)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn d_eq_m() {
        let inst = Inst::C(Dest::D, Comp::M, Jump::Null);
        assert_eq!(format!("{:016b}", inst.to_bin()), "1111110000010000");
    }

    #[test]
    fn address_literal() {
        assert_eq!(format!("{:016b}", Inst::A(3).to_bin()), "0000000000000011");
    }

    #[test]
    fn compute_word_layout() {
        let inst = Inst::C(Dest::AMD, Comp::DPlusOne, Jump::JMP);
        assert_eq!(format!("{:016b}", inst.to_bin()), "1110011111111111");
        let inst = Inst::C(Dest::Null, Comp::Zero, Jump::JMP);
        assert_eq!(format!("{:016b}", inst.to_bin()), "1110101010000111");
    }

    macro_rules! test_inst {
        ($($name:ident: $inst:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let inst = $inst;
                    let bin = inst.to_bin();
                    assert_eq!(Inst::from_bin(bin), Ok(inst), "bin: {:016b}", bin);
                }
            )*
        }
    }

    test_inst! {
        test_a_zero: Inst::A(0),
        test_a_max: Inst::A(Inst::MAX_ADDR),
        test_c_store: Inst::C(Dest::M, Comp::D, Jump::Null),
        test_c_pop: Inst::C(Dest::AM, Comp::MMinusOne, Jump::Null),
        test_c_branch: Inst::C(Dest::Null, Comp::D, Jump::JNE),
    }

    #[test]
    fn undefined_comp() {
        assert_eq!(
            Inst::from_bin(0b111_0_111100_000_000),
            Err(Error::UndefinedComp(0b0111100))
        );
    }

    #[test]
    fn display() {
        assert_eq!(Inst::A(17).to_string(), "@17");
        assert_eq!(Inst::C(Dest::MD, Comp::MPlusOne, Jump::Null).to_string(), "MD=M+1");
        assert_eq!(Inst::C(Dest::Null, Comp::D, Jump::JGT).to_string(), "D;JGT");
    }
}
