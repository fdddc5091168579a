use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    FromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
    EnumIter,
)]
#[repr(u8)]
pub enum Jump {
    #[default]
    #[strum(serialize = "")]
    Null = 0b000,
    JGT = 0b001,
    JEQ = 0b010,
    JGE = 0b011,
    JLT = 0b100,
    JNE = 0b101,
    JLE = 0b110,
    JMP = 0b111,
}

impl Jump {
    /// Anything outside the seven jump mnemonics means "never jump".
    pub fn parse(s: &str) -> Self {
        s.parse::<Self>().unwrap_or_default()
    }

    pub fn from_bits(bits: u8) -> Self {
        Self::from(bits & 0b111)
    }

    pub fn bits(self) -> u8 {
        self.into()
    }

    /// Whether the jump is taken for an ALU output, read as two's complement.
    pub fn test(self, out: u16) -> bool {
        let out = out as i16;
        match self {
            Jump::Null => false,
            Jump::JGT => out > 0,
            Jump::JEQ => out == 0,
            Jump::JGE => out >= 0,
            Jump::JLT => out < 0,
            Jump::JNE => out != 0,
            Jump::JLE => out <= 0,
            Jump::JMP => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn lookup() {
        let expects = [
            ("JGT", 0b001),
            ("JEQ", 0b010),
            ("JGE", 0b011),
            ("JLT", 0b100),
            ("JNE", 0b101),
            ("JLE", 0b110),
            ("JMP", 0b111),
        ];
        for (mnemonic, bits) in expects {
            assert_eq!(Jump::parse(mnemonic).bits(), bits);
        }
    }

    #[test]
    fn absent_or_unknown_never_jumps() {
        assert_eq!(Jump::parse(""), Jump::Null);
        assert_eq!(Jump::parse("JXX"), Jump::Null);
        assert_eq!(Jump::parse("jmp"), Jump::Null);
    }

    #[test]
    fn test_matches_bit_meaning() {
        // bit 2: out < 0, bit 1: out == 0, bit 0: out > 0
        for jump in Jump::iter() {
            let bits = jump.bits();
            assert_eq!(jump.test(0xFFFF), bits & 0b100 != 0);
            assert_eq!(jump.test(0), bits & 0b010 != 0);
            assert_eq!(jump.test(1), bits & 0b001 != 0);
        }
    }
}
