use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::Error;

/// Computation field of a compute instruction.
///
/// The discriminant is the 7-bit `a cccccc` field: the top bit selects the
/// memory operand `M` instead of the `A` register, the low six bits drive the ALU.
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
    IntoPrimitive,
    TryFromPrimitive,
)]
#[repr(u8)]
pub enum Comp {
    #[strum(serialize = "0")]
    Zero = 0b0_101010,
    #[strum(serialize = "1")]
    One = 0b0_111111,
    #[strum(serialize = "-1")]
    MinusOne = 0b0_111010,
    #[strum(serialize = "D")]
    D = 0b0_001100,
    #[strum(serialize = "A")]
    A = 0b0_110000,
    #[strum(serialize = "!D")]
    NotD = 0b0_001101,
    #[strum(serialize = "!A")]
    NotA = 0b0_110001,
    #[strum(serialize = "-D")]
    NegD = 0b0_001111,
    #[strum(serialize = "-A")]
    NegA = 0b0_110011,
    #[strum(serialize = "D+1")]
    DPlusOne = 0b0_011111,
    #[strum(serialize = "A+1")]
    APlusOne = 0b0_110111,
    #[strum(serialize = "D-1")]
    DMinusOne = 0b0_001110,
    #[strum(serialize = "A-1")]
    AMinusOne = 0b0_110010,
    #[strum(serialize = "D+A")]
    DPlusA = 0b0_000010,
    #[strum(serialize = "D-A")]
    DMinusA = 0b0_010011,
    #[strum(serialize = "A-D")]
    AMinusD = 0b0_000111,
    #[strum(serialize = "D&A")]
    DAndA = 0b0_000000,
    #[strum(serialize = "D|A")]
    DOrA = 0b0_010101,

    #[strum(serialize = "M")]
    M = 0b1_110000,
    #[strum(serialize = "!M")]
    NotM = 0b1_110001,
    #[strum(serialize = "-M")]
    NegM = 0b1_110011,
    #[strum(serialize = "M+1")]
    MPlusOne = 0b1_110111,
    #[strum(serialize = "M-1")]
    MMinusOne = 0b1_110010,
    #[strum(serialize = "D+M")]
    DPlusM = 0b1_000010,
    #[strum(serialize = "D-M")]
    DMinusM = 0b1_010011,
    #[strum(serialize = "M-D")]
    MMinusD = 0b1_000111,
    #[strum(serialize = "D&M")]
    DAndM = 0b1_000000,
    #[strum(serialize = "D|M")]
    DOrM = 0b1_010101,
}

impl Comp {
    pub fn parse(s: &str) -> Result<Self, Error> {
        s.parse::<Self>()
            .map_err(|_| Error::UnknownMnemonic(s.to_string()))
    }

    pub fn bits(self) -> u8 {
        self.into()
    }

    pub fn from_bits(bits: u8) -> Result<Self, Error> {
        Self::try_from(bits & 0x7F).map_err(|_| Error::UndefinedComp(bits & 0x7F))
    }

    /// True when the computation reads `M` instead of `A`.
    pub fn uses_memory(self) -> bool {
        self.bits() & 0b1_000000 != 0
    }

    pub fn eval(self, a: u16, d: u16, m: u16) -> u16 {
        use Comp::*;
        match self {
            Zero => 0,
            One => 1,
            MinusOne => 0xFFFF,
            D => d,
            A => a,
            NotD => !d,
            NotA => !a,
            NegD => d.wrapping_neg(),
            NegA => a.wrapping_neg(),
            DPlusOne => d.wrapping_add(1),
            APlusOne => a.wrapping_add(1),
            DMinusOne => d.wrapping_sub(1),
            AMinusOne => a.wrapping_sub(1),
            DPlusA => d.wrapping_add(a),
            DMinusA => d.wrapping_sub(a),
            AMinusD => a.wrapping_sub(d),
            DAndA => d & a,
            DOrA => d | a,
            M => m,
            NotM => !m,
            NegM => m.wrapping_neg(),
            MPlusOne => m.wrapping_add(1),
            MMinusOne => m.wrapping_sub(1),
            DPlusM => d.wrapping_add(m),
            DMinusM => d.wrapping_sub(m),
            MMinusD => m.wrapping_sub(d),
            DAndM => d & m,
            DOrM => d | m,
        }
    }
}
