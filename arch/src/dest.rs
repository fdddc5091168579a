use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;

/// Destination field of a compute instruction: bit 2 = A, bit 1 = D, bit 0 = M.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, FromPrimitive, IntoPrimitive,
)]
#[repr(u8)]
pub enum Dest {
    #[default]
    Null = 0b000,
    M = 0b001,
    D = 0b010,
    MD = 0b011,
    A = 0b100,
    AM = 0b101,
    AD = 0b110,
    AMD = 0b111,
}

impl Dest {
    /// Accepts any ordering of `A`, `D`, `M`, each at most once.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let mut bits = 0u8;
        for ch in s.chars() {
            let bit = match ch {
                'A' => 0b100,
                'D' => 0b010,
                'M' => 0b001,
                _ => return Err(Error::UnknownMnemonic(s.to_string())),
            };
            if bits & bit != 0 {
                return Err(Error::UnknownMnemonic(s.to_string()));
            }
            bits |= bit;
        }
        Ok(Self::from(bits))
    }

    pub fn from_bits(bits: u8) -> Self {
        Self::from(bits & 0b111)
    }

    pub fn bits(self) -> u8 {
        self.into()
    }

    pub fn a(self) -> bool {
        self.bits() & 0b100 != 0
    }

    pub fn d(self) -> bool {
        self.bits() & 0b010 != 0
    }

    pub fn m(self) -> bool {
        self.bits() & 0b001 != 0
    }
}

impl fmt::Display for Dest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a() {
            write!(f, "A")?;
        }
        if self.m() {
            write!(f, "M")?;
        }
        if self.d() {
            write!(f, "D")?;
        }
        Ok(())
    }
}
