use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown mnemonic: `{0}`")]
    UnknownMnemonic(String),

    #[error("Malformed operand: `{0}`")]
    MalformedOperand(String),

    #[error("Predefined symbol cannot be redefined: `{0}`")]
    ReservedSymbol(String),

    #[error("Re-defined label: `{0}`")]
    RedefinedLabel(String),

    #[error("Undefined computation bits: 0b{0:07b}")]
    UndefinedComp(u8),

    #[error("Address space overflow: Cannot allocate variable `{0}`")]
    AddressSpaceOverflow(String),

    #[error("Program does not fit in ROM: `{0}` would be at 0x{1:04X}")]
    RomOverflow(String, u16),
}
