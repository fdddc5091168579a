use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot decode instruction at 0x{0:04X}")]
    Decode(u16, #[source] arch::Error),

    #[error("Invalid binary word at line {}: `{}`", .0 + 1, .1)]
    InvalidWord(usize, String),

    #[error("Program too large: {0} words")]
    ProgramTooLarge(usize),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Config(String, #[source] serde_yaml::Error),
}
