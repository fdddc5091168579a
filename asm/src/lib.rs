pub mod assembler;
pub mod error;
pub mod parser;
pub mod util;

pub use assembler::{assemble, to_text};
pub use error::{Error, Located};
