pub mod codegen;
pub mod error;
pub mod parser;
pub mod session;

pub use error::{Error, Located};
pub use session::{translate, Options, Session, Unit};
