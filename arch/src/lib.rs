pub mod asm;
pub mod comp;
pub mod dest;
pub mod error;
pub mod inst;
pub mod jump;
pub mod symbol;

pub use error::Error;
