use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown command `{0}`")]
    UnknownCommandKeyword(String),

    #[error("Unknown segment `{0}`")]
    UnknownSegment(String),

    #[error("Missing argument for `{0}`")]
    MissingArgument(String),

    #[error("Cannot parse `{0}` as an index (0..=32767)")]
    ParseArgument(String),

    #[error("Unexpected argument `{0}`")]
    UnexpectedArgument(String),

    #[error("Index {1} is out of range for `{0}` (0..={2})")]
    IndexOutOfRange(String, u16, u16),

    #[error("`{0}` is not a valid symbol name")]
    InvalidName(String),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Failed to read directory: {0}")]
    ReadDir(String, #[source] std::io::Error),

    #[error("No `.vm` files in {0}")]
    NoUnits(String),
}

/// An error tied to the unit and (0-based) source line that produced it.
#[derive(Error, Debug)]
#[error("{}:{}: {}", .unit, .line_idx + 1, .error)]
pub struct Located {
    pub unit: String,
    pub line_idx: usize,
    #[source]
    pub error: Error,
}

impl Located {
    pub fn new(unit: &str, line_idx: usize, error: Error) -> Self {
        Located {
            unit: unit.to_string(),
            line_idx,
            error,
        }
    }

    pub fn print_diag(&self, file: &str, source: &str) {
        cprintln!("<red,bold>error</>: {}", self.error);

        let line_num = self.line_idx + 1;
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
        cprintln!("      <blue>|</>");
        let line_content = source.lines().nth(self.line_idx).unwrap_or("");
        cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
        cprintln!("      <blue>|</>");
    }
}
