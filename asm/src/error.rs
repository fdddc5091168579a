use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Arch(#[from] arch::Error),

    #[error("Syntax Error: Cannot parse `{0}`")]
    SyntaxError(String),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

/// An error tied to the (0-based) source line that produced it.
#[derive(Error, Debug)]
#[error("line {}: {}", .line_idx + 1, .error)]
pub struct Located {
    pub line_idx: usize,
    #[source]
    pub error: Error,
}

impl Located {
    pub fn new(line_idx: usize, error: impl Into<Error>) -> Self {
        Located {
            line_idx,
            error: error.into(),
        }
    }

    /// Print error with diagnostic information showing file location and line content
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
