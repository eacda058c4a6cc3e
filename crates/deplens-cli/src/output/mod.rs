//! Terminal output formatting and diagram rendering.
//!
//! Status messages go through `OutputHandler` so every command formats them
//! the same way; command results (dependency lists, diagrams) are printed
//! plainly so they can be piped.

pub mod colors;
pub mod errors;
pub mod render;

use deplens_core::error::DeplensError;

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new() -> Self {
        Self {
            colors: colors::ColorSupport::detect(),
        }
    }

    /// Handler that never emits escape codes
    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            colors: colors::ColorSupport::disabled(),
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        println!("{}", self.colors.dim(message));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", self.colors.green("✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        println!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Print a best-effort diagnostic and its suggestion to stderr
    pub fn diagnostic(&self, error: &DeplensError) {
        eprintln!("{}", errors::ErrorFormatter::with_colors(self.colors).format_diagnostic(error));
    }

    /// Print a heading for a block of results
    pub fn heading(&self, message: &str) {
        println!("{}", self.colors.bold(message));
    }

    /// Print a line of command output as-is
    pub fn plain_line(&self, line: &str) {
        println!("{}", line);
    }

    /// Print an indented list entry
    pub fn item(&self, line: &str) {
        println!("  - {}", line);
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
