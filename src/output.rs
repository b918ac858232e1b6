//! Terminal output for the pogo-icons CLI.
//!
//! Cargo-style status lines with right-aligned coloured verbs. Everything
//! goes to stderr; stdout is reserved for machine-readable output such as
//! shell completions.

use std::io::{self, IsTerminal, Write};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Colour and in-place progress lines are enabled when stderr is a
/// terminal; otherwise output is plain and every progress update gets its
/// own line.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// e.g. "    Fetching 1,842 sprites"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn success(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    /// Batch progress. Rewrites the current line on a terminal.
    pub fn progress(&self, verb: &str, completed: usize, total: usize, detail: &str) {
        let message = format!("[{}/{}] {}", completed, total, detail);
        let mut stderr = io::stderr().lock();

        if self.color {
            let _ = write!(
                stderr,
                "\r{BOLD}{CYAN}{verb:>VERB_WIDTH$}{RESET} {message}\x1b[K"
            );
            if completed >= total {
                let _ = writeln!(stderr);
            }
            let _ = stderr.flush();
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    /// Format a diagnostic severity label with colour.
    pub fn severity(&self, label: &str, is_error: bool) -> String {
        let color = if is_error { RED } else { YELLOW };
        if self.color {
            format!("{BOLD}{color}{label}{RESET}")
        } else {
            label.to_string()
        }
    }

    /// Print up to `limit` indented lines, then a count of the rest.
    pub fn preview<I>(&self, lines: I, limit: usize)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut rest = 0;
        for (i, line) in lines.into_iter().enumerate() {
            if i < limit {
                eprintln!("  {}", line.as_ref());
            } else {
                rest += 1;
            }
        }
        if rest > 0 {
            eprintln!("  {}", self.dim(&format!("... and {} more", rest)));
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(
                stderr,
                "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"
            );
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Pluralize a count: `plural(1, "sprite", "sprites")` → "1 sprite".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Byte count as kilobytes with one decimal.
pub fn kilobytes(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// Byte count as megabytes with one decimal. Negative means growth.
pub fn megabytes(bytes: i64) -> String {
    format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &std::path::Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "sprite", "sprites"), "1 sprite");
        assert_eq!(plural(0, "sprite", "sprites"), "0 sprites");
        assert_eq!(plural(7, "species", "species"), "7 species");
    }

    #[test]
    fn test_kilobytes() {
        assert_eq!(kilobytes(0), "0.0 KB");
        assert_eq!(kilobytes(1536), "1.5 KB");
    }

    #[test]
    fn test_megabytes() {
        assert_eq!(megabytes(3 * 1024 * 1024), "3.0 MB");
        assert_eq!(megabytes(-512 * 1024), "-0.5 MB");
    }

    #[test]
    fn test_plain_printer_does_not_paint() {
        let printer = Printer::plain();
        assert_eq!(printer.dim("x"), "x");
        assert_eq!(printer.severity("warning", false), "warning");
    }

    #[test]
    fn test_display_path_absolute() {
        use std::path::Path;
        let p = Path::new("/nonexistent/path/to/file");
        assert_eq!(display_path(p), "/nonexistent/path/to/file");
    }
}
