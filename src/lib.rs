#![allow(clippy::module_inception)]

use std::{fmt::Display, fs, path::Path};

use colored::Colorize;

use crate::errors::errors::{Error, ErrorImpl, ErrorTip, SourceError};

pub mod analyzer;
pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod options;
pub mod parser;

extern crate regex;

/// File extension every Opus translation unit must carry.
pub const OPUS_FILE_EXTENSION: &str = ".opus";

/// A 1-based line/column pair pointing at the first character of a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Location { line, column }
    }

    pub fn start() -> Self {
        Location { line: 1, column: 1 }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

pub fn is_opus_source(path: &Path) -> bool {
    path.to_string_lossy().ends_with(OPUS_FILE_EXTENSION)
}

/// Reads an Opus translation unit into memory.
///
/// The extension is validated before the file is touched, so a wrongly named
/// file is rejected even if it does not exist.
pub fn open_source(path: &Path) -> Result<String, Error> {
    let display = path.to_string_lossy().to_string();

    if !is_opus_source(path) {
        return Err(Error::new(
            ErrorImpl::Source(SourceError::InvalidExtension),
            Location::start(),
            display,
        ));
    }

    fs::read_to_string(path).map_err(|_| {
        Error::new(
            ErrorImpl::Source(SourceError::Unreadable),
            Location::start(),
            display,
        )
    })
}

/// Returns the text of the line `location` points into, without its newline.
pub fn get_line_at_location(source: &str, location: Location) -> Option<&str> {
    source.lines().nth(location.line.checked_sub(1)?)
}

/// Renders a diagnostic with the offending source line and a caret under the column.
///
/// ```text
/// error: OperationTypeMismatch (operands of `+` must be numeric)
/// -> main.opus:3:9
///   |
/// 3 | let b: Int = "a" + 1
///   | --------^
/// ```
pub fn format_error(error: &Error, source: &str, file: &str) -> String {
    let location = error.get_location();
    let mut output = String::new();

    let name = error.get_error_name().red().bold();
    match error.get_tip() {
        ErrorTip::None => output.push_str(&format!("{}: {}\n", "error".red().bold(), name)),
        tip => output.push_str(&format!("{}: {} ({})\n", "error".red().bold(), name, tip)),
    }
    output.push_str(&format!("{} {}:{}\n", "->".blue(), file, location));

    if let Some(line_text) = get_line_at_location(source, location) {
        let line_string = location.line.to_string();
        let padding = line_string.len() + 2;

        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
        let arrows = location.column.saturating_sub(removed_whitespace).max(1);

        output.push_str(&format!("{:>padding$}\n", "|".blue()));
        output.push_str(&format!("{} {} {}\n", line_string.blue().bold(), "|".blue(), line_text_removed.trim_end()));
        output.push_str(&format!("{:>padding$} {}", "|".blue(), format!("{:->arrows$}", "^").red().bold()));
    }

    output
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_get_line_at_location() {
        let source = "var a: Int = 1\n  let b: Int = 2\n";

        assert_eq!(get_line_at_location(source, Location::new(1, 5)), Some("var a: Int = 1"));
        assert_eq!(get_line_at_location(source, Location::new(2, 3)), Some("  let b: Int = 2"));
        assert_eq!(get_line_at_location(source, Location::new(9, 1)), None);
        assert_eq!(get_line_at_location(source, Location::new(0, 1)), None);
    }

    #[test]
    fn test_open_source_rejects_extension() {
        let error = open_source(&PathBuf::from("program.txt")).unwrap_err();
        assert_eq!(error.get_error_name(), "InvalidExtension");
    }

    #[test]
    fn test_open_source_rejects_missing_file() {
        let error = open_source(&PathBuf::from("does/not/exist.opus")).unwrap_err();
        assert_eq!(error.get_error_name(), "Unreadable");
    }

    #[test]
    fn test_open_source_reads_file() {
        let path = std::env::temp_dir().join("opus_open_source_test.opus");
        fs::write(&path, "let a: Int = 1\n").unwrap();

        assert_eq!(open_source(&path).unwrap(), "let a: Int = 1\n");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_format_error_points_at_column() {
        colored::control::set_override(false);

        let source = "var a: Int = 1\nlet b: Int = a + \"x\"\n";
        let error = Error::new(
            ErrorImpl::Lexical(crate::lexer::tokens::TokenError::Unrecognizable),
            Location::new(2, 5),
            String::from("b"),
        );
        let rendered = format_error(&error, source, "main.opus");

        assert!(rendered.contains("-> main.opus:2:5"));
        assert!(rendered.contains("2 | let b: Int = a + \"x\""));
        assert!(rendered.ends_with("----^"));
    }
}
