//! Command line options for the `opus` binary.

use std::path::PathBuf;

pub const USAGE: &str = "Usage: opus <file.opus> [--tokens] [--ast] [--symbols] [--verbose] [--no-color]";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub path: PathBuf,
    /// Print the token stream before parsing
    pub dump_tokens: bool,
    /// Print the annotated tree after analysis
    pub dump_ast: bool,
    /// Print the global symbol table after analysis
    pub dump_symbols: bool,
    /// Print per-phase timings
    pub verbose: bool,
    pub no_color: bool,
}

impl Options {
    /// Parses the arguments following the program name.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Options, String> {
        let mut options = Options::default();
        let mut path = None;

        for arg in args {
            match arg.as_str() {
                "--tokens" => options.dump_tokens = true,
                "--ast" => options.dump_ast = true,
                "--symbols" => options.dump_symbols = true,
                "--verbose" | "-v" => options.verbose = true,
                "--no-color" => options.no_color = true,
                flag if flag.starts_with('-') => return Err(format!("Unknown option '{}'", flag)),
                _ if path.is_some() => return Err(String::from("Only one source file may be given")),
                _ => path = Some(PathBuf::from(&arg)),
            }
        }

        options.path = path.ok_or_else(|| String::from("No source file given"))?;
        Ok(options)
    }
}

/// Chooses whether diagnostics are coloured. Call once at startup.
pub fn init_colors(no_color: bool) {
    // colored handles NO_COLOR itself; the flag and FORCE_COLOR are ours
    if no_color || std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    } else if std::env::var("FORCE_COLOR").is_ok() {
        colored::control::set_override(true);
    }
}
