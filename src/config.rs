// ⚙️ CLI configuration
// Positional input path (stdin when absent) plus a couple of flags.
// Log verbosity is not configured here: env_logger reads RUST_LOG.

use anyhow::{bail, Result};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: parking-registry [OPTIONS] [INPUT]

Reads parking commands from INPUT (or stdin) until a line reading `End`.

Options:
  --dump       Print a JSON snapshot of the registry to stderr when done
  -h, --help   Show this message

Set RUST_LOG=info (or debug) for diagnostics on stderr.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Command file; None = stdin
    pub input: Option<PathBuf>,

    /// Dump the registry as JSON after the session
    pub dump_snapshot: bool,

    pub show_help: bool,
}

impl Config {
    /// Parse arguments (program name already skipped)
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Config::default();

        for arg in args {
            let arg = arg.into();
            match arg.as_str() {
                "--dump" => config.dump_snapshot = true,
                "-h" | "--help" => config.show_help = true,
                flag if flag.starts_with('-') && flag != "-" => bail!("Unknown option: {}", flag),
                "-" => config.input = None,
                path => {
                    if config.input.is_some() {
                        bail!("Only one input file can be given (extra: {})", path);
                    }
                    config.input = Some(PathBuf::from(path));
                }
            }
        }

        Ok(config)
    }
}
