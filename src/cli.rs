use std::path::PathBuf;

use clap::{command, Parser};

use crate::logging::LogLevel;
use crate::printer::SerializationFormat;
use crate::settings::configuration::Options;

#[derive(Debug, Parser)]
#[command(
    author,
    about = "pymisc: a fast checker for miscellaneous Python code-quality patterns."
)]
#[command(version)]
pub struct Cli {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Path to a `pyproject.toml` to use for configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Enable verbose logging.
    #[arg(short, long, group = "verbosity")]
    pub verbose: bool,
    /// Only log errors.
    #[arg(short, long, group = "verbosity")]
    pub quiet: bool,
    /// Disable all logging (but still exit with status code "1" upon
    /// detecting errors).
    #[arg(short, long, group = "verbosity")]
    pub silent: bool,
    /// Exit with status code "0", even upon detecting errors.
    #[arg(short, long)]
    pub exit_zero: bool,
    /// List of code prefixes to select, overriding any ignored prefixes.
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,
    /// List of code prefixes to ignore.
    #[arg(long, value_delimiter = ',')]
    pub ignore: Vec<String>,
    /// Report every occurrence of a code, not just the first per file.
    #[arg(long)]
    pub repeat: bool,
    /// List of paths, used to exclude files and/or directories from checks.
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,
    /// Output serialization format for error messages.
    #[arg(long, value_enum, default_value_t = SerializationFormat::Text)]
    pub format: SerializationFormat,
    /// Show per-code occurrence counts after the run.
    #[arg(long)]
    pub statistics: bool,
}

impl Cli {
    /// Layer the command-line overrides over the file-based options.
    pub fn overridden(&self, mut options: Options) -> Options {
        if !self.select.is_empty() {
            options.select = Some(self.select.clone());
        }
        if !self.ignore.is_empty() {
            options.ignore = Some(self.ignore.clone());
        }
        if self.repeat {
            options.repeat = Some(true);
        }
        if !self.exclude.is_empty() {
            options.exclude = Some(self.exclude.clone());
        }
        options
    }
}

/// Map the CLI verbosity flags to a `LogLevel`.
pub fn extract_log_level(cli: &Cli) -> LogLevel {
    if cli.silent {
        LogLevel::Silent
    } else if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else if matches!(cli.format, SerializationFormat::Json) {
        LogLevel::Quiet
    } else {
        LogLevel::Default
    }
}
