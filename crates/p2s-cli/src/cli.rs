//! CLI argument definitions for profile2schema.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "profile2schema",
    version,
    about = "Outputs a generic JSON schema for every dataset in a query profile",
    long_about = "Read a query profile (or a zip archive containing one), decode the \
                  Arrow schema embedded in each dataset descriptor and print it as a \
                  generic JSON type description.\n\n\
                  Without --output-dir each schema is printed as a \"<dataset>\":<json> \
                  line; with it, one <dataset>.json file is written per dataset."
)]
pub struct Cli {
    /// The profile.json, or an archive with a profile.json, to use for schema analysis.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output directory for the JSON schemas (created if missing).
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_file_and_short_output_dir() {
        let cli = Cli::try_parse_from(["profile2schema", "job.zip", "-o", "out"]).expect("parse");
        assert_eq!(cli.file, PathBuf::from("job.zip"));
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn file_argument_is_required() {
        assert!(Cli::try_parse_from(["profile2schema"]).is_err());
    }
}
