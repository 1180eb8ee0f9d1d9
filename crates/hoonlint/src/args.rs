use std::path::PathBuf;

use clap::Parser;

use crate::logging::LogLevel;
use crate::output::OutputFormat;

/// Command-line surface: `hoonlint [options ...] file`.
#[derive(Clone, Debug, Parser)]
#[command(
    name = "hoonlint",
    about = "hoonlint: lint indentation and inter-token whitespace",
    version
)]
pub struct Args {
    /// Source file to lint.
    #[arg(required = true)]
    pub file: PathBuf,

    /// Reserved; no behavioral effect yet.
    #[arg(long)]
    pub verbose: bool,

    /// Context window size in lines around each reported line. 0 shows
    /// diagnostics only, with no source.
    #[arg(short = 'C', long, default_value_t = 0, value_name = "N")]
    pub context: usize,

    /// Emit a diagnostic for every inspected construct, tagged with its
    /// inferred shape; suppressed diagnostics reappear with a SUPPRESSION
    /// prefix.
    #[arg(long)]
    pub census_whitespace: bool,

    /// Only report diagnostics whose tag appears in FILE.
    #[arg(short = 'I', long, value_name = "FILE")]
    pub inclusions_file: Option<PathBuf>,

    /// Drop diagnostics whose tag appears in FILE. Repeatable. Defaults
    /// to `./suppressions` when present and none is given.
    #[arg(short = 'S', long = "suppressions_file", value_name = "FILE")]
    pub suppressions_file: Vec<PathBuf>,

    /// Lint policy to apply.
    #[arg(short = 'P', long, default_value = "Test::Whitespace", value_name = "NAME")]
    pub policy: String,

    /// Output serialization format for diagnostics.
    #[arg(long, value_enum, default_value_t = OutputFormat::default())]
    pub output_format: OutputFormat,

    /// The log level. One of: `error`, `warn`, `info`, `debug`, or
    /// `trace`. Defaults to `warn`.
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("argv parses")
    }

    #[test]
    fn the_file_argument_is_required() {
        assert!(Args::try_parse_from(["hoonlint"]).is_err());
        let args = parse(&["hoonlint", "sieve.hoon"]);
        assert_eq!(args.file, PathBuf::from("sieve.hoon"));
        assert_eq!(args.context, 0);
        assert_eq!(args.policy, "Test::Whitespace");
        assert!(args.suppressions_file.is_empty());
    }

    #[test]
    fn short_and_long_options_parse() {
        let args = parse(&[
            "hoonlint",
            "-C",
            "3",
            "--census-whitespace",
            "-I",
            "inclusions",
            "-S",
            "one",
            "--suppressions_file",
            "two",
            "-P",
            "Test::Whitespace",
            "sieve.hoon",
        ]);
        assert_eq!(args.context, 3);
        assert!(args.census_whitespace);
        assert_eq!(args.inclusions_file, Some(PathBuf::from("inclusions")));
        assert_eq!(
            args.suppressions_file,
            vec![PathBuf::from("one"), PathBuf::from("two")]
        );
    }

    #[test]
    fn verbose_is_accepted_and_inert() {
        let args = parse(&["hoonlint", "--verbose", "sieve.hoon"]);
        assert!(args.verbose);
    }
}
