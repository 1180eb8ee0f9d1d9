//! Command-line surface for the hoonlint whitespace linter.
//!
//! The binary entry point belongs to the crate that links the external
//! parser: implement [`hoonlint_core::frontend::Frontend`] and hand it to
//! [`run`] together with the parsed [`Args`].

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use hoonlint_core::filter::FilterList;
use hoonlint_core::frontend::Frontend;
use hoonlint_core::report::Reporter;
use hoonlint_core::source::Source;
use hoonlint_core::walk::Linter;

pub mod args;
pub mod logging;
pub mod output;
pub mod render;
pub mod status;

pub use args::Args;
pub use output::{ConciseEmitter, Emitter, JsonEmitter, OutputFormat};
pub use status::ExitStatus;

/// The only policy this build knows.
pub const WHITESPACE_POLICY: &str = "Test::Whitespace";

/// Default suppression list, picked up from the working directory when no
/// `-S` is given.
const DEFAULT_SUPPRESSIONS: &str = "suppressions";

pub fn run(args: &Args, frontend: &dyn Frontend) -> Result<ExitStatus> {
    logging::init_logging(args.log_level.unwrap_or_default());
    let mut stdout = std::io::stdout().lock();
    run_with_writer(args, frontend, &mut stdout)
}

/// The whole check loop, parameterized over the output writer so tests
/// can capture it.
pub fn run_with_writer<W: Write>(
    args: &Args,
    frontend: &dyn Frontend,
    writer: &mut W,
) -> Result<ExitStatus> {
    if args.policy != WHITESPACE_POLICY {
        bail!(
            "unknown policy {:?}; only {WHITESPACE_POLICY} is available",
            args.policy
        );
    }

    let contents = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read file: {}", args.file.display()))?;

    let mut suppressions = FilterList::default();
    for path in suppression_paths(args) {
        suppressions.merge(FilterList::load(&path)?);
    }
    let inclusions = match &args.inclusions_file {
        Some(path) => Some(FilterList::load(path)?),
        None => None,
    };

    let source = Source::new(contents);
    let tree = frontend.parse(&args.file, source.text())?;

    let mut reporter = Reporter::new(&args.file, inclusions, suppressions, args.census_whitespace);
    Linter::new(&source, &tree, frontend.catalog()).lint(&mut reporter)?;
    reporter.finish();
    tracing::debug!(
        diagnostics = reporter.diagnostics().len(),
        file = %args.file.display(),
        "lint finished"
    );

    match args.output_format {
        OutputFormat::Concise => {
            for note in reporter.census_notes() {
                writeln!(
                    writer,
                    "{} {} census {} {}",
                    args.file.display(),
                    note.loc,
                    note.name,
                    note.shape
                )?;
            }
            ConciseEmitter.emit(writer, reporter.diagnostics())?;
            for tag in reporter.unused_suppressions() {
                writeln!(
                    writer,
                    "Unused suppression: {} {}:{}",
                    tag.kind, tag.line, tag.column
                )?;
            }
            render::render_windows(
                writer,
                &source,
                reporter.topic_lines(),
                reporter.mistake_lines(),
                args.context,
            )?;
        }
        OutputFormat::Json => {
            JsonEmitter.emit(writer, reporter.diagnostics())?;
        }
    }

    Ok(ExitStatus::Success)
}

fn suppression_paths(args: &Args) -> Vec<PathBuf> {
    if !args.suppressions_file.is_empty() {
        return args.suppressions_file.clone();
    }
    let default = PathBuf::from(DEFAULT_SUPPRESSIONS);
    if default.exists() {
        vec![default]
    } else {
        Vec::new()
    }
}
