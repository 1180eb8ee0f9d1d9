use std::io::Write;

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use hoonlint_core::diagnostic::Diagnostic;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Print diagnostics in the line-oriented format, one per line
    #[default]
    Concise,
    /// Print diagnostics as JSON
    Json,
}

/// Takes the collected diagnostics and displays them in different ways
/// depending on the `--output-format` provided by the user.
pub trait Emitter {
    fn emit<W: Write>(&self, writer: &mut W, diagnostics: &[Diagnostic]) -> anyhow::Result<()>;
}

pub struct ConciseEmitter;

impl Emitter for ConciseEmitter {
    fn emit<W: Write>(&self, writer: &mut W, diagnostics: &[Diagnostic]) -> anyhow::Result<()> {
        for diagnostic in diagnostics {
            writeln!(
                writer,
                "{} {} {} {} {}",
                diagnostic.file.display().to_string().white(),
                diagnostic.loc,
                diagnostic.kind.to_string().red(),
                diagnostic.name,
                diagnostic.description
            )?;
        }
        Ok(())
    }
}

pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn emit<W: Write>(&self, writer: &mut W, diagnostics: &[Diagnostic]) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, diagnostics)?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoonlint_core::diagnostic::MistakeKind;
    use hoonlint_core::location::Location;
    use std::path::PathBuf;

    fn diagnostic() -> Diagnostic {
        Diagnostic {
            file: PathBuf::from("sieve.hoon"),
            loc: Location::new(2, 1),
            kind: MistakeKind::Indent,
            name: "tallWuthep".to_string(),
            description: "Jog kingside head at 2:2; underindented by 1".to_string(),
        }
    }

    #[test]
    fn concise_output_is_line_oriented() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        ConciseEmitter.emit(&mut out, &[diagnostic()]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "sieve.hoon 2:2 indent tallWuthep Jog kingside head at 2:2; underindented by 1\n"
        );
    }

    #[test]
    fn json_output_round_trips() {
        let mut out = Vec::new();
        JsonEmitter.emit(&mut out, &[diagnostic()]).unwrap();
        let parsed: Vec<Diagnostic> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, vec![diagnostic()]);
    }
}
