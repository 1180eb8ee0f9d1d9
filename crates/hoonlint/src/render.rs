use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use hoonlint_core::source::Source;

/// A divider between non-adjacent source blocks.
const DIVIDER: &str = "----";

/// Windowed source display. Each topic line is widened to
/// `±(context − 1)` lines; overlapping or touching windows merge into one
/// block, and blocks are separated by a divider. Lines are prefixed with
/// `!` when a mistake was reported there, `>` for other topic lines, and
/// a space otherwise. A context of 0 shows nothing.
pub fn render_windows<W: Write>(
    writer: &mut W,
    source: &Source,
    topic_lines: &BTreeSet<usize>,
    mistake_lines: &BTreeMap<usize, Vec<String>>,
    context: usize,
) -> anyhow::Result<()> {
    if context == 0 || topic_lines.is_empty() {
        return Ok(());
    }
    let reach = context - 1;
    // a trailing newline opens a phantom final line; never render it
    let mut last_line = source.line_count();
    if source.text().ends_with('\n') && last_line > 1 {
        last_line -= 1;
    }

    let mut blocks: Vec<(usize, usize)> = Vec::new();
    for &topic in topic_lines {
        let low = topic.saturating_sub(reach).max(1);
        let high = (topic + reach).min(last_line);
        match blocks.last_mut() {
            Some((_, prev_high)) if low <= *prev_high + 1 => {
                *prev_high = (*prev_high).max(high);
            }
            _ => blocks.push((low, high)),
        }
    }

    for (index, &(low, high)) in blocks.iter().enumerate() {
        if index > 0 {
            writeln!(writer, "{DIVIDER}")?;
        }
        for line in low..=high {
            let mark = if mistake_lines.contains_key(&line) {
                '!'
            } else if topic_lines.contains(&line) {
                '>'
            } else {
                ' '
            };
            writeln!(writer, "{mark} {:>4} {}", line, source.line_text(line))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str, topics: &[usize], mistakes: &[usize], context: usize) -> String {
        let source = Source::new(text);
        let topic_lines: BTreeSet<usize> = topics.iter().copied().collect();
        let mistake_lines: BTreeMap<usize, Vec<String>> = mistakes
            .iter()
            .map(|&line| (line, vec!["m".to_string()]))
            .collect();
        let mut out = Vec::new();
        render_windows(&mut out, &source, &topic_lines, &mistake_lines, context).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn zero_context_renders_nothing() {
        assert_eq!(render("a\nb\n", &[1], &[1], 0), "");
    }

    #[test]
    fn a_context_of_one_shows_only_topic_lines() {
        let out = render("a\nb\nc\n", &[2], &[2], 1);
        assert_eq!(out, "!    2 b\n");
    }

    #[test]
    fn mistake_lines_outrank_topic_lines() {
        let out = render("a\nb\nc\n", &[1, 2], &[2], 1);
        assert_eq!(out, ">    1 a\n!    2 b\n");
    }

    #[test]
    fn distant_blocks_are_divided() {
        let out = render("a\nb\nc\nd\ne\nf\ng\n", &[1, 7], &[], 2);
        assert_eq!(
            out,
            ">    1 a\n     2 b\n----\n     6 f\n>    7 g\n"
        );
    }

    #[test]
    fn touching_windows_merge() {
        let out = render("a\nb\nc\nd\ne\n", &[1, 4], &[], 2);
        assert_eq!(
            out,
            ">    1 a\n     2 b\n     3 c\n>    4 d\n     5 e\n"
        );
    }
}
