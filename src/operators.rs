use crate::ir::Line;
use crate::scan::{matching_span, parens_balanced};
use fancy_regex::Regex as FancyRegex;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static RE_SQRT_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:std::)?sqrt\(\s*(-?\d+(?:\.\d+)?)\s*\)").unwrap()
});
static RE_SQRT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:std::)?sqrt\b").unwrap());
static RE_ABS_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:std::)?f?abs\(").unwrap());

static RE_TRAILING_DOT: LazyLock<FancyRegex> =
    LazyLock::new(|| FancyRegex::new(r"(?<![\w.])(\d+)\.(?![\w.])").unwrap());
static RE_LEADING_DOT: LazyLock<FancyRegex> =
    LazyLock::new(|| FancyRegex::new(r"(?<![\w.])\.(\d)").unwrap());

static RE_SPACED_OP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\w)\]|]) ((?:[-+*/%=<>!]=|[-+*/%=<>]|&&|\|\|)) ([-*&]?[\w(\[|√])").unwrap()
});

fn replace_abs(text: &str, max_passes: usize) -> String {
    let mut out = text.to_string();
    let mut from = 0;
    for _ in 0..max_passes {
        let Some((start, end)) = RE_ABS_CALL.find_at(&out, from).map(|m| (m.start(), m.end()))
        else {
            return out;
        };
        match matching_span(&out, end - 1) {
            Some(span) => {
                let inner = out[span.inner()].to_string();
                out.replace_range(start..=span.close, &format!("|{}|", inner));
                // Rescan from the start of the replacement to catch nested calls.
                from = start;
            }
            None => from = end,
        }
    }
    warn!(line = %text, "abs rewrite hit the pass limit");
    out
}

fn normalize_literals(text: &str) -> String {
    let text = RE_TRAILING_DOT.replace_all(text, "$1");
    RE_LEADING_DOT.replace_all(&text, "0.$1").into_owned()
}

/// Remove spaces around binary operators until nothing changes.
pub fn compact_operators(text: &str, max_passes: usize) -> String {
    let mut out = text.to_string();
    for _ in 0..max_passes {
        let next = RE_SPACED_OP.replace_all(&out, "$1$2$3");
        if next == out {
            return out;
        }
        out = next.into_owned();
    }
    warn!(line = %text, "operator compaction hit the pass limit");
    out
}

/// Lines with unbalanced parentheses pass through untouched.
fn normalize_line(text: &str, max_passes: usize) -> String {
    if !parens_balanced(text) {
        return text.to_string();
    }
    let text = RE_SQRT_LITERAL.replace_all(text, "√$1");
    let text = RE_SQRT.replace_all(&text, "√");
    let text = replace_abs(&text, max_passes);
    let text = normalize_literals(&text);
    compact_operators(&text, max_passes)
}

pub fn stage7(lines: &[Line], max_passes: usize) -> Vec<Line> {
    lines
        .iter()
        .map(|l| l.with_text(normalize_line(&l.text, max_passes)))
        .collect()
}
