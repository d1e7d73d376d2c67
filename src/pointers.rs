use crate::ir::Line;
use crate::scan::{find_top_level, matching_span, parens_balanced};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static RE_BASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*(?:\[[^\]]*\])*$").unwrap());

fn is_operand_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == ')' || c == ']' || c == '|'
}

/// Byte offsets of every `*(` that is a dereference rather than a product.
fn dereferences(text: &str) -> Vec<usize> {
    text.match_indices("*(")
        .map(|(i, _)| i)
        .filter(|&i| !text[..i].chars().next_back().is_some_and(is_operand_char))
        .collect()
}

/// Rewrite the dereference at `star` if it has the `*(base+offset)` shape.
fn rewrite_at(text: &str, star: usize) -> Option<String> {
    let span = matching_span(text, star + 1)?;
    let inner = &text[span.inner()];
    let plus = find_top_level(inner, b'+')?;
    let base = inner[..plus].trim();
    let offset = inner[plus + 1..].trim();
    if offset.is_empty() || !RE_BASE.is_match(base) {
        return None;
    }
    Some(format!(
        "{}{}[{}]{}",
        &text[..star],
        base,
        offset,
        &text[span.close + 1..]
    ))
}

pub fn rewrite_line(text: &str, max_passes: usize) -> String {
    if !parens_balanced(text) {
        return text.to_string();
    }
    let mut out = text.to_string();
    for _ in 0..max_passes {
        // Rightmost first: inner groups resolve before the ones around them.
        let next = dereferences(&out)
            .into_iter()
            .rev()
            .find_map(|star| rewrite_at(&out, star));
        match next {
            Some(rewritten) => out = rewritten,
            None => return out,
        }
    }
    warn!(line = %text, "pointer rewrite hit the pass limit");
    out
}

pub fn stage9(lines: &[Line], max_passes: usize) -> Vec<Line> {
    lines
        .iter()
        .map(|l| l.with_text(rewrite_line(&l.text, max_passes)))
        .collect()
}
