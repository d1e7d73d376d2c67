use crate::ir::{Line, MarkedLine};

fn split_indent(text: &str) -> (&str, &str) {
    let body = text.trim_start();
    (&text[..text.len() - body.len()], body)
}

/// Collapse every `width` consecutive leading spaces into one space.
fn collapse_indent(text: &str, width: usize) -> String {
    if width < 2 {
        return text.to_string();
    }
    let (indent, body) = split_indent(text);
    let unit = " ".repeat(width);
    format!("{}{}", indent.replace(&unit, " "), body)
}

fn has_word(text: &str) -> bool {
    text.chars().any(|c| c.is_alphanumeric() || c == '_')
}

/// Shrink indentation and drop lines left with no words (lone braces and the
/// like).
pub fn layout(lines: &[Line], indent_width: usize) -> Vec<Line> {
    lines
        .iter()
        .filter(|l| has_word(&l.text))
        .map(|l| l.with_text(collapse_indent(&l.text, indent_width)))
        .collect()
}

/// Replace leading whitespace with its character count.
pub fn encode(lines: &[Line]) -> Vec<MarkedLine> {
    lines
        .iter()
        .map(|l| {
            let (indent, body) = split_indent(&l.text);
            MarkedLine {
                index: l.index,
                depth: indent.chars().count(),
                text: body.to_string(),
            }
        })
        .collect()
}

pub fn stage10(lines: &[Line], indent_width: usize) -> Vec<MarkedLine> {
    encode(&layout(lines, indent_width))
}
