use crate::ir::Line;
use regex::Regex;
use std::sync::LazyLock;

static RE_BOILERPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#\s*include|using\b|typedef\b|\s*(?:setlocale|SetConsoleCP|SetConsoleOutputCP)\b)")
        .unwrap()
});
static RE_BARE_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*\(.*\)$").unwrap());

fn indent_of(text: &str) -> usize {
    text.len() - text.trim_start().len()
}

fn starts_foreign_text(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() && !c.is_ascii())
}

fn opens_block(line: &str, next: Option<&str>) -> bool {
    line.trim_end().ends_with('{') || next.is_some_and(|n| n.trim_start().starts_with('{'))
}

fn introduces_body(line: &str, next: Option<&str>) -> bool {
    opens_block(line, next) || next.is_some_and(|n| indent_of(n) > indent_of(line))
}

fn is_boilerplate(line: &str, next: Option<&str>) -> bool {
    if opens_block(line, next) {
        return false;
    }
    starts_foreign_text(line) || RE_BOILERPLATE.is_match(line)
}

fn is_stray_call(line: &str, next: Option<&str>) -> bool {
    RE_BARE_CALL.is_match(line.trim_end()) && !introduces_body(line, next)
}

pub fn stage5(lines: &[Line]) -> Vec<Line> {
    let kept: Vec<&Line> = lines.iter().filter(|l| !l.text.trim().is_empty()).collect();
    kept.iter()
        .enumerate()
        .filter(|(i, line)| {
            let next = kept.get(i + 1).map(|l| l.text.as_str());
            !is_boilerplate(&line.text, next) && !is_stray_call(&line.text, next)
        })
        .map(|(_, line)| Line::clone(line))
        .collect()
}
