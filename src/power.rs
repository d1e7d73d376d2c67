use crate::ir::Line;
use fancy_regex::{Captures, Regex as FancyRegex};
use regex::Regex;
use std::sync::LazyLock;

/// Longest repeat threshold tried first; longer chains still match it.
const MAX_CHAIN: usize = 10;

static RE_CHAINS: LazyLock<Vec<FancyRegex>> = LazyLock::new(|| {
    (1..=MAX_CHAIN)
        .rev()
        .map(|t| {
            FancyRegex::new(&format!(
                r"(?<![\w.])([A-Za-z_]\w*)(?:\*\1(?![\w.(\[])){{{},}}",
                t
            ))
            .unwrap()
        })
        .collect()
});
static RE_NUMBER_TIMES: LazyLock<FancyRegex> = LazyLock::new(|| {
    FancyRegex::new(r"(?<![\w.^])(\d+(?:\.\d+)?)\*(?=[A-Za-z_](?!\d)|√|\()").unwrap()
});
static RE_PAREN_TIMES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\)\*\(").unwrap());

fn fold_chain(caps: &Captures) -> String {
    let power = caps[0].split('*').count();
    format!("{}^{}", &caps[1], power)
}

pub fn fold_powers(text: &str) -> String {
    let mut out = text.to_string();
    for re in RE_CHAINS.iter() {
        out = re.replace_all(&out, fold_chain).into_owned();
    }
    out
}

pub fn collapse_implicit_products(text: &str) -> String {
    let text = RE_NUMBER_TIMES.replace_all(text, "$1");
    RE_PAREN_TIMES.replace_all(&text, ")(").into_owned()
}

pub fn stage8(lines: &[Line]) -> Vec<Line> {
    lines
        .iter()
        .map(|l| l.with_text(collapse_implicit_products(&fold_powers(&l.text))))
        .collect()
}
