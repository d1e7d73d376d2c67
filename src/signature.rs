use crate::ir::FunctionSignature;
use regex::Regex;
use std::sync::LazyLock;

static RE_DESCRIPTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[A-Za-z_]\w*(?: +[A-Za-z_]\w*)*\s*$").unwrap());

const PTR_MARKER: &str = "PTR";

/// Parse the descriptor line: `<name> [<name> ...] [PTR]`.
pub fn extract(descriptor: &str) -> FunctionSignature {
    if !RE_DESCRIPTOR.is_match(descriptor) {
        return FunctionSignature::default();
    }
    let mut tokens: Vec<&str> = descriptor.split_whitespace().collect();
    let preserve_pointer_syntax = tokens.last() == Some(&PTR_MARKER);
    if preserve_pointer_syntax {
        tokens.pop();
    }
    let mut names: Vec<String> = Vec::new();
    for t in tokens {
        if !names.iter().any(|n| n == t) {
            names.push(t.to_string());
        }
    }
    FunctionSignature {
        names,
        preserve_pointer_syntax,
    }
}
