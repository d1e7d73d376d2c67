use crate::ir::{Line, TypeTable};
use crate::types::prefix_pattern;
use fancy_regex::Regex as FancyRegex;
use regex::Regex;
use std::sync::LazyLock;

/// One declared name: sigils, identifier, array suffixes.
const DECLARATOR: &str = r"[*&]*[A-Za-z_]\w*(?:\[[^\]]*\])*";

/// `a, b, ` ahead of an initialized name.
static RE_LEADING_NAMES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[*&]?[A-Za-z_]\w*\s*,\s*)+").unwrap());
/// `, c, d` after the last initializer.
static RE_TRAILING_NAMES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\s*,\s*[*&]?[A-Za-z_]\w*)+$").unwrap());
/// `, * name` left by pointer-preserving prefix removal.
static RE_SPACED_SIGIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([*&])\s+(\w+)").unwrap());

struct DeclarationPatterns {
    full_line: FancyRegex,
    leading: FancyRegex,
    prefix: FancyRegex,
}

impl DeclarationPatterns {
    fn new(types: &TypeTable, preserve_pointer_syntax: bool) -> Self {
        let p = prefix_pattern(types, preserve_pointer_syntax);
        let full_line = format!(
            r"^\s*(?:{p})+{d}(?:\s*,\s*(?:{p})*{d})*$",
            p = p,
            d = DECLARATOR
        );
        DeclarationPatterns {
            full_line: FancyRegex::new(&full_line).expect("declaration list pattern"),
            leading: FancyRegex::new(&format!(r"^\s*(?:{})+", p)).expect("leading type pattern"),
            prefix: FancyRegex::new(&format!(r"(?<!typedef ){}", p)).expect("type prefix pattern"),
        }
    }

    fn is_declaration_list(&self, text: &str) -> bool {
        self.full_line.is_match(text).unwrap_or(false)
    }

    fn starts_with_type(&self, text: &str) -> bool {
        self.leading.is_match(text).unwrap_or(false)
    }
}

/// Drop the uninitialized names that share a declaration with an initialized
/// one: `a, b = 5` → `b = 5`, `i = 0, j` → `i = 0`.
fn trim_residue(text: &str) -> String {
    let body = text.trim_start();
    let indent = &text[..text.len() - body.len()];
    let body = RE_LEADING_NAMES.replace(body, "");
    let body = RE_TRAILING_NAMES.replace(&body, "");
    format!("{}{}", indent, body)
}

fn erase(text: &str, patterns: &DeclarationPatterns, preserve_pointer_syntax: bool) -> String {
    let declares = patterns.starts_with_type(text);
    let mut out = patterns.prefix.replace_all(text, "").into_owned();
    if declares {
        out = trim_residue(&out);
    }
    if preserve_pointer_syntax {
        out = RE_SPACED_SIGIL.replace_all(&out, ", $1$2").into_owned();
    }
    out
}

pub fn stage4(lines: &[Line], types: &TypeTable, preserve_pointer_syntax: bool) -> Vec<Line> {
    let patterns = DeclarationPatterns::new(types, preserve_pointer_syntax);
    lines
        .iter()
        .filter(|l| !patterns.is_declaration_list(&l.text))
        .map(|l| l.with_text(erase(&l.text, &patterns, preserve_pointer_syntax)))
        .collect()
}
