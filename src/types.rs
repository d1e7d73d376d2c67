use crate::ir::{Line, TypeTable, BUILTIN_TYPES};
use regex::Regex;
use std::sync::LazyLock;

static RE_ARRAY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*\]").unwrap());
static RE_IDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*$").unwrap());

fn typedef_name(line: &str) -> Option<String> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("typedef") {
        return None;
    }
    let last = tokens.last()?;
    let name = RE_ARRAY_SUFFIX.replace_all(last, "");
    RE_IDENT.is_match(&name).then(|| name.into_owned())
}

/// Seed the built-in type names, then add configured extras and every name
/// introduced by a `typedef` line.
pub fn stage3(lines: &[Line], extra_types: &[String]) -> TypeTable {
    let typedefs = lines.iter().filter_map(|l| typedef_name(&l.text));
    let extras = extra_types
        .iter()
        .filter(|t| RE_IDENT.is_match(t))
        .cloned();
    TypeTable::from_names(
        BUILTIN_TYPES
            .iter()
            .map(|t| t.to_string())
            .chain(extras)
            .chain(typedefs),
    )
}

/// Pattern for one type prefix: a type keyword plus the sigils/whitespace that
/// get erased with it.
pub fn prefix_pattern(types: &TypeTable, preserve_pointer_syntax: bool) -> String {
    let alternation = types.alternation();
    if preserve_pointer_syntax {
        format!(r"\b(?:{})\b(?:[ \t]+|(?=[*&]))", alternation)
    } else {
        format!(r"\b(?:{})\b(?:[ \t]*[*&]+[ \t]*|[ \t]+)", alternation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<Line> {
        v.iter().enumerate().map(|(i, t)| Line::new(i, *t)).collect()
    }

    #[test]
    fn test_builtins_only() {
        let table = stage3(&lines(&["int x = 1"]), &[]);
        assert_eq!(table.len(), BUILTIN_TYPES.len());
    }

    #[test]
    fn test_typedef_names() {
        let table = stage3(
            &lines(&[
                "typedef double real",
                "typedef int matrix[10][10]",
                "x = 1",
            ]),
            &[],
        );
        assert!(table.contains("real"));
        assert!(table.contains("matrix"));
        assert!(!table.contains("x"));
    }

    #[test]
    fn test_typedef_struct_opener_ignored() {
        let table = stage3(&lines(&["typedef struct {"]), &[]);
        assert_eq!(table.len(), BUILTIN_TYPES.len());
    }

    #[test]
    fn test_extra_types() {
        let extras = vec!["char".to_string(), "not a type".to_string()];
        let table = stage3(&[], &extras);
        assert!(table.contains("char"));
        assert!(!table.contains("not a type"));
    }

    #[test]
    fn test_prefix_pattern_word_boundary() {
        let table = TypeTable::default();
        let re = fancy_regex::Regex::new(&prefix_pattern(&table, false)).unwrap();
        assert!(re.is_match("int x").unwrap());
        assert!(re.is_match("int *p").unwrap());
        assert!(!re.is_match("point x").unwrap());
        assert!(!re.is_match("(int)x").unwrap());
    }
}
