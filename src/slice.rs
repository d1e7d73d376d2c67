use crate::ir::{FunctionSignature, MarkedLine, TypeTable};
use regex::Regex;
use std::collections::HashSet;

fn opener_pattern(name: &str, types: &TypeTable) -> Regex {
    Regex::new(&format!(
        r"^(?:(?:{})\s+)?{}\b",
        types.alternation(),
        regex::escape(name)
    ))
    .expect("function opener pattern")
}

/// End (exclusive) of the slice opened at `start`.
fn slice_end(lines: &[MarkedLine], start: usize) -> usize {
    lines[start + 1..]
        .iter()
        .position(MarkedLine::is_top_level)
        .map_or(lines.len(), |p| start + 1 + p)
}

/// Collect the body of every top-level line that opens one of the target
/// functions. Each slice runs up to the next top-level line.
pub fn stage11(
    lines: &[MarkedLine],
    signature: &FunctionSignature,
    types: &TypeTable,
) -> Vec<MarkedLine> {
    let mut out = Vec::new();
    let mut opened: HashSet<usize> = HashSet::new();

    for name in &signature.names {
        let re = opener_pattern(name, types);
        for (i, line) in lines.iter().enumerate() {
            if !line.is_top_level() || !re.is_match(&line.text) || !opened.insert(i) {
                continue;
            }
            out.extend_from_slice(&lines[i..slice_end(lines, i)]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(v: &[&str]) -> Vec<MarkedLine> {
        v.iter()
            .enumerate()
            .map(|(i, t)| {
                let digits = t.chars().take_while(|c| c.is_ascii_digit()).count();
                MarkedLine {
                    index: i,
                    depth: t[..digits].parse().unwrap(),
                    text: t[digits..].to_string(),
                }
            })
            .collect()
    }

    fn sig(names: &[&str]) -> FunctionSignature {
        FunctionSignature {
            names: names.iter().map(|s| s.to_string()).collect(),
            preserve_pointer_syntax: false,
        }
    }

    fn rendered(v: &[MarkedLine]) -> Vec<String> {
        v.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_single_function() {
        let lines = marked(&["0swap(a, b)", "1t=a", "1a=b", "0main()", "1swap(x, y)"]);
        let out = stage11(&lines, &sig(&["swap"]), &TypeTable::default());
        assert_eq!(rendered(&out), vec!["0swap(a, b)", "1t=a", "1a=b"]);
    }

    #[test]
    fn test_runs_to_end_of_input() {
        let lines = marked(&["0x=1", "0area(r)", "1return r*r"]);
        let out = stage11(&lines, &sig(&["area"]), &TypeTable::default());
        assert_eq!(rendered(&out), vec!["0area(r)", "1return r*r"]);
    }

    #[test]
    fn test_overloads_give_disjoint_slices() {
        let lines = marked(&[
            "0area(r)",
            "1return r*r",
            "0N=10",
            "0area(a, b)",
            "1return a*b",
            "0main()",
        ]);
        let out = stage11(&lines, &sig(&["area"]), &TypeTable::default());
        let idx: Vec<usize> = out.iter().map(|l| l.index).collect();
        assert_eq!(idx, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_type_prefixed_opener() {
        let lines = marked(&["0double mean(v)", "1return v", "0main()"]);
        let out = stage11(&lines, &sig(&["mean"]), &TypeTable::default());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_name_must_be_whole_word() {
        let lines = marked(&["0sortHelper(a)", "1x=1"]);
        let out = stage11(&lines, &sig(&["sort"]), &TypeTable::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_nested_occurrence_is_not_an_opener() {
        let lines = marked(&["0main()", "1swap(x, y)"]);
        let out = stage11(&lines, &sig(&["swap"]), &TypeTable::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_names_in_descriptor_order() {
        let lines = marked(&["0a()", "1x", "0b()", "1y"]);
        let out = stage11(&lines, &sig(&["b", "a"]), &TypeTable::default());
        assert_eq!(rendered(&out), vec!["0b()", "1y", "0a()", "1x"]);
    }

    #[test]
    fn test_no_target() {
        let lines = marked(&["0a()", "1x"]);
        let out = stage11(&lines, &FunctionSignature::default(), &TypeTable::default());
        assert!(out.is_empty());
    }
}
