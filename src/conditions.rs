use crate::ir::Line;
use crate::scan::{matching_span, parens_balanced};
use regex::Regex;
use std::sync::LazyLock;

static RE_CONTROL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:else\s+)?(?:for|if|while|switch|case))\s*\(").unwrap()
});
static RE_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:case|default)\b").unwrap());

fn unwrap_condition(body: &str) -> String {
    let Some(caps) = RE_CONTROL.captures(body) else {
        return body.to_string();
    };
    let open = caps[0].len() - 1;
    let Some(span) = matching_span(body, open) else {
        return body.to_string();
    };
    let rest = &body[span.close + 1..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        // The group is only part of the condition: `if (a+b)*c>0`.
        return body.to_string();
    }
    format!("{} {}{}", &caps[1], body[span.inner()].trim(), rest)
}

fn extract_line(text: &str) -> String {
    if !parens_balanced(text) {
        return text.to_string();
    }
    let trimmed = text.trim_start();
    let indent = &text[..text.len() - trimmed.len()];

    let mut body = trimmed.strip_prefix('}').map_or(trimmed, str::trim_start).trim_end();
    body = body.strip_suffix('{').map_or(body, str::trim_end);
    if RE_LABEL.is_match(body) {
        body = body.strip_suffix(':').map_or(body, str::trim_end);
    }
    format!("{}{}", indent, unwrap_condition(body))
}

pub fn stage6(lines: &[Line]) -> Vec<Line> {
    lines
        .iter()
        .map(|l| l.with_text(extract_line(&l.text)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(v: &[&str]) -> Vec<String> {
        let lines: Vec<Line> = v.iter().enumerate().map(|(i, t)| Line::new(i, *t)).collect();
        stage6(&lines).into_iter().map(|l| l.text).collect()
    }

    #[test]
    fn test_if_header() {
        assert_eq!(run(&["    if (x > 0) {"]), vec!["    if x > 0"]);
    }

    #[test]
    fn test_nested_parens_kept_inside() {
        assert_eq!(
            run(&["while ((a + b) * c < f(d)) {"]),
            vec!["while (a + b) * c < f(d)"]
        );
    }

    #[test]
    fn test_for_header() {
        assert_eq!(
            run(&["for (i = 0; i < n; i++) {"]),
            vec!["for i = 0; i < n; i++"]
        );
    }

    #[test]
    fn test_do_while_tail() {
        assert_eq!(run(&["  } while (k != 0)"]), vec!["  while k != 0"]);
    }

    #[test]
    fn test_else_branches() {
        assert_eq!(
            run(&["} else if (a) {", "} else {", "}"]),
            vec!["else if a", "else", ""]
        );
    }

    #[test]
    fn test_case_labels() {
        assert_eq!(
            run(&["  case 1:", "  case (K):", "  default:", "  switch (op) {"]),
            vec!["  case 1", "  case K", "  default", "  switch op"]
        );
    }

    #[test]
    fn test_partial_group_not_unwrapped() {
        assert_eq!(run(&["if (a + b) * c > 0 {"]), vec!["if (a + b) * c > 0"]);
    }

    #[test]
    fn test_single_line_body() {
        assert_eq!(run(&["if (x) return 1"]), vec!["if x return 1"]);
    }

    #[test]
    fn test_function_header_keeps_arguments() {
        assert_eq!(run(&["sum(a, b) {"]), vec!["sum(a, b)"]);
    }

    #[test]
    fn test_unbalanced_line_unchanged() {
        assert_eq!(run(&["if (x > (0) {"]), vec!["if (x > (0) {"]);
    }
}
