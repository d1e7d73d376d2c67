use crate::ir::Line;
use unicode_normalization::UnicodeNormalization;

pub struct Source {
    pub lines: Vec<Line>,
    pub descriptor: String,
}

/// Normalize raw input and split off the trailing descriptor line.
pub fn stage0(text: &str) -> Source {
    let text: String = text.nfkc().collect();
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut raw: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
    let descriptor = raw.pop().unwrap_or_default();
    let lines = raw
        .into_iter()
        .enumerate()
        .map(|(i, l)| Line::new(i, l))
        .collect();
    Source { lines, descriptor }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &Source) -> Vec<&str> {
        source.lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_descriptor_split() {
        let source = stage0("int x;\nx = 1;\nmain\n");
        assert_eq!(texts(&source), vec!["int x;", "x = 1;"]);
        assert_eq!(source.descriptor, "main");
    }

    #[test]
    fn test_crlf_normalization() {
        let source = stage0("hello\r\nworld\r\nfoo");
        assert_eq!(texts(&source), vec!["hello", "world"]);
        assert_eq!(source.descriptor, "foo");
    }

    #[test]
    fn test_trailing_whitespace() {
        let source = stage0("  hello   \nworld  ");
        assert_eq!(texts(&source), vec!["  hello"]);
        assert_eq!(source.descriptor, "world");
    }

    #[test]
    fn test_empty_input() {
        let source = stage0("");
        assert!(source.lines.is_empty());
        assert_eq!(source.descriptor, "");
    }

    #[test]
    fn test_nfkc_normalization() {
        let source = stage0("\u{FB01}x = 1\nf");
        assert_eq!(texts(&source), vec!["fix = 1"]);
    }

    #[test]
    fn test_line_indices() {
        let source = stage0("a\nb\nc\nname");
        let idx: Vec<usize> = source.lines.iter().map(|l| l.index).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }
}
